pub mod tox_args_parser;

use crate::{logger, osci_config::{JobRecord, JobSource}};
use self::tox_args_parser::AliasedTargetExpression;

pub const TOX_EXTRA_ARGS_VAR: &'static str = "tox_extra_args";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedTargets {
  aliased_targets: Vec<String>,
  remaining_bundles: Vec<String>
}

impl ResolvedTargets {
  pub fn get_aliased_targets(&self) -> &[String] {
    &self.aliased_targets
  }

  pub fn get_remaining_bundles(&self) -> &[String] {
    &self.remaining_bundles
  }

  // Aliased targets first, then whatever bundles are left. Not deduplicated.
  pub fn into_combined(self) -> Vec<String> {
    let mut combined: Vec<String> = self.aliased_targets;
    combined.extend(self.remaining_bundles);
    return combined;
  }
}

fn remove_first(bundles: &mut Vec<String>, name: &str) {
  if let Some(index) = bundles.iter().position(|bundle| bundle == name) {
    bundles.remove(index);
  }
}

fn aliased_expression_for(job: &JobRecord) -> Option<AliasedTargetExpression> {
  let extra_args: String = job.var_string(TOX_EXTRA_ARGS_VAR)?;
  let expression = AliasedTargetExpression::from_extra_args(&extra_args)?;

  if expression.has_multiple_markers() {
    logger::warn(format!(
      "{} for job '{}' contains more than one '--'. Everything after the first one is used as the target: '{}'",
      TOX_EXTRA_ARGS_VAR,
      job.get_name(),
      expression.get_raw_expression()
    ));
  }

  return Some(expression);
}

/*
  A charm can run a bundle with the configuration steps of an alias section
  of tests.yaml instead of the default ones. That is done with a job in
  osci.yaml whose tox_extra_args passes '<alias>:<bundle>' targets after '--'.

  Every project check job and every bundle is looked up as a job name. For each
  matching job with such an argument:
    - the argument (spaces turned into '+') becomes a target
    - bundles named by the argument, and the job itself, are dropped since the
      aliased target already runs them
    - dependencies which are also project check jobs are added back, since they
      may not be in tests.yaml at all

  The given bundles are never modified.
*/
pub fn resolve_aliased_targets(bundles: &[String], job_source: &impl JobSource) -> ResolvedTargets {
  let project_check_jobs: &[String] = job_source.project_check_jobs();
  let mut working_bundles: Vec<String> = bundles.to_vec();
  let mut aliased_targets: Vec<String> = Vec::new();

  for job_name in project_check_jobs.iter().chain(bundles.iter()) {
    let matching_jobs = job_source.jobs()
      .iter()
      .filter(|job| job.get_name() == job_name);

    for job in matching_jobs {
      let expression: AliasedTargetExpression = match aliased_expression_for(job) {
        Some(expression) => expression,
        None => continue
      };

      let target: String = expression.as_target();
      logger::info(format!("Job '{}' runs aliased target '{}'", job_name, target));
      aliased_targets.push(target);

      for absorbed_name in expression.absorbed_names() {
        remove_first(&mut working_bundles, absorbed_name);
      }

      remove_first(&mut working_bundles, job_name);

      for dependency in job.get_dependencies() {
        if project_check_jobs.contains(dependency) {
          logger::info(format!("Job '{}' pulls in dependency '{}'", job_name, dependency));
          working_bundles.push(dependency.clone());
        }
      }
    }
  }

  return ResolvedTargets {
    aliased_targets,
    remaining_bundles: working_bundles
  };
}
