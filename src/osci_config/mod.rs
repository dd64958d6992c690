pub mod raw_osci_in;

use std::{fmt, fs, io, path::{Path, PathBuf}};
use serde_yaml::{Mapping, Value};

use crate::{common::yaml_scalar_string, logger};
use self::raw_osci_in::{RawOsciConfig, RawPipelineJob};

pub const OSCI_YAML: &'static str = "osci.yaml";

// Where the job data used for alias lookup comes from.
pub trait JobSource {
  fn project_check_jobs(&self) -> &[String];
  fn jobs(&self) -> &[JobRecord];
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
  name: String,
  vars: Option<Mapping>,
  dependencies: Vec<String>
}

impl JobRecord {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      vars: None,
      dependencies: Vec::new()
    }
  }

  #[cfg(test)]
  pub fn with_var(mut self, var_name: &str, value: impl Into<Value>) -> Self {
    self.vars
      .get_or_insert_with(Mapping::new)
      .insert(Value::from(var_name), value.into());
    self
  }

  pub fn with_dependencies<S: Into<String>>(mut self, dependencies: impl IntoIterator<Item=S>) -> Self {
    self.dependencies.extend(dependencies.into_iter().map(Into::into));
    self
  }

  pub fn get_name(&self) -> &str {
    &self.name
  }

  pub fn get_dependencies(&self) -> &[String] {
    &self.dependencies
  }

  /*
    String form of a job variable. Scalars are stringified, sequences and
    mappings are rendered back to YAML text. A null variable counts as unset.
  */
  pub fn var_string(&self, var_name: &str) -> Option<String> {
    let value: &Value = self.vars.as_ref()?.get(var_name)?;

    return match value {
      Value::Null => None,
      Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
        .ok()
        .map(|yaml_text| yaml_text.trim_end().to_owned()),
      scalar => yaml_scalar_string(scalar)
    }
  }
}

#[derive(Debug)]
pub enum OsciLoadFailureReason {
  MissingConfig(PathBuf),
  Io(PathBuf, io::Error),
  InvalidYaml(PathBuf, String)
}

impl fmt::Display for OsciLoadFailureReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingConfig(path) => write!(
        f,
        "Unable to find job configuration '{}'",
        path.to_string_lossy()
      ),
      Self::Io(path, error) => write!(
        f,
        "Unable to read job configuration '{}': {}",
        path.to_string_lossy(),
        error
      ),
      Self::InvalidYaml(path, message) => write!(
        f,
        "Invalid job configuration '{}':\n\t{}",
        path.to_string_lossy(),
        message
      )
    }
  }
}

#[derive(Debug)]
pub struct OsciConfig {
  config_path: PathBuf,
  project_check_jobs: Vec<String>,
  jobs: Vec<JobRecord>
}

impl OsciConfig {
  pub fn get_config_path(&self) -> &Path {
    &self.config_path
  }
}

impl JobSource for OsciConfig {
  fn project_check_jobs(&self) -> &[String] {
    &self.project_check_jobs
  }

  fn jobs(&self) -> &[JobRecord] {
    &self.jobs
  }
}

fn pipeline_job_names(pipeline_job: RawPipelineJob) -> Vec<String> {
  return match pipeline_job {
    RawPipelineJob::Name(name) => vec![name],
    RawPipelineJob::Configured(mapping) => mapping
      .keys()
      .filter_map(yaml_scalar_string)
      .collect()
  }
}

pub fn parse_osci_config(config_path: &Path, yaml_string: &str) -> Result<OsciConfig, OsciLoadFailureReason> {
  let raw_config: RawOsciConfig = serde_yaml::from_str(yaml_string)
    .map_err(|err| OsciLoadFailureReason::InvalidYaml(config_path.to_path_buf(), err.to_string()))?;

  let mut project_check_jobs: Vec<String> = Vec::new();
  let mut jobs: Vec<JobRecord> = Vec::new();

  for item in raw_config {
    if let Some(check_jobs) = item.project.and_then(|project| project.check).and_then(|check| check.jobs) {
      for pipeline_job in check_jobs {
        project_check_jobs.extend(pipeline_job_names(pipeline_job));
      }
    }

    if let Some(raw_job) = item.job {
      let dependencies: Vec<String> = raw_job.dependencies
        .map(|dependency_list| dependency_list.into_names())
        .unwrap_or_default();

      let mut job: JobRecord = JobRecord::new(raw_job.name).with_dependencies(dependencies);
      job.vars = raw_job.vars;
      jobs.push(job);
    }
  }

  return Ok(OsciConfig {
    config_path: config_path.to_path_buf(),
    project_check_jobs,
    jobs
  });
}

pub fn load_osci_config(config_path: &Path) -> Result<OsciConfig, OsciLoadFailureReason> {
  let yaml_string: String = match fs::read_to_string(config_path) {
    Ok(contents) => contents,
    Err(error) if error.kind() == io::ErrorKind::NotFound => {
      return Err(OsciLoadFailureReason::MissingConfig(config_path.to_path_buf()));
    },
    Err(error) => return Err(OsciLoadFailureReason::Io(config_path.to_path_buf(), error))
  };

  let osci_config: OsciConfig = parse_osci_config(config_path, &yaml_string)?;

  logger::info(format!(
    "Loaded {} project check jobs and {} job definitions from {}",
    osci_config.project_check_jobs.len(),
    osci_config.jobs.len(),
    config_path.to_string_lossy()
  ));

  return Ok(osci_config);
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  const SAMPLE_OSCI_YAML: &'static str = "
- project:
    templates:
      - charm-unit-jobs-py310
    check:
      jobs:
        - jammy-antelope
        - jammy-bobcat:
            voting: false
- project-template:
    name: charm-functional-jobs
    check:
      jobs:
        - not-a-project-job
- job:
    name: jammy-antelope
    parent: func-target
    dependencies:
      - osci-lint
      - name: tox-py310
        soft: true
    vars:
      tox_extra_args: '-- default:jammy-antelope'
- job:
    name: jammy-bobcat
    dependencies: jammy-antelope
- job:
    name: numeric-args
    vars:
      tox_extra_args: 42
      other: [a, b]
      unset:
";

  fn sample_config() -> OsciConfig {
    return parse_osci_config(Path::new(OSCI_YAML), SAMPLE_OSCI_YAML).unwrap();
  }

  #[test]
  fn project_check_jobs_come_from_project_items_only() {
    assert_eq!(sample_config().project_check_jobs(), ["jammy-antelope", "jammy-bobcat"]);
  }

  #[test]
  fn jobs_keep_file_order() {
    let config = sample_config();
    let names: Vec<&str> = config.jobs().iter().map(JobRecord::get_name).collect();

    assert_eq!(names, vec!["jammy-antelope", "jammy-bobcat", "numeric-args"]);
  }

  #[test]
  fn dependencies_accept_names_mappings_and_single_values() {
    let config = sample_config();

    assert_eq!(config.jobs()[0].get_dependencies(), ["osci-lint", "tox-py310"]);
    assert_eq!(config.jobs()[1].get_dependencies(), ["jammy-antelope"]);
    assert!(config.jobs()[2].get_dependencies().is_empty());
  }

  #[test]
  fn var_string_coerces_values() {
    let config = sample_config();

    assert_eq!(
      config.jobs()[0].var_string("tox_extra_args"),
      Some("-- default:jammy-antelope".to_owned())
    );
    assert_eq!(config.jobs()[2].var_string("tox_extra_args"), Some("42".to_owned()));
    assert_eq!(config.jobs()[2].var_string("other"), Some("- a\n- b".to_owned()));
    assert_eq!(config.jobs()[2].var_string("unset"), None);
    assert_eq!(config.jobs()[1].var_string("tox_extra_args"), None);
  }

  #[test]
  fn builder_matches_parsed_record() {
    let built = JobRecord::new("jammy-antelope")
      .with_var("tox_extra_args", "-- default:jammy-antelope")
      .with_dependencies(vec!["osci-lint", "tox-py310"]);

    assert_eq!(built, sample_config().jobs()[0]);
  }

  #[test]
  fn non_list_config_is_invalid() {
    let result = parse_osci_config(Path::new(OSCI_YAML), "project: {}\n");

    assert!(matches!(result, Err(OsciLoadFailureReason::InvalidYaml(_, _))));
  }

  #[test]
  fn load_reads_from_disk() {
    let root = TempDir::new().unwrap();
    let config_path: PathBuf = root.path().join(OSCI_YAML);
    fs::write(&config_path, SAMPLE_OSCI_YAML).unwrap();

    let config = load_osci_config(&config_path).unwrap();
    assert_eq!(config.get_config_path(), config_path.as_path());
    assert_eq!(config.jobs().len(), 3);
  }

  #[test]
  fn missing_config_is_reported() {
    let root = TempDir::new().unwrap();

    assert!(matches!(
      load_osci_config(&root.path().join(OSCI_YAML)),
      Err(OsciLoadFailureReason::MissingConfig(_))
    ));
  }
}
