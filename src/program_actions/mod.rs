use crate::{
  cli_config::RunConfig,
  common::sorted_unique,
  logger,
  osci_config::{load_osci_config, JobSource, OsciConfig},
  target_resolver::{resolve_aliased_targets, ResolvedTargets},
  test_manifest::{load_test_manifest, TestManifest}
};

pub fn targets_for_bundles(bundles: &[String], job_source: &impl JobSource) -> Vec<String> {
  let unique_bundles: Vec<String> = sorted_unique(bundles);
  let resolved: ResolvedTargets = resolve_aliased_targets(&unique_bundles, job_source);

  logger::info(format!(
    "{} aliased targets, {} bundles left over",
    resolved.get_aliased_targets().len(),
    resolved.get_remaining_bundles().len()
  ));

  return sorted_unique(&resolved.into_combined());
}

// Sorted, deduplicated names of every target OSCI would run for the charm.
pub fn identify_func_test_targets(run_config: &RunConfig) -> Result<Vec<String>, String> {
  let manifest: TestManifest = load_test_manifest(&run_config.project_root)
    .map_err(|failure_reason| failure_reason.to_string())?;

  let bundles: Vec<String> = manifest.all_targets();
  logger::info(format!(
    "Found {} bundles in {}",
    bundles.len(),
    manifest.get_manifest_path().to_string_lossy()
  ));

  let osci_config: OsciConfig = load_osci_config(&run_config.osci_yaml)
    .map_err(|failure_reason| failure_reason.to_string())?;

  let targets: Vec<String> = targets_for_bundles(&bundles, &osci_config);
  logger::info(format!(
    "{} targets after resolving aliases from {}",
    targets.len(),
    osci_config.get_config_path().to_string_lossy()
  ));

  return Ok(targets);
}
