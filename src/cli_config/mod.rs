use std::path::{Path, PathBuf};

use crate::osci_config::OSCI_YAML;
use self::clap_cli_config::Opts;
pub mod clap_cli_config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
  pub project_root: PathBuf,
  pub osci_yaml: PathBuf,
  pub verbose: bool
}

impl RunConfig {
  pub fn for_project_root(project_root: impl AsRef<Path>) -> Self {
    let project_root: PathBuf = project_root.as_ref().to_path_buf();

    return RunConfig {
      osci_yaml: project_root.join(OSCI_YAML),
      project_root,
      verbose: false
    }
  }
}

impl From<Opts> for RunConfig {
  fn from(opts: Opts) -> Self {
    let mut run_config = RunConfig::for_project_root(&opts.project_root);

    if let Some(given_osci_yaml) = opts.osci_yaml {
      // join() keeps absolute paths as they are.
      run_config.osci_yaml = run_config.project_root.join(given_osci_yaml);
    }

    run_config.verbose = opts.verbose;
    return run_config;
  }
}
