use clap::Parser;

const SKY: &'static str = "Skylar Cupit";

/// Print the functional test targets that OSCI would run for a charm, as a
/// single space separated line. Run from the charm root, or pass it in.
#[derive(Parser, Debug)]
#[command(version, author = SKY)]
pub struct Opts {
  /// Charm root directory. Test manifests are looked up in
  /// src/tests/tests.yaml first, then tests/tests.yaml.
  #[arg(default_value = ".")]
  pub project_root: String,

  /// Job configuration file. Relative paths are resolved against the
  /// charm root. Defaults to <PROJECT_ROOT>/osci.yaml
  #[arg(long = "osci-yaml")]
  pub osci_yaml: Option<String>,

  /// Print what was looked up and why to stderr.
  #[arg(short, long)]
  pub verbose: bool
}
