pub mod raw_manifest_in;
pub mod bundle_entry;

use std::{fmt, fs, io, path::{Path, PathBuf}};
use enum_iterator::{all, Sequence};

use crate::logger;
use self::{bundle_entry::{BundleEntry, extract_targets}, raw_manifest_in::{RawBundleEntry, RawTestManifest}};

pub const CLASSIC_TESTS_YAML: &'static str = "tests/tests.yaml";

pub fn reactive_tests_yaml() -> PathBuf {
  return Path::new("src").join(CLASSIC_TESTS_YAML);
}

#[derive(Sequence, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleStage {
  Smoke,
  Gate,
  Dev
}

impl BundleStage {
  pub fn yaml_key(&self) -> &'static str {
    return match self {
      Self::Smoke => "smoke_bundles",
      Self::Gate => "gate_bundles",
      Self::Dev => "dev_bundles"
    }
  }
}

#[derive(Debug)]
pub enum ManifestLoadFailureReason {
  MissingManifest(Vec<PathBuf>),
  Io(PathBuf, io::Error),
  InvalidYaml(PathBuf, String)
}

impl fmt::Display for ManifestLoadFailureReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingManifest(searched_paths) => write!(
        f,
        "Unable to find a test manifest. Searched: {}",
        searched_paths
          .iter()
          .map(|path| path.to_string_lossy().to_string())
          .collect::<Vec<String>>()
          .join(", ")
      ),
      Self::Io(path, error) => write!(
        f,
        "Unable to read test manifest '{}': {}",
        path.to_string_lossy(),
        error
      ),
      Self::InvalidYaml(path, message) => write!(
        f,
        "Invalid test manifest '{}':\n\t{}",
        path.to_string_lossy(),
        message
      )
    }
  }
}

#[derive(Debug)]
pub struct TestManifest {
  manifest_path: PathBuf,
  smoke_bundles: Vec<BundleEntry>,
  gate_bundles: Vec<BundleEntry>,
  dev_bundles: Vec<BundleEntry>
}

impl TestManifest {
  pub fn get_manifest_path(&self) -> &Path {
    &self.manifest_path
  }

  pub fn entries_for(&self, stage: BundleStage) -> &[BundleEntry] {
    return match stage {
      BundleStage::Smoke => &self.smoke_bundles,
      BundleStage::Gate => &self.gate_bundles,
      BundleStage::Dev => &self.dev_bundles
    }
  }

  // Smoke, then gate, then dev.
  pub fn all_targets(&self) -> Vec<String> {
    return all::<BundleStage>()
      .flat_map(|stage| extract_targets(self.entries_for(stage)))
      .collect();
  }
}

/*
  Reactive charms keep their tests under src/, classic charms keep them at
  the charm root. The src/ location wins when both exist.
*/
pub fn locate_test_manifest(project_root: &Path) -> PathBuf {
  let reactive_manifest: PathBuf = project_root.join(reactive_tests_yaml());

  return if reactive_manifest.is_file()
    { reactive_manifest }
    else { project_root.join(CLASSIC_TESTS_YAML) };
}

fn convert_stage(
  stage: BundleStage,
  maybe_raw_entries: Option<Vec<RawBundleEntry>>
) -> Result<Vec<BundleEntry>, String> {
  let mut entries: Vec<BundleEntry> = Vec::new();

  for raw_entry in maybe_raw_entries.unwrap_or_default() {
    let converted: Vec<BundleEntry> = BundleEntry::from_raw(&raw_entry)
      .map_err(|err_message| format!("In {}: {}", stage.yaml_key(), err_message))?;

    entries.extend(converted);
  }

  return Ok(entries);
}

pub fn parse_test_manifest(manifest_path: &Path, yaml_string: &str) -> Result<TestManifest, ManifestLoadFailureReason> {
  let invalid = |message: String| ManifestLoadFailureReason::InvalidYaml(manifest_path.to_path_buf(), message);

  let raw_manifest: RawTestManifest = serde_yaml::from_str(yaml_string)
    .map_err(|err| invalid(err.to_string()))?;

  return Ok(TestManifest {
    manifest_path: manifest_path.to_path_buf(),
    smoke_bundles: convert_stage(BundleStage::Smoke, raw_manifest.smoke_bundles).map_err(&invalid)?,
    gate_bundles: convert_stage(BundleStage::Gate, raw_manifest.gate_bundles).map_err(&invalid)?,
    dev_bundles: convert_stage(BundleStage::Dev, raw_manifest.dev_bundles).map_err(&invalid)?
  });
}

pub fn load_test_manifest(project_root: &Path) -> Result<TestManifest, ManifestLoadFailureReason> {
  let manifest_path: PathBuf = locate_test_manifest(project_root);

  let yaml_string: String = match fs::read_to_string(&manifest_path) {
    Ok(contents) => contents,
    Err(error) if error.kind() == io::ErrorKind::NotFound => {
      return Err(ManifestLoadFailureReason::MissingManifest(vec![
        project_root.join(reactive_tests_yaml()),
        manifest_path
      ]));
    },
    Err(error) => return Err(ManifestLoadFailureReason::Io(manifest_path, error))
  };

  logger::info(format!("Using test manifest {}", manifest_path.to_string_lossy()));
  return parse_test_manifest(&manifest_path, &yaml_string);
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn write_file(root: &Path, relative_path: impl AsRef<Path>, contents: &str) {
    let full_path: PathBuf = root.join(relative_path);
    fs::create_dir_all(full_path.parent().unwrap()).unwrap();
    fs::write(full_path, contents).unwrap();
  }

  #[test]
  fn stages_are_ordered_smoke_gate_dev() {
    let stages: Vec<BundleStage> = all::<BundleStage>().collect();
    assert_eq!(stages, vec![BundleStage::Smoke, BundleStage::Gate, BundleStage::Dev]);
  }

  #[test]
  fn targets_are_concatenated_in_stage_order() {
    let manifest = parse_test_manifest(
      Path::new("tests.yaml"),
      "
dev_bundles: [dev-one]
gate_bundles: [gate-one, gate-two]
smoke_bundles: [smoke-one]
"
    ).unwrap();

    assert_eq!(manifest.all_targets(), vec!["smoke-one", "gate-one", "gate-two", "dev-one"]);
  }

  #[test]
  fn absent_and_null_stages_are_empty() {
    let manifest = parse_test_manifest(
      Path::new("tests.yaml"),
      "
smoke_bundles:
gate_bundles: [only]
configure:
  - zaza.openstack.charm_tests.keystone.setup.add_demo_user
"
    ).unwrap();

    assert!(manifest.entries_for(BundleStage::Smoke).is_empty());
    assert!(manifest.entries_for(BundleStage::Dev).is_empty());
    assert_eq!(manifest.all_targets(), vec!["only"]);
  }

  #[test]
  fn malformed_stage_is_invalid_yaml() {
    let result = parse_test_manifest(Path::new("tests.yaml"), "gate_bundles: just-a-string\n");

    assert!(matches!(result, Err(ManifestLoadFailureReason::InvalidYaml(_, _))));
  }

  #[test]
  fn bad_entry_reports_its_stage() {
    let result = parse_test_manifest(Path::new("tests.yaml"), "dev_bundles:\n  - broken:\n");

    match result {
      Err(ManifestLoadFailureReason::InvalidYaml(_, message)) => assert!(message.contains("dev_bundles")),
      other => panic!("Expected InvalidYaml, got {:?}", other)
    }
  }

  #[test]
  fn reactive_manifest_is_preferred() {
    let root = TempDir::new().unwrap();
    write_file(root.path(), CLASSIC_TESTS_YAML, "smoke_bundles: [classic]\n");
    write_file(root.path(), reactive_tests_yaml(), "smoke_bundles: [reactive]\n");

    assert_eq!(locate_test_manifest(root.path()), root.path().join(reactive_tests_yaml()));

    let manifest = load_test_manifest(root.path()).unwrap();
    assert_eq!(manifest.all_targets(), vec!["reactive"]);
  }

  #[test]
  fn classic_manifest_is_the_fallback() {
    let root = TempDir::new().unwrap();
    write_file(root.path(), CLASSIC_TESTS_YAML, "smoke_bundles: [classic]\n");

    let manifest = load_test_manifest(root.path()).unwrap();
    assert_eq!(manifest.get_manifest_path(), root.path().join(CLASSIC_TESTS_YAML).as_path());
    assert_eq!(manifest.all_targets(), vec!["classic"]);
  }

  #[test]
  fn missing_manifest_lists_both_locations() {
    let root = TempDir::new().unwrap();

    match load_test_manifest(root.path()) {
      Err(ManifestLoadFailureReason::MissingManifest(searched)) => assert_eq!(searched.len(), 2),
      other => panic!("Expected MissingManifest, got {:?}", other)
    }
  }
}
