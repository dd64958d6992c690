use serde::Deserialize;
use serde_yaml::Mapping;

/*
smoke_bundles:
  - jammy-antelope
gate_bundles:
  - jammy-antelope-ec: jammy-antelope
  - jammy-bobcat-ovn:
    - overlays/ovn.yaml.j2
dev_bundles:

Everything else in tests.yaml (configure, tests, target_deploy_status, ...)
is ignored.
*/
#[derive(Deserialize, Debug)]
pub struct RawTestManifest {
  pub smoke_bundles: Option<Vec<RawBundleEntry>>,
  pub gate_bundles: Option<Vec<RawBundleEntry>>,
  pub dev_bundles: Option<Vec<RawBundleEntry>>
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawBundleEntry {
  Plain(String),
  Keyed(Mapping)
}
