use serde::Deserialize;
use serde_yaml::Mapping;

/*
- project:
    templates:
      - charm-unit-jobs-py310
    check:
      jobs:
        - jammy-antelope
        - jammy-bobcat:
            voting: false
- job:
    name: jammy-antelope
    parent: func-target
    dependencies:
      - osci-lint
      - name: tox-py310
        soft: true
    vars:
      tox_extra_args: '-- default:jammy-antelope'

Only 'project' and 'job' items matter here. project-template, nodeset,
secret and friends are skipped.
*/
pub type RawOsciConfig = Vec<RawOsciItem>;

#[derive(Deserialize, Debug)]
pub struct RawOsciItem {
  pub project: Option<RawProjectItem>,
  pub job: Option<RawJobItem>
}

#[derive(Deserialize, Debug)]
pub struct RawProjectItem {
  pub check: Option<RawPipeline>
}

#[derive(Deserialize, Debug)]
pub struct RawPipeline {
  pub jobs: Option<Vec<RawPipelineJob>>
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum RawPipelineJob {
  Name(String),
  // - jammy-bobcat:
  //     voting: false
  Configured(Mapping)
}

#[derive(Deserialize, Debug)]
pub struct RawJobItem {
  pub name: String,
  pub vars: Option<Mapping>,
  pub dependencies: Option<RawDependencyList>
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum RawDependencyList {
  Many(Vec<RawJobDependency>),
  Single(RawJobDependency)
}

impl RawDependencyList {
  pub fn into_names(self) -> Vec<String> {
    let dependencies: Vec<RawJobDependency> = match self {
      Self::Many(dependencies) => dependencies,
      Self::Single(dependency) => vec![dependency]
    };

    return dependencies
      .into_iter()
      .map(RawJobDependency::into_name)
      .collect();
  }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum RawJobDependency {
  Name(String),
  // Soft dependencies ('soft: true') are still dependencies as far as
  // target selection is concerned, so only the name is kept.
  Detailed {
    name: String
  }
}

impl RawJobDependency {
  pub fn into_name(self) -> String {
    return match self {
      Self::Name(name) => name,
      Self::Detailed { name, .. } => name
    }
  }
}
