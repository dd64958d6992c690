use serde_yaml::{Mapping, Value};

use crate::{common::yaml_scalar_string, logger};
use super::raw_manifest_in::RawBundleEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundlePayload {
  // The key names the real bundle, these are only overlays applied on top of it.
  OverlayList(Vec<String>),
  // The key is an alias for the bundle named here.
  DirectName(String)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleEntry {
  PlainTarget(String),
  AliasedTarget(String, BundlePayload)
}

impl BundleEntry {
  pub fn target_name(&self) -> &str {
    return match self {
      Self::PlainTarget(name) => name,
      Self::AliasedTarget(key, BundlePayload::OverlayList(_)) => key,
      Self::AliasedTarget(_, BundlePayload::DirectName(bundle_name)) => bundle_name
    }
  }

  /*
    A keyed entry is expected to have exactly one key. When it has more, every
    value still produces an entry, but overlay values always take the mapping's
    first key. That is what existing manifests have been relying on, so it is
    kept and warned about instead of guessing a better rule.
  */
  pub fn from_raw(raw_entry: &RawBundleEntry) -> Result<Vec<BundleEntry>, String> {
    return match raw_entry {
      RawBundleEntry::Plain(name) => Ok(vec![BundleEntry::PlainTarget(name.clone())]),
      RawBundleEntry::Keyed(mapping) => entries_from_mapping(mapping)
    }
  }
}

fn mapping_key_string(key: &Value) -> Result<String, String> {
  return yaml_scalar_string(key)
    .ok_or_else(|| format!("Bundle entry keys must be scalars, but found {:?}", key));
}

fn entries_from_mapping(mapping: &Mapping) -> Result<Vec<BundleEntry>, String> {
  let first_key: String = match mapping.keys().next() {
    Some(key) => mapping_key_string(key)?,
    None => return Ok(Vec::new())
  };

  if mapping.len() > 1 {
    logger::warn(format!(
      "Bundle entry '{}' maps {} keys. Only single key entries are expected; overlay lists in it will all resolve to '{}'.",
      first_key,
      mapping.len(),
      first_key
    ));
  }

  let mut entries: Vec<BundleEntry> = Vec::new();

  for (key, value) in mapping {
    let key_string: String = mapping_key_string(key)?;

    let entry: BundleEntry = match value {
      Value::Sequence(overlays) => {
        let overlay_names: Vec<String> = overlays
          .iter()
          .map(|overlay| yaml_scalar_string(overlay)
            .ok_or_else(|| format!("Overlay list for bundle '{}' contains a non-scalar item", key_string))
          )
          .collect::<Result<_, _>>()?;

        BundleEntry::AliasedTarget(first_key.clone(), BundlePayload::OverlayList(overlay_names))
      },
      scalar_value => match yaml_scalar_string(scalar_value) {
        Some(bundle_name) => BundleEntry::AliasedTarget(key_string, BundlePayload::DirectName(bundle_name)),
        None => return Err(format!(
          "Bundle entry '{}' must map to either a bundle name or a list of overlays",
          key_string
        ))
      }
    };

    entries.push(entry);
  }

  return Ok(entries);
}

pub fn extract_targets(entries: &[BundleEntry]) -> Vec<String> {
  return entries
    .iter()
    .map(|entry| entry.target_name().to_owned())
    .collect();
}
