use std::collections::BTreeSet;
use serde_yaml::Value;

pub const TARGET_SEPARATOR: &'static str = " ";

// Mirrors how a loosely typed YAML loader would stringify a scalar.
// Returns None for null, sequences and mappings.
pub fn yaml_scalar_string(value: &Value) -> Option<String> {
  return match value {
    Value::String(the_str) => Some(the_str.clone()),
    Value::Number(number) => Some(number.to_string()),
    Value::Bool(boolean) => Some(boolean.to_string()),
    Value::Tagged(tagged) => yaml_scalar_string(&tagged.value),
    Value::Null | Value::Sequence(_) | Value::Mapping(_) => None
  }
}

// Targets are printed space separated, so any space inside a single
// target has to become something else.
pub fn space_safe_token(item: impl AsRef<str>) -> String {
  return item.as_ref().replace(" ", "+");
}

pub fn sorted_unique<'a>(items: impl IntoIterator<Item=&'a String>) -> Vec<String> {
  return items.into_iter()
    .cloned()
    .collect::<BTreeSet<String>>()
    .into_iter()
    .collect();
}

pub fn join_targets(targets: &[String]) -> String {
  return targets.join(TARGET_SEPARATOR);
}
