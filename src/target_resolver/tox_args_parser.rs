use regex::Regex;

use crate::common::space_safe_token;

const POSARGS_MARKER: &'static str = "-- ";

lazy_static! {
  // Everything after the first "-- " up to the end of that line.
  static ref POSARGS_REGEX: Regex = new_regex_or_panic(r"-- (.+)");
}

fn new_regex_or_panic(regex_str: &str) -> Regex {
  return match Regex::new(regex_str) {
    Ok(r) => r,
    Err(failure_error) => panic!("{}", failure_error)
  }
}

/*
  The part of a job's tox_extra_args which is passed through to the test
  runner, for example:

    tox_extra_args: '-- default:jammy-antelope smoke:jammy-antelope-ec'

  Each space separated item is '<alias>:<bundle name>'.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasedTargetExpression {
  raw_expression: String
}

impl AliasedTargetExpression {
  pub fn from_extra_args(extra_args: &str) -> Option<Self> {
    return POSARGS_REGEX.captures(extra_args)
      .and_then(|captures| captures.get(1))
      .map(|expression_match| Self {
        raw_expression: expression_match.as_str().to_owned()
      });
  }

  pub fn get_raw_expression(&self) -> &str {
    &self.raw_expression
  }

  // Only the first marker is treated as special. Anything after it,
  // later markers included, is part of the expression.
  pub fn has_multiple_markers(&self) -> bool {
    return self.raw_expression.contains(POSARGS_MARKER);
  }

  pub fn as_target(&self) -> String {
    return space_safe_token(&self.raw_expression);
  }

  // The bundle names this expression runs, i.e. whatever follows the first
  // ':' of each item. Items without an alias prefix name nothing.
  pub fn absorbed_names(&self) -> Vec<&str> {
    return self.raw_expression
      .split_whitespace()
      .filter_map(|item| item.split_once(':'))
      .map(|(_, bundle_name)| bundle_name)
      .collect();
  }
}
