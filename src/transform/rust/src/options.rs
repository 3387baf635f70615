/* src/transform/rust/src/options.rs */

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::condition::DEFAULT_DELIMITER;
use crate::error::{Result, TransformError};
use crate::registry::{ELSE_TAG, Operator, TagRegistry};

pub const DEFAULT_MARKER: &str = "<!-- Injected by svelte-truth-helpers -->";

/// Block tags the markup language already defines.
const NATIVE_TAGS: &[&str] = &["if", "each", "await", "key", "snippet", "then", "catch"];

/// Knobs for one transform. Deserializes from the `[transform]` table of
/// `truth.toml`; every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
  /// Comment placed on the line before every generated `{#if}`.
  pub marker: String,
  /// Separates operands inside a block expression.
  pub delimiter: char,
  /// Extra tag names bound to existing operators, e.g. `equals = "eq"`.
  pub aliases: BTreeMap<String, Operator>,
}

impl Default for TransformOptions {
  fn default() -> Self {
    Self {
      marker: DEFAULT_MARKER.to_string(),
      delimiter: DEFAULT_DELIMITER,
      aliases: BTreeMap::new(),
    }
  }
}

fn invalid(field: &'static str, reason: String) -> TransformError {
  TransformError::Options { field, reason }
}

impl TransformOptions {
  /// Reject options that would produce broken markup. Runs before every
  /// transform.
  pub fn validate(&self) -> Result<()> {
    let delimiter = self.delimiter;
    if delimiter.is_whitespace() || matches!(delimiter, '{' | '}') {
      return Err(invalid(
        "delimiter",
        format!("{delimiter:?} must not be whitespace or a brace"),
      ));
    }

    let marker = self.marker.trim();
    if marker.len() < 7 || !marker.starts_with("<!--") || !marker.ends_with("-->") {
      return Err(invalid(
        "marker",
        format!("{:?} must be an HTML comment (<!-- ... -->)", self.marker),
      ));
    }
    if marker[4..marker.len() - 3].contains("--") {
      return Err(invalid(
        "marker",
        format!("{:?} must not contain \"--\" inside the comment", self.marker),
      ));
    }

    for name in self.aliases.keys() {
      if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("aliases", format!("{name:?} is not a valid tag name")));
      }
      let builtin = name == ELSE_TAG
        || NATIVE_TAGS.contains(&name.as_str())
        || Operator::ALL.iter().any(|op| op.tag() == name);
      if builtin {
        return Err(invalid("aliases", format!("{name:?} shadows a built-in tag")));
      }
    }
    Ok(())
  }

  pub fn registry(&self) -> TagRegistry {
    self
      .aliases
      .iter()
      .fold(TagRegistry::default(), |registry, (name, op)| registry.with_alias(name.clone(), *op))
  }
}
