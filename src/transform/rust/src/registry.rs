/* src/transform/rust/src/registry.rs */

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Comparison and logical operators a branching block may encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
  Unless,
  Eq,
  Neq,
  Gt,
  Gte,
  Lt,
  Lte,
  And,
  Or,
}

impl Operator {
  pub const ALL: [Operator; 9] = [
    Operator::Unless,
    Operator::Eq,
    Operator::Neq,
    Operator::Gt,
    Operator::Gte,
    Operator::Lt,
    Operator::Lte,
    Operator::And,
    Operator::Or,
  ];

  /// Canonical tag name, e.g. `gte` for `{#gte a,b}`.
  pub fn tag(self) -> &'static str {
    match self {
      Operator::Unless => "unless",
      Operator::Eq => "eq",
      Operator::Neq => "neq",
      Operator::Gt => "gt",
      Operator::Gte => "gte",
      Operator::Lt => "lt",
      Operator::Lte => "lte",
      Operator::And => "and",
      Operator::Or => "or",
    }
  }

  /// Infix joiner placed between operands. `None` for `unless`, which wraps
  /// the whole expression instead of splitting it.
  pub fn joiner(self) -> Option<&'static str> {
    match self {
      Operator::Unless => None,
      Operator::Eq => Some(" === "),
      Operator::Neq => Some(" !== "),
      Operator::Gt => Some(" > "),
      Operator::Gte => Some(" >= "),
      Operator::Lt => Some(" < "),
      Operator::Lte => Some(" <= "),
      Operator::And => Some(" && "),
      Operator::Or => Some(" || "),
    }
  }

  /// Operand ceiling; `None` means unbounded.
  pub fn max_operands(self) -> Option<usize> {
    match self {
      Operator::Unless | Operator::And => None,
      _ => Some(2),
    }
  }
}

impl fmt::Display for Operator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

/// Clause marker accepted after the main branch.
pub const ELSE_TAG: &str = "else";

/// Tag vocabulary recognized as branching blocks.
///
/// Built once per configuration and handed to the validator and condition
/// builder; nothing reads it from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRegistry {
  operators: BTreeMap<String, Operator>,
}

impl Default for TagRegistry {
  fn default() -> Self {
    let operators = Operator::ALL.iter().map(|op| (op.tag().to_string(), *op)).collect();
    Self { operators }
  }
}

impl TagRegistry {
  /// Bind an extra tag name to an existing operator.
  pub fn with_alias(mut self, name: impl Into<String>, operator: Operator) -> Self {
    self.operators.insert(name.into(), operator);
    self
  }

  /// Operator tags plus the `else` marker.
  pub fn is_recognized(&self, name: &str) -> bool {
    name == ELSE_TAG || self.operators.contains_key(name)
  }

  pub fn operator(&self, name: &str) -> Option<Operator> {
    self.operators.get(name).copied()
  }

  pub fn tags(&self) -> impl Iterator<Item = &str> {
    self.operators.keys().map(String::as_str).chain(std::iter::once(ELSE_TAG))
  }
}
