/* src/transform/rust/src/error.rs */

use thiserror::Error;

use crate::ast::{NodeKind, Position};
use crate::parser::ParseDiagnostic;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
  /// A bounded operator received more operands than it accepts.
  #[error("Invalid equality syntax. {{#{operator}}} statements must contain two values.")]
  Arity { operator: String, found: usize },

  /// A clause is not a branch, or its tag is not in the registry.
  #[error("Invalid equality syntax. Statements may only contain {{:else}} branches.")]
  Structure { kind: NodeKind, name: Option<String>, position: Position },

  /// A non-else clause has no expression.
  #[error("Invalid equality syntax. Statements must contain an expression.")]
  MissingExpression { tag: String, position: Position },

  #[error("{0}")]
  Parse(ParseDiagnostic),

  /// A transform option holds a value the rewrite cannot work with.
  #[error("transform.{field}: {reason}")]
  Options { field: &'static str, reason: String },

  #[error("cannot overwrite {start}..{end}: {reason}")]
  Patch { start: usize, end: usize, reason: &'static str },
}

impl TransformError {
  /// Arity, structure and missing-expression failures: the template itself is
  /// malformed for this preprocessor.
  pub fn is_syntax(&self) -> bool {
    matches!(
      self,
      TransformError::Arity { .. }
        | TransformError::Structure { .. }
        | TransformError::MissingExpression { .. }
    )
  }

  /// Source span the error points at, when known.
  pub fn position(&self) -> Option<Position> {
    match self {
      TransformError::Structure { position, .. }
      | TransformError::MissingExpression { position, .. } => Some(*position),
      TransformError::Parse(diag) => Some(diag.position),
      TransformError::Patch { start, end, .. } if start <= end => Some(Position::new(*start, *end)),
      TransformError::Arity { .. }
      | TransformError::Patch { .. }
      | TransformError::Options { .. } => None,
    }
  }
}

pub type Result<T, E = TransformError> = std::result::Result<T, E>;
