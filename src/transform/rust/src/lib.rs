/* src/transform/rust/src/lib.rs */

mod ast;
mod condition;
mod error;
mod injection;
mod options;
mod parser;
mod patch;
mod preprocess;
mod registry;
mod sourcemap;
mod transform;
mod validate;
mod walk;

pub use ast::{Expression, Node, NodeKind, Position};
pub use condition::{ConditionBuilder, DEFAULT_DELIMITER, build_condition};
pub use error::{Result, TransformError};
pub use injection::{CLOSE_SYNTAX, ELSE_SYNTAX, Injection, plan};
pub use options::{DEFAULT_MARKER, TransformOptions};
pub use parser::{DiagnosticKind, ParseDiagnostic, parse, parse_with_diagnostics};
pub use patch::SpanPatcher;
pub use preprocess::{MarkupInput, Preprocessor, preprocess};
pub use registry::{ELSE_TAG, Operator, TagRegistry};
pub use sourcemap::{LineCol, Segment, SourceMap, SourceMapV3};
pub use transform::{Processed, collect_injections, transform};
pub use validate::{branch_has_content, validate};
pub use walk::{Visit, walk};

#[cfg(test)]
mod tests;
