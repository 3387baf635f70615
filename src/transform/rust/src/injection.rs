/* src/transform/rust/src/injection.rs */

use crate::ast::{Node, Position};
use crate::condition::ConditionBuilder;
use crate::error::Result;

pub const ELSE_SYNTAX: &str = "{:else}";
pub const CLOSE_SYNTAX: &str = "{/if}";

/// Planned replacement of the original bytes `start..end` with `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
  pub value: String,
  pub start: usize,
  pub end: usize,
}

impl Injection {
  fn new(value: String, span: Position) -> Self {
    Self { value, start: span.start, end: span.end }
  }

  pub fn span(&self) -> Position {
    Position::new(self.start, self.end)
  }
}

/// From `start` up to the branch's first content node, or the branch end when
/// it has no content. Only the marker is rewritten; content stays untouched.
fn marker_span(start: usize, branch: &Node) -> Position {
  let end = branch.first_child().map_or(branch.position.end, |child| child.position.start);
  Position::new(start, end)
}

/// Plan the open, else and close injections of a validated branching block,
/// in that order. Always yields `branches.len() + 1` entries.
pub fn plan(block: &Node, builder: &ConditionBuilder<'_>, marker: &str) -> Result<Vec<Injection>> {
  let Some((main, clauses)) = block.branches.split_first() else {
    return Ok(Vec::new());
  };
  let mut injections = Vec::with_capacity(block.branches.len() + 1);

  let tag = main.name().unwrap_or_default();
  let condition = builder.build(tag, main.expression_value().unwrap_or_default())?;
  let open = marker_span(block.position.start, main);
  tracing::debug!(tag, %condition, start = open.start, end = block.position.end, "plan block");
  injections.push(Injection::new(format!("{marker}\n{{#if {condition}}}"), open));

  for clause in clauses {
    // Operator clauses still go through the arity check; the emitted text is
    // always the fixed else marker.
    let clause_tag = clause.name().unwrap_or_default();
    builder.build(clause_tag, clause.expression_value().unwrap_or_default())?;
    let span = marker_span(clause.position.start, clause);
    injections.push(Injection::new(ELSE_SYNTAX.to_string(), span));
  }

  let last = clauses.last().unwrap_or(main);
  let close = Position::new(last.position.end, block.position.end);
  injections.push(Injection::new(CLOSE_SYNTAX.to_string(), close));

  Ok(injections)
}
