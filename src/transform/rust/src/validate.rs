/* src/transform/rust/src/validate.rs */

use crate::ast::{Node, NodeKind};
use crate::error::{Result, TransformError};
use crate::registry::{ELSE_TAG, TagRegistry};

/// Check every clause of a branching block: each must be a branch with a
/// registered tag, and each non-else clause must carry an expression.
pub fn validate(registry: &TagRegistry, block: &Node) -> Result<()> {
  for branch in &block.branches {
    let recognized = branch.name().is_some_and(|name| registry.is_recognized(name));
    if branch.kind != NodeKind::Branch || !recognized {
      tracing::debug!(kind = ?branch.kind, name = ?branch.name, "invalid branch type or tag");
      return Err(TransformError::Structure {
        kind: branch.kind,
        name: branch.name.clone(),
        position: branch.position,
      });
    }

    let tag = branch.name().unwrap_or_default();
    let has_expression = branch.expression_value().is_some_and(|v| !v.is_empty());
    if tag != ELSE_TAG && !has_expression {
      return Err(TransformError::MissingExpression {
        tag: tag.to_string(),
        position: branch.position,
      });
    }
  }
  Ok(())
}

fn is_blank(text: &str) -> bool {
  text.chars().all(char::is_whitespace)
}

/// Whether a branch holds anything besides comments and whitespace-only text.
/// Not used to gate validation; empty branches are legal.
pub fn branch_has_content(branch: &Node) -> bool {
  branch.children.iter().any(|child| match child.kind {
    NodeKind::Comment => false,
    NodeKind::Text => !child.value.as_deref().is_none_or(is_blank),
    _ => true,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::{Expression, Position};

  fn branch(name: &str, expression: Option<&str>) -> Node {
    let mut node = Node::named(NodeKind::Branch, name, Position::new(0, 0));
    node.expression = expression
      .map(|value| Expression { value: value.to_string(), position: Position::new(0, 0) });
    node
  }

  fn block(branches: Vec<Node>) -> Node {
    let mut node = Node::named(NodeKind::BranchingBlock, "eq", Position::new(0, 0));
    node.branches = branches;
    node
  }

  fn text(value: &str) -> Node {
    let mut node = Node::new(NodeKind::Text, Position::new(0, value.len()));
    node.value = Some(value.to_string());
    node
  }

  #[test]
  fn accepts_main_and_else() {
    let registry = TagRegistry::default();
    let node = block(vec![branch("eq", Some("a,b")), branch("else", None)]);
    assert!(validate(&registry, &node).is_ok());
  }

  #[test]
  fn rejects_unregistered_branch_tag() {
    let registry = TagRegistry::default();
    let node = block(vec![branch("eq", Some("a,b")), branch("then", Some("x"))]);
    let err = validate(&registry, &node).unwrap_err();
    assert!(matches!(
      err,
      TransformError::Structure { ref name, .. } if name.as_deref() == Some("then")
    ));
    assert_eq!(
      err.to_string(),
      "Invalid equality syntax. Statements may only contain {:else} branches."
    );
  }

  #[test]
  fn rejects_non_branch_node_kind() {
    let registry = TagRegistry::default();
    let node = block(vec![branch("eq", Some("a,b")), text("stray")]);
    let err = validate(&registry, &node).unwrap_err();
    assert!(matches!(err, TransformError::Structure { kind: NodeKind::Text, .. }));
  }

  #[test]
  fn rejects_missing_or_empty_expression() {
    let registry = TagRegistry::default();
    for expression in [None, Some("")] {
      let node = block(vec![branch("gt", expression)]);
      let err = validate(&registry, &node).unwrap_err();
      assert!(matches!(err, TransformError::MissingExpression { ref tag, .. } if tag == "gt"));
      assert_eq!(
        err.to_string(),
        "Invalid equality syntax. Statements must contain an expression."
      );
    }
  }

  #[test]
  fn else_needs_no_expression() {
    let registry = TagRegistry::default();
    let node = block(vec![branch("lt", Some("a,b")), branch("else", Some(""))]);
    assert!(validate(&registry, &node).is_ok());
  }

  #[test]
  fn operator_clause_after_main_is_structurally_allowed() {
    // Registered operator tags pass the structural check in any position
    let registry = TagRegistry::default();
    let node = block(vec![branch("eq", Some("a,b")), branch("neq", Some("c,d"))]);
    assert!(validate(&registry, &node).is_ok());
  }

  #[test]
  fn content_ignores_comments_and_whitespace() {
    let mut empty = branch("eq", Some("a,b"));
    empty.children = vec![text("  \n\t"), Node::new(NodeKind::Comment, Position::new(0, 0))];
    assert!(!branch_has_content(&empty));

    let mut full = branch("eq", Some("a,b"));
    full.children = vec![text("\n"), text("Yes")];
    assert!(branch_has_content(&full));

    let mut element = branch("eq", Some("a,b"));
    element.children = vec![Node::named(NodeKind::Element, "br", Position::new(0, 4))];
    assert!(branch_has_content(&element));
  }
}
