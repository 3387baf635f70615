/* src/transform/rust/src/walk.rs */

use crate::ast::{Node, NodeKind};

/// Per-kind callbacks invoked by [`walk`]. Every method defaults to a no-op,
/// so a visitor only overrides the kinds it cares about.
pub trait Visit {
  type Error;

  fn root(&mut self, _node: &Node) -> Result<(), Self::Error> {
    Ok(())
  }
  fn element(&mut self, _node: &Node) -> Result<(), Self::Error> {
    Ok(())
  }
  fn text(&mut self, _node: &Node) -> Result<(), Self::Error> {
    Ok(())
  }
  fn comment(&mut self, _node: &Node) -> Result<(), Self::Error> {
    Ok(())
  }
  fn expression(&mut self, _node: &Node) -> Result<(), Self::Error> {
    Ok(())
  }
  fn void_block(&mut self, _node: &Node) -> Result<(), Self::Error> {
    Ok(())
  }
  fn branching_block(&mut self, _node: &Node) -> Result<(), Self::Error> {
    Ok(())
  }
  fn branch(&mut self, _node: &Node) -> Result<(), Self::Error> {
    Ok(())
  }
}

/// Post-order traversal: a node's `children` (or, when it has none, its
/// `branches`) are walked before the node itself is dispatched.
pub fn walk<'n, V: Visit>(node: &'n Node, visitor: &mut V) -> Result<&'n Node, V::Error> {
  let nested = if node.children.is_empty() { &node.branches } else { &node.children };
  for child in nested {
    walk(child, visitor)?;
  }

  match node.kind {
    NodeKind::Root => visitor.root(node)?,
    NodeKind::Element => visitor.element(node)?,
    NodeKind::Text => visitor.text(node)?,
    NodeKind::Comment => visitor.comment(node)?,
    NodeKind::Expression => visitor.expression(node)?,
    NodeKind::VoidBlock => visitor.void_block(node)?,
    NodeKind::BranchingBlock => visitor.branching_block(node)?,
    NodeKind::Branch => visitor.branch(node)?,
  }
  Ok(node)
}
