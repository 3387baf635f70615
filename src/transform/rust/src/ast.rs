/* src/transform/rust/src/ast.rs */

/// Half-open byte range into the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
  pub start: usize,
  pub end: usize,
}

impl Position {
  pub fn new(start: usize, end: usize) -> Self {
    debug_assert!(start <= end, "position start {start} past end {end}");
    Self { start, end }
  }

  pub fn contains(&self, other: &Position) -> bool {
    self.start <= other.start && other.end <= self.end
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
  Root,
  Element,
  Text,
  Comment,
  /// `{expr}`
  Expression,
  /// `{@tag expr}`
  VoidBlock,
  /// `{#tag expr}...{/tag}`
  BranchingBlock,
  /// One clause of a branching block: the `{#tag}` head or a `{:tag}` clause.
  Branch,
}

/// Raw expression source attached to a block or branch marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
  pub value: String,
  pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
  pub kind: NodeKind,
  pub name: Option<String>,
  pub value: Option<String>,
  pub expression: Option<Expression>,
  pub children: Vec<Node>,
  pub branches: Vec<Node>,
  pub position: Position,
}

impl Node {
  pub(crate) fn new(kind: NodeKind, position: Position) -> Self {
    Self {
      kind,
      name: None,
      value: None,
      expression: None,
      children: Vec::new(),
      branches: Vec::new(),
      position,
    }
  }

  pub(crate) fn named(kind: NodeKind, name: impl Into<String>, position: Position) -> Self {
    Self { name: Some(name.into()), ..Self::new(kind, position) }
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  /// Expression source, if the node carries one.
  pub fn expression_value(&self) -> Option<&str> {
    self.expression.as_ref().map(|e| e.value.as_str())
  }

  pub fn first_child(&self) -> Option<&Node> {
    self.children.first()
  }
}
