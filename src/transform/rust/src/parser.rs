/* src/transform/rust/src/parser.rs */

use std::fmt;

use crate::ast::{Expression, Node, NodeKind, Position};
use crate::error::{Result, TransformError};

/// Diagnostic emitted when markup is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
  pub kind: DiagnosticKind,
  pub directive: String,
  pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
  /// Clause or close marker (`{:else}`, `{/eq}`) outside any block
  UnmatchedBlockClose,
  /// Block-open marker that reached EOF or an enclosing element close
  UnclosedBlock,
  /// `{/tag}` naming a different tag than the block it closes
  MismatchedBlockClose,
  /// `{` without a balancing `}`
  UnclosedExpression,
  /// `<!--` without `-->`
  UnclosedComment,
  /// `<tag ...` whose start tag never reaches its `>`
  UnclosedStartTag,
  /// `</tag>` with no open element of that name
  UnmatchedElementClose,
  /// Element that was never closed, or closed implicitly by an outer construct
  UnclosedElement,
}

impl DiagnosticKind {
  /// Fatal diagnostics make the block structure ambiguous, so no rewrite is
  /// attempted. Element nesting problems do not affect block offsets.
  pub fn is_fatal(self) -> bool {
    !matches!(self, DiagnosticKind::UnmatchedElementClose | DiagnosticKind::UnclosedElement)
  }
}

impl fmt::Display for ParseDiagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let what = match self.kind {
      DiagnosticKind::UnmatchedBlockClose => "unmatched block marker",
      DiagnosticKind::UnclosedBlock => "unclosed block",
      DiagnosticKind::MismatchedBlockClose => "mismatched block close",
      DiagnosticKind::UnclosedExpression => "unclosed expression",
      DiagnosticKind::UnclosedComment => "unclosed comment",
      DiagnosticKind::UnclosedStartTag => "unclosed start tag",
      DiagnosticKind::UnmatchedElementClose => "unmatched closing tag",
      DiagnosticKind::UnclosedElement => "unclosed element",
    };
    write!(f, "{what} `{}` at {}..{}", self.directive, self.position.start, self.position.end)
  }
}

/// Parse markup into a positioned tree, failing on the first fatal
/// diagnostic. Non-fatal diagnostics are logged and dropped.
pub fn parse(source: &str) -> Result<Node> {
  let mut diagnostics = Vec::new();
  let root = parse_with_diagnostics(source, &mut diagnostics);
  let mut fatal = None;
  for diag in diagnostics {
    if diag.kind.is_fatal() {
      fatal.get_or_insert(diag);
    } else {
      tracing::warn!(%diag, "markup diagnostic");
    }
  }
  match fatal {
    Some(diag) => Err(TransformError::Parse(diag)),
    None => Ok(root),
  }
}

/// Best-effort parse: always yields a tree, collecting every diagnostic.
pub fn parse_with_diagnostics(source: &str, diagnostics: &mut Vec<ParseDiagnostic>) -> Node {
  let mut parser =
    Parser { src: source, pos: 0, elements: Vec::new(), block_depth: 0, diagnostics };
  let children = parser.parse_nodes();
  let mut root = Node::new(NodeKind::Root, Position::new(0, source.len()));
  root.children = children;
  root
}

const VOID_ELEMENTS: &[&str] = &[
  "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
  "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

fn is_name_byte(b: u8) -> bool {
  b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// `{#tag expr}` / `{:tag expr}` / `{/tag}` / `{@tag expr}` after the sigil.
struct Marker {
  name: String,
  expression: Option<Expression>,
}

struct Parser<'s, 'd> {
  src: &'s str,
  pos: usize,
  elements: Vec<String>,
  block_depth: usize,
  diagnostics: &'d mut Vec<ParseDiagnostic>,
}

impl<'s> Parser<'s, '_> {
  fn bytes(&self) -> &'s [u8] {
    self.src.as_bytes()
  }

  fn rest(&self) -> &'s str {
    &self.src[self.pos..]
  }

  fn diagnose(&mut self, kind: DiagnosticKind, directive: impl Into<String>, span: Position) {
    self.diagnostics.push(ParseDiagnostic { kind, directive: directive.into(), position: span });
  }

  fn parse_nodes(&mut self) -> Vec<Node> {
    let mut nodes = Vec::new();

    while self.pos < self.src.len() {
      let rest = self.rest();
      if rest.starts_with("<!--") {
        nodes.push(self.parse_comment());
      } else if rest.starts_with("</") {
        let (name, end) = self.peek_closing_tag();
        if self.elements.contains(&name) {
          // Current element or an ancestor: the owner consumes it
          return nodes;
        }
        let span = Position::new(self.pos, end);
        self.diagnose(DiagnosticKind::UnmatchedElementClose, format!("</{name}>"), span);
        self.pos = end;
      } else if rest.starts_with('<') && rest.as_bytes().get(1).is_some_and(u8::is_ascii_alphabetic)
      {
        nodes.push(self.parse_element());
      } else if rest.starts_with("{#") {
        nodes.push(self.parse_block());
      } else if rest.starts_with("{:") || rest.starts_with("{/") {
        if self.block_depth > 0 {
          return nodes;
        }
        let start = self.pos;
        let marker = self.parse_marker(2);
        let sigil = &self.src[start + 1..start + 2];
        let span = Position::new(start, self.pos);
        self.diagnose(
          DiagnosticKind::UnmatchedBlockClose,
          format!("{{{sigil}{}}}", marker.name),
          span,
        );
      } else if rest.starts_with('{') {
        nodes.push(self.parse_mustache());
      } else {
        nodes.push(self.parse_text());
      }
    }

    nodes
  }

  fn at_construct(&self) -> bool {
    let bytes = self.bytes();
    match bytes[self.pos] {
      b'{' => true,
      b'<' => {
        self.rest().starts_with("<!--")
          || bytes.get(self.pos + 1).is_some_and(|b| b.is_ascii_alphabetic() || *b == b'/')
      }
      _ => false,
    }
  }

  fn parse_text(&mut self) -> Node {
    let start = self.pos;
    self.pos += 1;
    // Stops only on ASCII bytes, so the slice end is always a char boundary
    while self.pos < self.src.len() && !self.at_construct() {
      self.pos += 1;
    }
    let mut node = Node::new(NodeKind::Text, Position::new(start, self.pos));
    node.value = Some(self.src[start..self.pos].to_string());
    node
  }

  fn parse_comment(&mut self) -> Node {
    let start = self.pos;
    let body_start = start + 4;
    let (body_end, end) = match self.src[body_start..].find("-->") {
      Some(rel) => (body_start + rel, body_start + rel + 3),
      None => {
        let span = Position::new(start, self.src.len());
        self.diagnose(DiagnosticKind::UnclosedComment, "<!--", span);
        (self.src.len(), self.src.len())
      }
    };
    self.pos = end;
    let mut node = Node::new(NodeKind::Comment, Position::new(start, end));
    node.value = Some(self.src[body_start..body_end].to_string());
    node
  }

  /// Skip a quoted string starting at `i`; returns the index after the closing quote.
  fn skip_string(&self, i: usize) -> usize {
    let bytes = self.bytes();
    let quote = bytes[i];
    let mut j = i + 1;
    while j < bytes.len() {
      match bytes[j] {
        b'\\' => j += 2,
        b if b == quote => return j + 1,
        _ => j += 1,
      }
    }
    bytes.len()
  }

  /// Index just past the `}` balancing the `{` at `open`.
  fn scan_mustache_end(&self, open: usize) -> Option<usize> {
    let bytes = self.bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
      match bytes[i] {
        b'{' => {
          depth += 1;
          i += 1;
        }
        b'}' => {
          depth -= 1;
          i += 1;
          if depth == 0 {
            return Some(i);
          }
        }
        b'"' | b'\'' | b'`' => i = self.skip_string(i),
        _ => i += 1,
      }
    }
    None
  }

  /// Index just past the `>` ending a start tag whose attributes begin at `from`.
  /// Quotes open a string only as an attribute value, right after `=`.
  fn scan_tag_end(&self, from: usize) -> Option<usize> {
    let bytes = self.bytes();
    let mut i = from;
    let mut after_eq = false;
    while i < bytes.len() {
      match bytes[i] {
        b'>' => return Some(i + 1),
        b'"' | b'\'' if after_eq => {
          i = self.skip_string(i);
          after_eq = false;
        }
        b'{' => {
          i = self.scan_mustache_end(i)?;
          after_eq = false;
        }
        b'=' => {
          after_eq = true;
          i += 1;
        }
        b if b.is_ascii_whitespace() => i += 1,
        _ => {
          after_eq = false;
          i += 1;
        }
      }
    }
    None
  }

  fn read_name(&self, from: usize) -> usize {
    let bytes = self.bytes();
    let mut i = from;
    while i < bytes.len() && is_name_byte(bytes[i]) {
      i += 1;
    }
    i
  }

  /// Name of the `</name>` at the cursor and the index after its `>`.
  fn peek_closing_tag(&self) -> (String, usize) {
    let name_end = self.read_name(self.pos + 2);
    let name = self.src[self.pos + 2..name_end].to_string();
    let end = self.src[name_end..].find('>').map_or(self.src.len(), |rel| name_end + rel + 1);
    (name, end)
  }

  fn parse_element(&mut self) -> Node {
    let start = self.pos;
    let name_end = self.read_name(start + 1);
    let name = self.src[start + 1..name_end].to_string();

    let Some(open_end) = self.scan_tag_end(name_end) else {
      let span = Position::new(start, self.src.len());
      self.diagnose(DiagnosticKind::UnclosedStartTag, format!("<{name}>"), span);
      self.pos = self.src.len();
      return Node::named(NodeKind::Element, name, span);
    };
    self.pos = open_end;

    let self_closing = self.bytes()[open_end - 2] == b'/';
    if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
      return Node::named(NodeKind::Element, name, Position::new(start, open_end));
    }

    let mut node = Node::named(NodeKind::Element, name.clone(), Position::new(start, start));
    if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
      let close = format!("</{name}");
      let body_end = self.src[open_end..].find(&close).map_or(self.src.len(), |rel| open_end + rel);
      if body_end > open_end {
        let mut text = Node::new(NodeKind::Text, Position::new(open_end, body_end));
        text.value = Some(self.src[open_end..body_end].to_string());
        node.children.push(text);
      }
      self.pos = body_end;
    } else {
      self.elements.push(name.clone());
      node.children = self.parse_nodes();
      self.elements.pop();
    }

    if self.rest().starts_with("</") && self.peek_closing_tag().0 == name {
      self.pos = self.peek_closing_tag().1;
    } else {
      let span = Position::new(start, self.pos);
      self.diagnose(DiagnosticKind::UnclosedElement, format!("<{name}>"), span);
    }
    node.position = Position::new(start, self.pos);
    node
  }

  /// Parse `{` + sigil + `name expression}` at the cursor, `sigil_len` being
  /// the length of `{#` etc. Leaves the cursor after the closing brace.
  fn parse_marker(&mut self, sigil_len: usize) -> Marker {
    let start = self.pos;
    let (inner_end, end) = match self.scan_mustache_end(start) {
      Some(end) => (end - 1, end),
      None => {
        let span = Position::new(start, self.src.len());
        let directive = self.src[start..].chars().take(16).collect::<String>();
        self.diagnose(DiagnosticKind::UnclosedExpression, directive, span);
        (self.src.len(), self.src.len())
      }
    };
    self.pos = end;

    let bytes = self.bytes();
    let name_start = (start + sigil_len).min(inner_end);
    let mut name_end = name_start;
    while name_end < inner_end && !bytes[name_end].is_ascii_whitespace() {
      name_end += 1;
    }
    let name = self.src[name_start..name_end].to_string();
    Marker { name, expression: self.expression_between(name_end, inner_end) }
  }

  /// Trimmed expression source in `from..to`, `None` when blank.
  fn expression_between(&self, from: usize, to: usize) -> Option<Expression> {
    let raw = &self.src[from..to];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return None;
    }
    let lead = raw.len() - raw.trim_start().len();
    let start = from + lead;
    Some(Expression {
      value: trimmed.to_string(),
      position: Position::new(start, start + trimmed.len()),
    })
  }

  fn parse_mustache(&mut self) -> Node {
    let start = self.pos;
    if self.rest().starts_with("{@") {
      let marker = self.parse_marker(2);
      let mut node = Node::named(NodeKind::VoidBlock, marker.name, Position::new(start, self.pos));
      node.expression = marker.expression;
      return node;
    }

    let inner_end = match self.scan_mustache_end(start) {
      Some(end) => {
        self.pos = end;
        end - 1
      }
      None => {
        let span = Position::new(start, self.src.len());
        let directive = self.src[start..].chars().take(16).collect::<String>();
        self.diagnose(DiagnosticKind::UnclosedExpression, directive, span);
        self.pos = self.src.len();
        self.src.len()
      }
    };
    let mut node = Node::new(NodeKind::Expression, Position::new(start, self.pos));
    node.expression = self.expression_between(start + 1, inner_end);
    node
  }

  fn parse_block(&mut self) -> Node {
    let start = self.pos;
    let head = self.parse_marker(2);
    let tag = head.name;

    let mut block = Node::named(NodeKind::BranchingBlock, tag.clone(), Position::new(start, start));
    let mut branch = Node::named(NodeKind::Branch, tag.clone(), Position::new(start, start));
    branch.expression = head.expression;

    self.block_depth += 1;
    loop {
      branch.children = self.parse_nodes();
      branch.position.end = self.pos;

      if self.rest().starts_with("{:") {
        block.branches.push(branch);
        let clause_start = self.pos;
        let clause = self.parse_marker(2);
        let span = Position::new(clause_start, clause_start);
        branch = Node::named(NodeKind::Branch, clause.name, span);
        branch.expression = clause.expression;
        continue;
      }

      block.branches.push(branch);
      if self.rest().starts_with("{/") {
        let close_start = self.pos;
        let close = self.parse_marker(2);
        if close.name != tag {
          let span = Position::new(close_start, self.pos);
          self.diagnose(DiagnosticKind::MismatchedBlockClose, format!("{{/{}}}", close.name), span);
        }
      } else {
        let span = Position::new(start, self.pos);
        self.diagnose(DiagnosticKind::UnclosedBlock, format!("{{#{tag}}}"), span);
      }
      break;
    }
    self.block_depth -= 1;

    block.position = Position::new(start, self.pos);
    block
  }
}
