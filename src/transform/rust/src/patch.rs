/* src/transform/rust/src/patch.rs */

use crate::error::{Result, TransformError};
use crate::sourcemap::{Segment, SourceMap};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
  start: usize,
  end: usize,
  value: String,
}

/// Span-patchable buffer over an immutable source.
///
/// Offsets always refer to the original source, regardless of which edits
/// were recorded before. Edits are kept as a sorted, non-overlapping interval
/// list and folded right-to-left into the output on [`SpanPatcher::finish`].
pub struct SpanPatcher<'s> {
  source: &'s str,
  edits: Vec<Edit>,
}

impl<'s> SpanPatcher<'s> {
  pub fn new(source: &'s str) -> Self {
    Self { source, edits: Vec::new() }
  }

  /// Replace the original bytes `start..end` with `value`.
  pub fn overwrite(&mut self, start: usize, end: usize, value: impl Into<String>) -> Result<()> {
    let reject = |reason| Err(TransformError::Patch { start, end, reason });
    if start > end {
      return reject("start is past end");
    }
    if end > self.source.len() {
      return reject("span is out of range");
    }
    if !self.source.is_char_boundary(start) || !self.source.is_char_boundary(end) {
      return reject("span splits a character");
    }

    let idx = self.edits.partition_point(|edit| edit.start < start);
    let overlaps_prev = idx > 0 && self.edits[idx - 1].end > start;
    let overlaps_next = self.edits.get(idx).is_some_and(|edit| edit.start < end);
    if overlaps_prev || overlaps_next {
      return reject("span overlaps an earlier overwrite");
    }

    tracing::trace!(start, end, "overwrite");
    self.edits.insert(idx, Edit { start, end, value: value.into() });
    Ok(())
  }

  pub fn is_empty(&self) -> bool {
    self.edits.is_empty()
  }

  fn render(&self) -> String {
    let mut out = self.source.to_string();
    // Highest offset first so earlier ranges stay valid
    for edit in self.edits.iter().rev() {
      out.replace_range(edit.start..edit.end, &edit.value);
    }
    out
  }

  fn segments(&self) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(self.edits.len() * 2 + 1);
    let mut original = 0;
    let mut generated = 0;
    for edit in &self.edits {
      if edit.start > original {
        let len = edit.start - original;
        segments.push(Segment { generated, original, len, edited: false });
        generated += len;
      }
      if !edit.value.is_empty() {
        let len = edit.value.len();
        segments.push(Segment { generated, original: edit.start, len, edited: true });
        generated += len;
      }
      original = edit.end;
    }
    if original < self.source.len() {
      let len = self.source.len() - original;
      segments.push(Segment { generated, original, len, edited: false });
    }
    segments
  }

  /// Serialize the patched text and its source map.
  pub fn finish(self, filename: &str) -> (String, SourceMap) {
    let code = self.render();
    let map = SourceMap::build(filename, self.source, &code, self.segments());
    (code, map)
  }
}
