/* src/transform/rust/src/sourcemap.rs */

use serde::{Deserialize, Serialize};

/// Contiguous run of generated output and the original bytes it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
  pub generated: usize,
  pub original: usize,
  /// Byte length in the generated output.
  pub len: usize,
  /// Replacement text: only its first byte maps back to `original`.
  pub edited: bool,
}

/// Zero-based line, column in UTF-16 code units (the Source Map v3 unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
  pub line: u32,
  pub col: u32,
}

pub(crate) struct LineIndex<'a> {
  text: &'a str,
  line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
  pub(crate) fn new(text: &'a str) -> Self {
    let mut line_starts = vec![0];
    line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
    Self { text, line_starts }
  }

  pub(crate) fn line_col(&self, offset: usize) -> LineCol {
    let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
    let start = self.line_starts[line];
    let col = self.text[start..offset].encode_utf16().count();
    LineCol { line: line as u32, col: col as u32 }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mapping {
  generated: LineCol,
  original: LineCol,
}

/// Maps positions in transformed output back to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMap {
  file: String,
  source_content: String,
  segments: Vec<Segment>,
  mappings: Vec<Mapping>,
}

/// Serialized Source Map revision 3 document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapV3 {
  pub version: u8,
  pub file: String,
  pub sources: Vec<String>,
  pub sources_content: Vec<String>,
  pub names: Vec<String>,
  pub mappings: String,
}

impl SourceMap {
  pub(crate) fn build(file: &str, source: &str, code: &str, segments: Vec<Segment>) -> Self {
    let original_index = LineIndex::new(source);
    let generated_index = LineIndex::new(code);
    let mut mappings = Vec::new();
    let mut push = |generated: usize, original: usize| {
      mappings.push(Mapping {
        generated: generated_index.line_col(generated),
        original: original_index.line_col(original),
      });
    };

    for seg in &segments {
      if seg.len == 0 {
        continue;
      }
      push(seg.generated, seg.original);
      if seg.edited {
        continue;
      }
      // Unedited text keeps a mapping at every line start it contains
      let text = &source[seg.original..seg.original + seg.len];
      for (i, _) in text.match_indices('\n') {
        if i + 1 < seg.len {
          push(seg.generated + i + 1, seg.original + i + 1);
        }
      }
    }

    Self { file: file.to_string(), source_content: source.to_string(), segments, mappings }
  }

  pub fn segments(&self) -> &[Segment] {
    &self.segments
  }

  /// Input byte offset that produced the output byte at `generated`. Bytes
  /// inside a replacement all map to the start of the span it replaced.
  pub fn original_offset(&self, generated: usize) -> Option<usize> {
    let idx = self.segments.partition_point(|seg| seg.generated + seg.len <= generated);
    let seg = self.segments.get(idx)?;
    if generated < seg.generated {
      return None;
    }
    if seg.edited { Some(seg.original) } else { Some(seg.original + (generated - seg.generated)) }
  }

  pub fn to_v3(&self) -> SourceMapV3 {
    SourceMapV3 {
      version: 3,
      file: self.file.clone(),
      sources: vec![self.file.clone()],
      sources_content: vec![self.source_content.clone()],
      names: Vec::new(),
      mappings: self.encode_mappings(),
    }
  }

  fn encode_mappings(&self) -> String {
    let mut out = String::new();
    let mut line = 0u32;
    let mut prev_col = 0i64;
    let mut prev_orig_line = 0i64;
    let mut prev_orig_col = 0i64;
    let mut first_in_line = true;

    for mapping in &self.mappings {
      while line < mapping.generated.line {
        out.push(';');
        line += 1;
        prev_col = 0;
        first_in_line = true;
      }
      if !first_in_line {
        out.push(',');
      }
      first_in_line = false;

      let col = i64::from(mapping.generated.col);
      let orig_line = i64::from(mapping.original.line);
      let orig_col = i64::from(mapping.original.col);
      encode_vlq(&mut out, col - prev_col);
      // Single source: index delta is always zero
      encode_vlq(&mut out, 0);
      encode_vlq(&mut out, orig_line - prev_orig_line);
      encode_vlq(&mut out, orig_col - prev_orig_col);
      prev_col = col;
      prev_orig_line = orig_line;
      prev_orig_col = orig_col;
    }
    out
  }
}

impl Serialize for SourceMap {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.to_v3().serialize(serializer)
  }
}

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn encode_vlq(out: &mut String, value: i64) {
  let mut rest = if value < 0 { ((-value) << 1) | 1 } else { value << 1 };
  loop {
    let mut digit = rest & 0b1_1111;
    rest >>= 5;
    if rest > 0 {
      digit |= 0b10_0000;
    }
    out.push(char::from(BASE64[digit as usize]));
    if rest == 0 {
      break;
    }
  }
}
