/* src/transform/rust/src/tests/mapping.rs */

use super::*;

const SOURCE: &str = "{#gte count,10}Yes{/gte}\n<p>after</p>";

#[test]
fn unedited_bytes_map_back() {
  let out = run(SOURCE).unwrap();
  let yes = out.code.find("Yes").unwrap();
  assert_eq!(out.map.original_offset(yes), Some(15));
  assert_eq!(out.map.original_offset(yes + 2), Some(17));

  let after = out.code.find("<p>").unwrap();
  assert_eq!(out.map.original_offset(after), SOURCE.find("<p>"));
}

#[test]
fn replacement_bytes_map_to_replaced_span() {
  let out = run(SOURCE).unwrap();
  let open = out.code.find("{#if").unwrap();
  assert_eq!(out.map.original_offset(0), Some(0));
  assert_eq!(out.map.original_offset(open), Some(0));
  let close = out.code.find("{/if}").unwrap();
  assert_eq!(out.map.original_offset(close + 1), Some(18));
}

#[test]
fn segments_alternate_between_edits_and_source() {
  let out = run(SOURCE).unwrap();
  let segments = out.map.segments();
  let edited: Vec<_> = segments.iter().filter(|s| s.edited).map(|s| s.original).collect();
  assert_eq!(edited, vec![0, 18]);
  // Unedited runs copy source bytes verbatim
  for seg in segments.iter().filter(|s| !s.edited) {
    assert_eq!(
      &out.code[seg.generated..seg.generated + seg.len],
      &SOURCE[seg.original..seg.original + seg.len]
    );
  }
  let last = segments.last().unwrap();
  assert_eq!(last.generated + last.len, out.code.len());
}

#[test]
fn v3_mappings() {
  let out = run(SOURCE).unwrap();
  let v3 = out.map.to_v3();
  assert_eq!(v3.version, 3);
  assert_eq!(v3.file, "Test.svelte");
  assert_eq!(v3.sources, vec!["Test.svelte"]);
  assert_eq!(v3.sources_content, vec![SOURCE]);
  assert!(v3.names.is_empty());
  // One group per generated line; the marker adds a line
  assert_eq!(v3.mappings.matches(';').count(), out.code.lines().count() - 1);
  assert_eq!(v3.mappings, "AAAA;iBAAe,GAAG,KAAM;AACxB");
}

#[test]
fn processed_serializes_map_as_json_object() {
  let out = run("{#or a,b}x{/or}").unwrap();
  let json = serde_json::to_value(&out).unwrap();
  assert_eq!(json["code"], out.code.as_str());
  assert_eq!(json["map"]["version"], 3);
  let v3: SourceMapV3 = serde_json::from_value(json["map"].clone()).unwrap();
  assert_eq!(v3, out.map.to_v3());
}

#[test]
fn identity_map_for_untouched_input() {
  let source = "<p>\n  hi\n</p>";
  let out = run(source).unwrap();
  for offset in 0..source.len() {
    assert_eq!(out.map.original_offset(offset), Some(offset));
  }
  assert_eq!(out.map.to_v3().mappings, "AAAA;AACA;AACA");
}
