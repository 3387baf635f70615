/* src/transform/rust/src/tests/mod.rs */

use super::*;

mod mapping;

fn run(source: &str) -> Result<Processed> {
  transform(source, "Test.svelte", &TransformOptions::default())
}

fn code(source: &str) -> String {
  run(source).unwrap().code
}

#[test]
fn plain_markup_is_untouched() {
  let sources = [
    "",
    "hello",
    "<div class=\"a\">{name}</div>",
    "<script>let x = 1 < 2;</script>\n<p>{#if a}x{:else}y{/if}</p>",
    "{#each items as item}<li>{item}</li>{/each}",
    "<!-- comment --> {@html raw}",
  ];
  for source in sources {
    assert_eq!(code(source), source);
  }
}

#[test]
fn gte_block_becomes_native_if() {
  assert_eq!(
    code("{#gte count,10}Yes{/gte}"),
    "<!-- Injected by svelte-truth-helpers -->\n{#if count >= 10}Yes{/if}"
  );
}

#[test]
fn every_operator() {
  let cases = [
    ("{#unless x > 1}a{/unless}", "{#if !(x > 1)}a{/if}"),
    ("{#eq a,b}a{/eq}", "{#if a === b}a{/if}"),
    ("{#neq a,b}a{/neq}", "{#if a !== b}a{/if}"),
    ("{#gt a,b}a{/gt}", "{#if a > b}a{/if}"),
    ("{#gte a,b}a{/gte}", "{#if a >= b}a{/if}"),
    ("{#lt a,b}a{/lt}", "{#if a < b}a{/if}"),
    ("{#lte a,b}a{/lte}", "{#if a <= b}a{/if}"),
    ("{#and a,b,c}a{/and}", "{#if a && b && c}a{/if}"),
    ("{#or a,b}a{/or}", "{#if a || b}a{/if}"),
  ];
  for (source, expected) in cases {
    let out = code(source);
    assert_eq!(out, format!("{DEFAULT_MARKER}\n{expected}"), "source: {source}");
  }
}

#[test]
fn else_branch_and_surrounding_markup() {
  let source = concat!(
    "<p>before</p>\n",
    "{#eq user.role,'admin'}\n  <Admin />\n",
    "{:else}\n  <Guest />\n",
    "{/eq}\n",
    "<p>after</p>"
  );
  let expected = concat!(
    "<p>before</p>\n",
    "<!-- Injected by svelte-truth-helpers -->\n{#if user.role === 'admin'}\n  <Admin />\n",
    "{:else}\n  <Guest />\n",
    "{/if}\n",
    "<p>after</p>"
  );
  assert_eq!(code(source), expected);
}

#[test]
fn empty_branches() {
  assert_eq!(
    code("{#eq a,b}{:else}{/eq}"),
    format!("{DEFAULT_MARKER}\n{{#if a === b}}{{:else}}{{/if}}")
  );
}

#[test]
fn multiple_sibling_blocks() {
  let source = "{#lt a,b}x{/lt} and {#gt a,b}y{/gt}";
  assert_eq!(
    code(source),
    format!("{DEFAULT_MARKER}\n{{#if a < b}}x{{/if}} and {DEFAULT_MARKER}\n{{#if a > b}}y{{/if}}")
  );
}

#[test]
fn blocks_inside_elements_and_attributes_untouched() {
  let source = "<button disabled={a}>{#or a,b}<b>go</b>{/or}</button>";
  assert_eq!(
    code(source),
    format!("<button disabled={{a}}>{DEFAULT_MARKER}\n{{#if a || b}}<b>go</b>{{/if}}</button>")
  );
}

// -- Failures abort the whole transform --

#[test]
fn arity_violation_fails() {
  let err = run("ok {#eq a,b,c}x{/eq}").unwrap_err();
  assert_eq!(err, TransformError::Arity { operator: "eq".to_string(), found: 3 });
  assert_eq!(
    err.to_string(),
    "Invalid equality syntax. {#eq} statements must contain two values."
  );
}

#[test]
fn unregistered_clause_fails() {
  let err = run("{#eq a,b}x{:then v}y{/eq}").unwrap_err();
  assert!(matches!(
    err,
    TransformError::Structure { ref name, .. } if name.as_deref() == Some("then")
  ));
}

#[test]
fn missing_expression_fails() {
  let err = run("{#neq}x{/neq}").unwrap_err();
  assert!(matches!(err, TransformError::MissingExpression { ref tag, .. } if tag == "neq"));
  let err = run("{#neq   }x{/neq}").unwrap_err();
  assert!(matches!(err, TransformError::MissingExpression { .. }));
}

#[test]
fn one_bad_block_rejects_valid_ones() {
  // No partial output: the first valid block is not emitted either
  let result = run("{#eq a,b}x{/eq}{#or a,b,c}y{/or}");
  assert!(result.is_err());
}

#[test]
fn native_block_clauses_are_not_validated() {
  // {:then} is invalid for registered blocks but fine inside {#await}
  let source = "{#await p}wait{:then v}{v}{/await}";
  assert_eq!(code(source), source);
}

#[test]
fn malformed_block_structure_fails() {
  let err = run("{#eq a,b}never closed").unwrap_err();
  assert!(matches!(
    err,
    TransformError::Parse(ParseDiagnostic { kind: DiagnosticKind::UnclosedBlock, .. })
  ));
}

// -- Options --

#[test]
fn custom_marker_delimiter_and_alias() {
  let mut options = TransformOptions {
    marker: "<!-- generated -->".to_string(),
    delimiter: ';',
    ..TransformOptions::default()
  };
  options.aliases.insert("is".to_string(), Operator::Eq);
  let out = transform("{#is a;b}x{/is}{#eq c;d}y{/eq}", "A.svelte", &options).unwrap();
  assert_eq!(
    out.code,
    "<!-- generated -->\n{#if a === b}x{/if}<!-- generated -->\n{#if c === d}y{/if}"
  );
}

#[test]
fn alias_cannot_capture_native_blocks() {
  let mut options = TransformOptions::default();
  options.aliases.insert("each".to_string(), Operator::And);
  let source = "{#each items as item}<li>{item}</li>{/each}";
  let err = transform(source, "List.svelte", &options).unwrap_err();
  assert!(matches!(err, TransformError::Options { field: "aliases", .. }));
}

#[test]
fn whitespace_delimiter_is_rejected_before_parsing() {
  let options = TransformOptions { delimiter: ' ', ..TransformOptions::default() };
  let err = transform("{#eq a b}x{/eq}", "A.svelte", &options).unwrap_err();
  assert!(matches!(err, TransformError::Options { field: "delimiter", .. }));
  assert!(!err.is_syntax());
  assert_eq!(err.position(), None);
}

#[test]
fn preprocessor_markup_hook() {
  let hook = preprocess(TransformOptions::default());
  let input =
    MarkupInput { content: "{#gt n,0}pos{/gt}".to_string(), filename: "N.svelte".to_string() };
  assert_eq!(hook.options(), &TransformOptions::default());
  let out = hook.markup(&input).unwrap();
  assert_eq!(out.code, format!("{DEFAULT_MARKER}\n{{#if n > 0}}pos{{/if}}"));
  assert_eq!(out.map.to_v3().file, "N.svelte");
}

#[test]
fn markup_input_deserializes() {
  let input: MarkupInput =
    serde_json::from_str(r#"{"content": "<p/>", "filename": "P.svelte"}"#).unwrap();
  assert_eq!(input.content, "<p/>");
  assert_eq!(input.filename, "P.svelte");
}

#[test]
fn text_outside_spans_is_preserved() {
  let source = "α{#eq a,b}β{:else}γ{/eq}δ";
  let tree = parse(source).unwrap();
  let injections = collect_injections(&tree, &TransformOptions::default()).unwrap();
  let out = code(source);

  // Rebuild expected output by walking the gaps between spans
  let mut expected = String::new();
  let mut cursor = 0;
  for injection in &injections {
    expected.push_str(&source[cursor..injection.start]);
    expected.push_str(&injection.value);
    cursor = injection.end;
  }
  expected.push_str(&source[cursor..]);
  assert_eq!(out, expected);
  for ch in ['α', 'β', 'γ', 'δ'] {
    assert_eq!(out.matches(ch).count(), 1);
  }
}
