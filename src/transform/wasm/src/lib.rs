/* src/transform/wasm/src/lib.rs */

use truth_helpers::{MarkupInput, TransformOptions, preprocess};
use wasm_bindgen::prelude::*;

fn run(content: String, filename: String, options: TransformOptions) -> Result<String, JsError> {
  let processed = preprocess(options)
    .markup(&MarkupInput { content, filename })
    .map_err(|e| JsError::new(&e.to_string()))?;
  serde_json::to_string(&processed).map_err(|e| JsError::new(&e.to_string()))
}

/// Markup hook: returns `{"code": ..., "map": {...}}` as JSON.
#[wasm_bindgen]
pub fn markup(content: String, filename: String) -> Result<String, JsError> {
  run(content, filename, TransformOptions::default())
}

/// Like `markup`, with options given as JSON (`marker`, `delimiter`, `aliases`).
#[wasm_bindgen(js_name = markupWithOptions)]
pub fn markup_with_options(
  content: String,
  filename: String,
  options_json: &str,
) -> Result<String, JsError> {
  let options: TransformOptions =
    serde_json::from_str(options_json).map_err(|e| JsError::new(&e.to_string()))?;
  options.validate().map_err(|e| JsError::new(&e.to_string()))?;
  run(content, filename, options)
}
