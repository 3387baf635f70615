/* src/transform/rust/src/preprocess.rs */

use serde::Deserialize;

use crate::error::Result;
use crate::options::TransformOptions;
use crate::transform::{Processed, transform};

/// What a build tool hands the markup hook for one file.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkupInput {
  pub content: String,
  pub filename: String,
}

/// Preprocessor exposing a single `markup` hook, invoked once per template.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
  options: TransformOptions,
}

pub fn preprocess(options: TransformOptions) -> Preprocessor {
  Preprocessor { options }
}

impl Preprocessor {
  pub fn options(&self) -> &TransformOptions {
    &self.options
  }

  pub fn markup(&self, input: &MarkupInput) -> Result<Processed> {
    transform(&input.content, &input.filename, &self.options)
  }
}
