/* src/cli/core/src/config/types.rs */

use anyhow::Result;
use serde::Deserialize;
use truth_helpers::TransformOptions;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TruthConfig {
  #[serde(default)]
  pub transform: TransformOptions,
}

impl TruthConfig {
  pub fn validate(&self) -> Result<()> {
    self.transform.validate()?;
    Ok(())
  }
}
