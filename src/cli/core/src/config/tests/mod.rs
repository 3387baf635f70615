/* src/cli/core/src/config/tests/mod.rs */

use super::*;


fn parse_config(toml_str: &str) -> TruthConfig {
  toml::from_str(toml_str).unwrap()
}
