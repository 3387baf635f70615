/* src/cli/core/src/check.rs */

// `truth check` command: parses and validates templates without writing output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use truth_helpers::{Node, TagRegistry, TransformError, Visit, collect_injections, parse, walk};

use crate::config::TruthConfig;
use crate::ui;

/// Counts branching blocks that this preprocessor rewrites.
struct BlockCounter<'a> {
  registry: &'a TagRegistry,
  count: usize,
}

impl Visit for BlockCounter<'_> {
  type Error = TransformError;

  fn branching_block(&mut self, node: &Node) -> Result<(), TransformError> {
    if node.name().is_some_and(|tag| self.registry.operator(tag).is_some()) {
      self.count += 1;
    }
    Ok(())
  }
}

/// Number of registered blocks in `source`, or the first error it contains.
pub(crate) fn check_source(config: &TruthConfig, source: &str) -> Result<usize, TransformError> {
  let tree = parse(source)?;
  // Planning runs validation and the condition builder for every block
  collect_injections(&tree, &config.transform)?;

  let registry = config.transform.registry();
  let mut counter = BlockCounter { registry: &registry, count: 0 };
  walk(&tree, &mut counter)?;
  Ok(counter.count)
}

fn check_file(config: &TruthConfig, path: &Path) -> Result<bool> {
  let source =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  match check_source(config, &source) {
    Ok(count) => {
      let noun = if count == 1 { "block" } else { "blocks" };
      ui::ok(&format!("{} ({count} {noun})", path.display()));
      Ok(true)
    }
    Err(e) => {
      let location = e
        .position()
        .map(|p| {
          let (line, col) = ui::line_col(&source, p.start);
          format!(":{line}:{col}")
        })
        .unwrap_or_default();
      ui::fail(&format!("{}{location}", path.display()));
      ui::detail(&e.to_string());
      tracing::debug!(error = ?e, "check failed");
      Ok(false)
    }
  }
}

/// Check every file, reporting each one; bail at the end if any failed.
pub fn run_check(config: &TruthConfig, files: &[PathBuf]) -> Result<()> {
  ui::arrow(&format!("checking {} file(s)", files.len()));
  let mut failed = 0;
  for path in files {
    if !check_file(config, path)? {
      failed += 1;
    }
  }
  ui::summary(files.len() - failed, failed);
  if failed > 0 {
    bail!("{failed} file(s) failed the check");
  }
  Ok(())
}
