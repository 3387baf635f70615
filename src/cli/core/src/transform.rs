/* src/cli/core/src/transform.rs */

// `truth transform` command: rewrites one template, optionally with a source map.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use truth_helpers::{MarkupInput, Processed, preprocess};

use crate::config::TruthConfig;
use crate::ui::{self, DIM, RESET};

/// Read `input`, transform it and write the result to `out` (stdout when absent).
pub fn run_transform(
  config: &TruthConfig,
  input: &Path,
  out: Option<&Path>,
  with_map: bool,
) -> Result<()> {
  let processed = transform_file(config, input)?;

  let Some(out) = out else {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(processed.code.as_bytes()).context("failed to write to stdout")?;
    return Ok(());
  };

  write_file(out, &processed.code)?;
  ui::ok(&format!("{} {DIM}\u{2192}{RESET} {}", input.display(), out.display()));

  if with_map {
    let map_path = map_path(out);
    let json = serde_json::to_string(&processed.map).context("failed to serialize source map")?;
    write_file(&map_path, &json)?;
    ui::detail(&format!("{DIM}{}{RESET}", map_path.display()));
  }
  Ok(())
}

pub(crate) fn transform_file(config: &TruthConfig, input: &Path) -> Result<Processed> {
  let content = std::fs::read_to_string(input)
    .with_context(|| format!("failed to read {}", input.display()))?;
  let filename = input.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string();

  let hook = preprocess(config.transform.clone());
  let source = content.clone();
  hook.markup(&MarkupInput { content, filename }).map_err(|e| {
    let location = e.position().map(|p| {
      let (line, col) = ui::line_col(&source, p.start);
      format!(":{line}:{col}")
    });
    anyhow::anyhow!("{}{}: {e}", input.display(), location.unwrap_or_default())
  })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// `out/App.svelte` -> `out/App.svelte.map`
fn map_path(out: &Path) -> PathBuf {
  let mut name = out.as_os_str().to_owned();
  name.push(".map");
  PathBuf::from(name)
}
