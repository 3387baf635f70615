/* src/transform/rust/src/transform.rs */

use serde::Serialize;

use crate::ast::Node;
use crate::condition::ConditionBuilder;
use crate::error::{Result, TransformError};
use crate::injection::{Injection, plan};
use crate::options::TransformOptions;
use crate::parser::parse;
use crate::patch::SpanPatcher;
use crate::registry::TagRegistry;
use crate::sourcemap::SourceMap;
use crate::validate::validate;
use crate::walk::{Visit, walk};

/// Transformed markup and the map back to its input.
#[derive(Debug, Clone, Serialize)]
pub struct Processed {
  pub code: String,
  pub map: SourceMap,
}

struct BlockCollector<'a> {
  registry: &'a TagRegistry,
  builder: ConditionBuilder<'a>,
  marker: &'a str,
  injections: Vec<Injection>,
}

impl Visit for BlockCollector<'_> {
  type Error = TransformError;

  fn branching_block(&mut self, node: &Node) -> Result<()> {
    // Native blocks ({#if}, {#each}, ...) are left alone
    if node.name().and_then(|tag| self.registry.operator(tag)).is_none() {
      return Ok(());
    }
    validate(self.registry, node)?;
    self.injections.extend(plan(node, &self.builder, self.marker)?);
    Ok(())
  }
}

/// Every injection planned for `tree`, sorted by start offset. Ties keep
/// planning order.
pub fn collect_injections(tree: &Node, options: &TransformOptions) -> Result<Vec<Injection>> {
  let registry = options.registry();
  let mut collector = BlockCollector {
    registry: &registry,
    builder: ConditionBuilder::new(&registry, options.delimiter),
    marker: &options.marker,
    injections: Vec::new(),
  };
  walk(tree, &mut collector)?;

  let mut injections = collector.injections;
  injections.sort_by_key(|injection| injection.start);
  Ok(injections)
}

/// Rewrite every registered branching block of `source` into native
/// `{#if}` / `{:else}` / `{/if}` syntax. Nothing is spliced unless the options
/// and every block are valid.
pub fn transform(source: &str, filename: &str, options: &TransformOptions) -> Result<Processed> {
  options.validate()?;
  let tree = parse(source)?;
  let injections = collect_injections(&tree, options)?;
  tracing::debug!(filename, count = injections.len(), "collected injections");

  let mut patcher = SpanPatcher::new(source);
  for Injection { value, start, end } in injections.into_iter().rev() {
    patcher.overwrite(start, end, value)?;
  }
  let (code, map) = patcher.finish(filename);
  Ok(Processed { code, map })
}
