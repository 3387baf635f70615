/* src/transform/rust/src/condition.rs */

use crate::error::{Result, TransformError};
use crate::registry::TagRegistry;

pub const DEFAULT_DELIMITER: char = ',';

/// Synthesizes a native boolean expression from a block tag and its raw
/// operand list.
pub struct ConditionBuilder<'a> {
  registry: &'a TagRegistry,
  delimiter: char,
}

impl<'a> ConditionBuilder<'a> {
  pub fn new(registry: &'a TagRegistry, delimiter: char) -> Self {
    Self { registry, delimiter }
  }

  /// Tags without an operator (`else`, unknown names) pass the expression
  /// through unchanged. Operands are counted, never trimmed or parsed.
  pub fn build(&self, tag: &str, expression: &str) -> Result<String> {
    let Some(operator) = self.registry.operator(tag) else {
      return Ok(expression.to_string());
    };
    let Some(joiner) = operator.joiner() else {
      return Ok(format!("!({expression})"));
    };

    let operands: Vec<&str> = expression.split(self.delimiter).collect();
    if let Some(max) = operator.max_operands() {
      if operands.len() > max {
        // Report the tag as written so aliases show up in the message
        return Err(TransformError::Arity { operator: tag.to_string(), found: operands.len() });
      }
    }
    Ok(operands.join(joiner))
  }
}

/// Shorthand over the default registry and delimiter.
pub fn build_condition(tag: &str, expression: &str) -> Result<String> {
  let registry = TagRegistry::default();
  ConditionBuilder::new(&registry, DEFAULT_DELIMITER).build(tag, expression)
}
