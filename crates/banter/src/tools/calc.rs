use std::future::ready;

use banter_core::tool::{Error as ToolError, Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
pub struct CalcToolParameters {
    #[schemars(description = "The first number.")]
    a: i64,
    #[schemars(description = "The second number.")]
    b: i64,
}

/// A tool that calculates the sum of two numbers.
pub struct AddTool {
    parameter_schema: Value,
}

impl AddTool {
    /// Creates a new add tool.
    #[inline]
    pub fn new() -> Self {
        AddTool {
            parameter_schema: schema_for!(CalcToolParameters).to_value(),
        }
    }
}

impl Default for AddTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for AddTool {
    type Input = CalcToolParameters;

    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Calculates the sum of two numbers."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: CalcToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        ready(match input.a.checked_add(input.b) {
            Some(sum) => Ok(sum.to_string()),
            None => Err(ToolError::execution_error()
                .with_reason("the sum does not fit in 64 bits")),
        })
    }
}

/// A tool that calculates the product of two numbers.
pub struct MultiplyTool {
    parameter_schema: Value,
}

impl MultiplyTool {
    /// Creates a new multiply tool.
    #[inline]
    pub fn new() -> Self {
        MultiplyTool {
            parameter_schema: schema_for!(CalcToolParameters).to_value(),
        }
    }
}

impl Default for MultiplyTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for MultiplyTool {
    type Input = CalcToolParameters;

    fn name(&self) -> &str {
        "multiply"
    }

    fn description(&self) -> &str {
        "Calculates the product of two numbers."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: CalcToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        ready(match input.a.checked_mul(input.b) {
            Some(product) => Ok(product.to_string()),
            None => Err(ToolError::execution_error()
                .with_reason("the product does not fit in 64 bits")),
        })
    }
}
