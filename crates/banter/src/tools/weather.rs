use std::future::ready;

use banter_core::tool::{Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
pub struct WeatherToolParameters {
    #[schemars(description = "The city name.")]
    location: String,
}

/// A tool that reports the weather for a location.
///
/// The lookup is mocked; a real deployment would call a weather API.
pub struct WeatherTool {
    parameter_schema: Value,
}

impl WeatherTool {
    /// Creates a new weather tool.
    #[inline]
    pub fn new() -> Self {
        WeatherTool {
            parameter_schema: schema_for!(WeatherToolParameters).to_value(),
        }
    }
}

impl Default for WeatherTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for WeatherTool {
    type Input = WeatherToolParameters;

    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Gets the current weather for a city."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: WeatherToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        ready(Ok(format!(
            "The weather in {} is sunny with a temperature of 22°C.",
            input.location
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup() {
        let tool = WeatherTool::new();
        let result = tool
            .execute(WeatherToolParameters {
                location: "Tokyo".to_owned(),
            })
            .await
            .unwrap();
        assert_eq!(
            result,
            "The weather in Tokyo is sunny with a temperature of 22°C."
        );
    }
}
