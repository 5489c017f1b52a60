use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describes a tool call request from the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The unique identifier for the tool call request.
    pub id: String,
    /// The name of the tool to call.
    pub name: String,
    /// The arguments to pass to the tool, as a JSON object mapping
    /// parameter names to values.
    pub arguments: Value,
}

/// A complete reply from the model provider.
///
/// A reply either carries plain text, or text accompanied by one or more
/// tool call requests. Consumers match on the variant; there is no
/// optional field to probe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelReply {
    /// The model replied with plain text.
    Text(String),
    /// The model wants one or more tools to be called.
    ToolUse {
        /// Text accompanying the tool call requests, possibly empty.
        text: String,
        /// The requested calls, in the order the model emitted them.
        /// Non-empty by construction.
        calls: Vec<ToolCallRequest>,
    },
}

impl ModelReply {
    /// Returns the text content of this reply.
    #[inline]
    pub fn text(&self) -> &str {
        match self {
            ModelReply::Text(text) => text,
            ModelReply::ToolUse { text, .. } => text,
        }
    }

    /// Returns the tool call requests in this reply, empty for a
    /// text-only reply.
    #[inline]
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        match self {
            ModelReply::Text(_) => &[],
            ModelReply::ToolUse { calls, .. } => calls,
        }
    }
}
