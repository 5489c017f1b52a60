use banter_model::{ModelReply, ToolCallRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A scripted step for [`TestModelProvider`][crate::TestModelProvider].
///
/// Each submitted request consumes one step: either a canned reply or an
/// injected failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// Respond with the given reply.
    #[serde(rename = "reply")]
    Reply(ModelReply),
    /// Fail the request.
    #[serde(rename = "failure")]
    Failure,
}

impl PresetReply {
    /// Creates a text-only reply step.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Reply(ModelReply::Text(text.into()))
    }

    /// Creates a reply step that requests a single tool call.
    #[inline]
    pub fn tool_call<S, N>(text: S, name: N, arguments: Value) -> Self
    where
        S: Into<String>,
        N: Into<String>,
    {
        let name = name.into();
        Self::Reply(ModelReply::ToolUse {
            text: text.into(),
            calls: vec![ToolCallRequest {
                id: format!("call:{name}"),
                name,
                arguments,
            }],
        })
    }

    /// Creates a failure step.
    #[inline]
    pub fn failure() -> Self {
        Self::Failure
    }
}
