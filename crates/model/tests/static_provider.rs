//! Implements a minimal provider by hand to validate that the protocol
//! traits are usable without any helper crates.

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::future::ready;

use banter_model::{
    ErrorKind, ModelMessage, ModelProvider, ModelProviderError, ModelReply,
    ModelRequest, ModelTool, ToolCallRequest,
};
use serde_json::json;

#[derive(Debug)]
struct StaticError;

impl Display for StaticError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "no reply configured for this request")
    }
}

impl StdError for StaticError {}

impl ModelProviderError for StaticError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A provider that echoes a canned reply, and requests a tool call when
/// the request declares any tools.
struct StaticProvider;

impl ModelProvider for StaticProvider {
    type Error = StaticError;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let Some(last) = req.messages.last() else {
            return ready(Err(StaticError));
        };
        let reply = if let Some(tool) = req.tools.first() {
            ModelReply::ToolUse {
                text: String::new(),
                calls: vec![ToolCallRequest {
                    id: "call:1".to_owned(),
                    name: tool.name.clone(),
                    arguments: json!({}),
                }],
            }
        } else {
            ModelReply::Text(format!("You said: {}", last.content()))
        };
        ready(Ok(reply))
    }
}

#[tokio::test]
async fn test_text_reply() {
    let provider = StaticProvider;
    let req = ModelRequest {
        messages: vec![
            ModelMessage::System("You are a helpful assistant.".to_owned()),
            ModelMessage::User("Hi".to_owned()),
        ],
        tools: vec![],
    };

    let reply = provider.send_request(&req).await.unwrap();
    let ModelReply::Text(text) = reply else {
        panic!("expected a text-only reply");
    };
    assert_eq!(text, "You said: Hi");
}

#[tokio::test]
async fn test_tool_use_reply() {
    let provider = StaticProvider;
    let req = ModelRequest {
        messages: vec![ModelMessage::User("What time is it?".to_owned())],
        tools: vec![ModelTool {
            name: "clock".to_owned(),
            description: "Tells the current time.".to_owned(),
            parameters: json!({ "type": "object", "properties": {} }),
        }],
    };

    let reply = provider.send_request(&req).await.unwrap();
    let ModelReply::ToolUse { calls, .. } = reply else {
        panic!("expected a tool-use reply");
    };
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "clock");
}

#[tokio::test]
async fn test_error_reporting() {
    let provider = StaticProvider;
    let req = ModelRequest {
        messages: vec![],
        tools: vec![],
    };

    let err = provider.send_request(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
}
