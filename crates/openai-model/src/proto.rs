use banter_model::{
    ErrorKind, ModelMessage, ModelReply, ModelRequest, ModelTool,
    ToolCallRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, OpenAIConfig};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub function: FunctionCall,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct FunctionTool {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct Tool {
    r#type: &'static str,
    function: FunctionTool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System { content: String },
    User { content: String },
    Assistant { content: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    req: &ModelRequest,
    config: &OpenAIConfig,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: req.messages.iter().map(create_message).collect(),
        temperature: config.temperature,
        tools: req.tools.iter().map(create_tool).collect(),
    }
}

#[inline]
fn create_message(msg: &ModelMessage) -> Message {
    match msg {
        ModelMessage::System(content) => Message::System {
            content: content.clone(),
        },
        ModelMessage::User(content) => Message::User {
            content: content.clone(),
        },
        ModelMessage::Assistant(content) => Message::Assistant {
            content: content.clone(),
        },
    }
}

#[inline]
fn create_tool(tool: &ModelTool) -> Tool {
    Tool {
        r#type: "function",
        function: FunctionTool {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

/// Converts a completion body into a [`ModelReply`].
pub fn parse_reply(completion: ChatCompletion) -> Result<ModelReply, Error> {
    let Some(choice) = completion.choices.into_iter().next() else {
        return Err(Error::new(
            "the response contains no choices",
            ErrorKind::Other,
        ));
    };

    if choice.finish_reason.as_deref() == Some("content_filter") {
        return Err(Error::new(
            "the content was filtered by the provider",
            ErrorKind::Moderated,
        ));
    }

    let text = choice.message.content.unwrap_or_default();
    let Some(tool_calls) = choice.message.tool_calls.filter(|c| !c.is_empty())
    else {
        return Ok(ModelReply::Text(text));
    };

    let mut calls = Vec::with_capacity(tool_calls.len());
    for tool_call in tool_calls {
        // The server encodes the argument object as a JSON string.
        let arguments: Value = serde_json::from_str(&tool_call.function.arguments)
            .map_err(|err| {
                Error::new(
                    format!("malformed tool call arguments: {err}"),
                    ErrorKind::Other,
                )
            })?;
        calls.push(ToolCallRequest {
            id: tool_call.id,
            name: tool_call.function.name,
            arguments,
        });
    }
    Ok(ModelReply::ToolUse { text, calls })
}
