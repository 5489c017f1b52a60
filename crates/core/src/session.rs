use std::fmt::{self, Display};

use banter_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
    ToolCallRequest,
};

use crate::conversation::Transcript;
use crate::model_client::ModelClient;
use crate::tool::{Error as ToolError, Registry, Tool};

/// The system prompt used when the builder doesn't specify one.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Be friendly and concise.";

/// The error returned when the model call behind [`Session::submit`]
/// fails.
///
/// The underlying provider error is propagated as-is; nothing is retried.
#[derive(Debug)]
pub struct UpstreamError(Box<dyn ModelProviderError>);

impl UpstreamError {
    /// Returns the kind of the underlying provider error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }
}

impl Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model request failed: {}", self.0)
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.0)
    }
}

/// One completed exchange produced by [`Session::submit`].
#[derive(Clone, Debug)]
pub struct Turn {
    /// The assistant text appended to the transcript.
    pub text: String,
    /// Tool invocations the model requested this turn, empty when it
    /// requested none. Hand these to
    /// [`Session::dispatch_first`] to execute.
    pub tool_calls: Vec<ToolCallRequest>,
}

/// [`Session`] builder.
pub struct SessionBuilder {
    model_client: ModelClient,
    system_prompt: String,
    tools: Registry,
}

impl SessionBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
            tools: Registry::default(),
        }
    }

    /// Sets the system prompt for the session.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Registers a tool.
    #[inline]
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        self.tools.add_tool(tool);
        self
    }

    /// Builds the session.
    #[inline]
    pub fn build(self) -> Session {
        Session {
            transcript: Transcript::new(self.system_prompt),
            model_client: self.model_client,
            tools: self.tools,
        }
    }
}

/// A chat session that keeps the conversation history.
///
/// The session owns its transcript exclusively; there is no sharing and
/// no concurrency control. Submitting takes `&mut self` and blocks until
/// the provider responds, which gives the intended one-call-at-a-time
/// usage for free.
pub struct Session {
    transcript: Transcript,
    model_client: ModelClient,
    tools: Registry,
}

impl Session {
    /// Submits a user message and returns the completed turn.
    ///
    /// The message is appended to the transcript, the full transcript is
    /// sent to the model along with the registered tool declarations, and
    /// the reply text is appended as an assistant message. Any tool calls
    /// the model requested are returned in the turn; executing them (and
    /// deciding what to do with their output) is up to the caller.
    ///
    /// On failure the just-appended user message is rolled back, so the
    /// transcript is left exactly as it was before the call.
    pub async fn submit<S: Into<String>>(
        &mut self,
        text: S,
    ) -> Result<Turn, UpstreamError> {
        self.transcript.push_user(text);

        let request = ModelRequest {
            messages: self.transcript.messages().to_vec(),
            tools: self.tools.definitions(),
        };
        let reply = match self.model_client.send_request(request).await {
            Ok(reply) => reply,
            Err(err) => {
                self.transcript.pop_last();
                return Err(UpstreamError(err));
            }
        };

        let (text, tool_calls) = match reply {
            ModelReply::Text(text) => (text, Vec::new()),
            ModelReply::ToolUse { text, calls } => (text, calls),
        };
        self.transcript.push_assistant(text.clone());

        Ok(Turn { text, tool_calls })
    }

    /// Clears the conversation history, keeping the system prompt.
    ///
    /// Cannot fail; the next [`submit`][Self::submit] starts a fresh
    /// conversation.
    #[inline]
    pub fn reset(&mut self) {
        self.transcript.reset();
    }

    /// Executes the first of the given tool call requests via the
    /// session's registry. See [`Registry::dispatch_first`].
    #[inline]
    pub async fn dispatch_first(
        &self,
        requests: &[ToolCallRequest],
    ) -> Result<Option<String>, ToolError> {
        self.tools.dispatch_first(requests).await
    }

    /// Returns the conversation transcript.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use banter_model::ModelMessage;
    use banter_test_model::{PresetReply, TestModelProvider};
    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::*;
    use crate::tool::ToolResult;

    static ADD_SCHEMA: std::sync::LazyLock<Value> =
        std::sync::LazyLock::new(|| {
            json!({
                "type": "object",
                "properties": {
                    "a": { "type": "integer" },
                    "b": { "type": "integer" }
                },
                "required": ["a", "b"]
            })
        });

    #[derive(Deserialize)]
    struct AddInput {
        a: i64,
        b: i64,
    }

    struct AddTool;

    impl Tool for AddTool {
        type Input = AddInput;

        fn name(&self) -> &str {
            "add"
        }

        fn description(&self) -> &str {
            "Adds two numbers."
        }

        fn parameter_schema(&self) -> &Value {
            &ADD_SCHEMA
        }

        fn execute(
            &self,
            input: Self::Input,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            ready(Ok((input.a + input.b).to_string()))
        }
    }

    #[test]
    fn test_fresh_session_transcript() {
        let session =
            SessionBuilder::with_model_provider(TestModelProvider::default())
                .build();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(
            session.transcript().messages()[0],
            ModelMessage::System(DEFAULT_SYSTEM_PROMPT.to_owned())
        );
    }

    #[tokio::test]
    async fn test_submit_appends_two_messages() {
        let provider = TestModelProvider::default();
        provider.push_reply(PresetReply::text("Hello!"));

        let mut session =
            SessionBuilder::with_model_provider(provider.clone()).build();
        let turn = session.submit("Hi").await.unwrap();

        assert_eq!(turn.text, "Hello!");
        assert!(turn.tool_calls.is_empty());

        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1], ModelMessage::User("Hi".to_owned()));
        assert_eq!(messages[2], ModelMessage::Assistant("Hello!".to_owned()));

        // The provider saw the full transcript.
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_submit_rolls_back() {
        let provider = TestModelProvider::default();
        provider.push_reply(PresetReply::text("Hello!"));
        provider.push_reply(PresetReply::failure());

        let mut session =
            SessionBuilder::with_model_provider(provider).build();
        session.submit("Hi").await.unwrap();
        let before = session.transcript().messages().to_vec();

        let err = session.submit("Are you there?").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(session.transcript().messages(), &before[..]);
    }

    #[tokio::test]
    async fn test_reset_restores_system_message() {
        let provider = TestModelProvider::default();
        provider.push_reply(PresetReply::text("Hello!"));
        provider.push_reply(PresetReply::text("Hi again!"));

        let mut session = SessionBuilder::with_model_provider(provider)
            .with_system_prompt("Be terse.")
            .build();
        session.submit("Hi").await.unwrap();
        session.submit("Hi!").await.unwrap();
        assert_eq!(session.transcript().len(), 5);

        session.reset();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(
            session.transcript().messages()[0],
            ModelMessage::System("Be terse.".to_owned())
        );
    }

    #[tokio::test]
    async fn test_tool_declarations_are_advertised() {
        let provider = TestModelProvider::default();
        provider.push_reply(PresetReply::text("Sure."));

        let mut session =
            SessionBuilder::with_model_provider(provider.clone())
                .with_tool(AddTool)
                .build();
        session.submit("What is 2 + 3?").await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests[0].tools.len(), 1);
        assert_eq!(requests[0].tools[0].name, "add");
    }

    #[tokio::test]
    async fn test_tool_call_round_trip() {
        let provider = TestModelProvider::default();
        provider.push_reply(PresetReply::tool_call(
            "Let me calculate that.",
            "add",
            json!({ "a": 2, "b": 3 }),
        ));

        let mut session = SessionBuilder::with_model_provider(provider)
            .with_tool(AddTool)
            .build();
        let turn = session.submit("What is 2 + 3?").await.unwrap();

        assert_eq!(turn.text, "Let me calculate that.");
        assert_eq!(turn.tool_calls.len(), 1);

        let output = session.dispatch_first(&turn.tool_calls).await.unwrap();
        assert_eq!(output.as_deref(), Some("5"));

        // The tool output is not fed back into the transcript.
        assert_eq!(session.transcript().len(), 3);
    }
}
