use std::collections::HashMap;

use banter_model::{ModelTool, ToolCallRequest};

use crate::tool::{AnyTool, Error, Tool, ToolObject};

/// A static mapping from tool name to implementation.
///
/// The registry is populated at startup and never mutated afterwards. It
/// serves both sides of the tool contract: [`definitions`][Self::definitions]
/// advertises the capabilities to the model, and
/// [`dispatch_first`][Self::dispatch_first] executes a requested call.
#[derive(Default)]
pub struct Registry {
    tools: HashMap<String, Box<dyn ToolObject>>,
}

impl Registry {
    /// Registers a tool. A tool registered later replaces an earlier one
    /// with the same name.
    pub fn add_tool<T: Tool>(&mut self, tool: T) {
        let name = tool.name().to_owned();
        self.tools.insert(name, Box::new(AnyTool(tool)));
    }

    /// Returns whether any tools are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Returns the declarations to advertise to the model.
    #[inline]
    pub fn definitions(&self) -> Vec<ModelTool> {
        self.tools
            .values()
            .map(|tool| ModelTool {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                parameters: tool.parameter_schema().clone(),
            })
            .collect()
    }

    /// Executes the first requested tool call and yields its output.
    ///
    /// With no requests this is a no-op and resolves to `Ok(None)`. When
    /// there are several requests, only the first is acted on; the rest
    /// are logged and dropped. A request naming an unregistered tool
    /// fails with an [`ErrorKind::UnknownTool`][super::ErrorKind] error.
    ///
    /// The output is not fed back into any transcript; that is up to the
    /// caller.
    pub async fn dispatch_first(
        &self,
        requests: &[ToolCallRequest],
    ) -> Result<Option<String>, Error> {
        let Some(req) = requests.first() else {
            return Ok(None);
        };
        for dropped in &requests[1..] {
            warn!("dropping extra tool call request: {}", dropped.name);
        }

        let Some(tool) = self.tools.get(&req.name) else {
            warn!("tool not found: {}", req.name);
            return Err(Error::unknown_tool()
                .with_reason(format!("no tool named `{}`", req.name)));
        };

        trace!("running tool ({}) with args: {:?}", req.id, req.arguments);
        tool.execute(req.arguments.clone()).await.map(Some)
    }
}
