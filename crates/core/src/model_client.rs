use std::pin::Pin;
use std::sync::Arc;

use banter_model::{
    ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use tracing::Instrument;

type SendRequestResult = Result<ModelReply, Box<dyn ModelProviderError>>;
type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = SendRequestResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(ModelRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// A wrapper around a model provider that erases the provider type, so
/// the other modules can hold it without a generic parameter.
#[derive(Clone)]
pub struct ModelClient {
    handler_fn: HandlerFn,
}

impl ModelClient {
    /// Creates a client that forwards requests to `provider`.
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `ModelClient` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            trace!("sending a request: {req:?}");
            let fut = provider.send_request(&req);
            Box::pin(
                async move {
                    match fut.await {
                        Ok(reply) => {
                            trace!("got a reply: {reply:?}");
                            Ok(reply)
                        }
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ModelProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("model client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and resolves to the complete reply.
    ///
    /// The call blocks the caller until the provider responds; errors are
    /// propagated without retry.
    #[inline]
    pub async fn send_request(
        &self,
        req: ModelRequest,
    ) -> Result<ModelReply, Box<dyn ModelProviderError>> {
        (self.handler_fn)(req).await
    }
}
