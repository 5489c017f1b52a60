//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::ready;
use std::sync::{Arc, Mutex};

use banter_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};

pub use preset::*;

/// Error type for [`TestModelProvider`].
#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Shared {
    script: VecDeque<PresetReply>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to set up the script, which is how
/// the model should respond. Each request consumes the front step of the
/// script; an exhausted script makes the request fail.
///
/// Clones share the same script and request log, so a test can keep one
/// handle for assertions while handing another to the code under test.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    shared: Arc<Mutex<Shared>>,
}

impl TestModelProvider {
    /// Appends a step to the script.
    #[inline]
    pub fn push_reply(&self, preset: PresetReply) {
        self.shared.lock().unwrap().script.push_back(preset);
    }

    /// Returns the number of requests received so far.
    #[inline]
    pub fn request_count(&self) -> usize {
        self.shared.lock().unwrap().requests.len()
    }

    /// Returns copies of the requests received so far, oldest first.
    #[inline]
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.shared.lock().unwrap().requests.clone()
    }
}

impl ModelProvider for TestModelProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let mut shared = self.shared.lock().unwrap();
        shared.requests.push(req.clone());

        let result = match shared.script.pop_front() {
            Some(PresetReply::Reply(reply)) => Ok(reply),
            Some(PresetReply::Failure) => Err(Error {
                message: "scripted failure",
                kind: ErrorKind::Other,
            }),
            None => Err(Error {
                message: "script exhausted",
                kind: ErrorKind::Other,
            }),
        };
        ready(result)
    }
}
