//! Core logic including the conversation session, tool dispatch, and the
//! type-erased model client.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod conversation;
mod model_client;
mod session;
pub mod tool;

pub use model_client::ModelClient;
pub use session::{
    DEFAULT_SYSTEM_PROMPT, Session, SessionBuilder, Turn, UpstreamError,
};
