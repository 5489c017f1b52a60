//! An out-of-the-box chat agent that assembles built-in tools and model
//! providers.
//!
//! The crate includes a CLI tool for chatting in the terminal. And you can
//! also use it as a library to bring chat sessions into your own host apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

#[cfg(feature = "cli")]
pub mod repl;
pub mod tools;

/// Re-exports of [`banter_core`] crate.
pub mod core {
    pub use banter_core::*;
}
