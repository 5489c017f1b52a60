//! A set of built-in tools that models can use.

mod calc;
mod weather;

pub use calc::{AddTool, MultiplyTool};
pub use weather::WeatherTool;
