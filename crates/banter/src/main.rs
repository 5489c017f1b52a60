//! The interactive chat CLI built on top of the `banter` library.

use std::process::ExitCode;

use banter::repl;
use banter::tools::{AddTool, MultiplyTool, WeatherTool};
use banter_core::SessionBuilder;
use banter_openai_model::{OpenAIConfig, OpenAIProvider};
use tokio::io::{stdin, stdout};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match OpenAIConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let model_provider = OpenAIProvider::new(config);

    let mut session = SessionBuilder::with_model_provider(model_provider)
        .with_tool(AddTool::new())
        .with_tool(MultiplyTool::new())
        .with_tool(WeatherTool::new())
        .build();

    println!(
        "Chat session started! (type 'quit' to exit, 'reset' to clear history)"
    );

    match repl::run(&mut session, stdin(), stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("io error: {err}");
            ExitCode::FAILURE
        }
    }
}
