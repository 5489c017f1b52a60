//! The interactive chat loop.

use std::time::Duration;

use banter_core::Session;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{
    self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader,
};

const BAR_CHAR: &str = "▎";

/// Runs the interactive loop until `quit` or end of input.
///
/// Lines are read from `input` and everything is printed to `output`.
/// The recognized commands are `quit` and `reset` (case-insensitive);
/// any other non-empty line is submitted as a user message. When a turn
/// carries tool call requests, the first is dispatched and its output
/// printed.
///
/// A failed model call is reported and the loop continues; the session
/// rolls the transcript back, so the conversation stays consistent.
pub async fn run<R, W>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let mut reader = BufReader::new(input);
    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        let Some(line) = read_line(&mut reader).await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("quit") {
            output.write_all("Goodbye!\n".as_bytes()).await?;
            break;
        }
        if line.eq_ignore_ascii_case("reset") {
            session.reset();
            output
                .write_all("Conversation history cleared!\n".as_bytes())
                .await?;
            continue;
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Thinking...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));
        let turn_or_err = session.submit(line).await;
        progress_bar.finish_and_clear();

        let turn = match turn_or_err {
            Ok(turn) => turn,
            Err(err) => {
                let report = format!("{}{}\n", BAR_CHAR.bright_red(), err);
                output.write_all(report.as_bytes()).await?;
                continue;
            }
        };

        if !turn.text.is_empty() {
            let report = format!(
                "{}🤖 {}\n",
                BAR_CHAR.bright_cyan(),
                turn.text.bright_white()
            );
            output.write_all(report.as_bytes()).await?;
        }

        let Some(call) = turn.tool_calls.first() else {
            continue;
        };
        let report = format!(
            "{}⚙ {}({})\n",
            BAR_CHAR.bright_yellow(),
            call.name,
            call.arguments
        );
        output.write_all(report.as_bytes()).await?;

        match session.dispatch_first(&turn.tool_calls).await {
            Ok(Some(result)) => {
                let report = format!(
                    "{}{}\n",
                    BAR_CHAR.bright_yellow(),
                    result.bright_white()
                );
                output.write_all(report.as_bytes()).await?;
            }
            Ok(None) => {}
            Err(err) => {
                let report = format!("{}{}\n", BAR_CHAR.bright_red(), err);
                output.write_all(report.as_bytes()).await?;
            }
        }
    }

    Ok(())
}

async fn read_line<R>(reader: &mut BufReader<R>) -> Option<String>
where
    R: AsyncRead + Unpin,
{
    let mut line = String::new();
    match reader.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use banter_core::SessionBuilder;
    use banter_test_model::{PresetReply, TestModelProvider};
    use serde_json::json;

    use super::*;
    use crate::tools::AddTool;

    #[tokio::test]
    async fn test_chat_reset_quit() {
        let provider = TestModelProvider::default();
        provider.push_reply(PresetReply::text("Hi there!"));

        let mut session =
            SessionBuilder::with_model_provider(provider.clone()).build();
        let input = &b"hello\nreset\nquit\n"[..];
        let mut output = Vec::new();

        run(&mut session, input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Hi there!"));
        assert!(output.contains("Conversation history cleared!"));
        assert!(output.contains("Goodbye!"));

        // One model call for the one chat line; `reset` and `quit` don't
        // reach the model.
        assert_eq!(provider.request_count(), 1);
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped() {
        let provider = TestModelProvider::default();

        let mut session =
            SessionBuilder::with_model_provider(provider.clone()).build();
        let input = &b"\n   \nQUIT\n"[..];
        let mut output = Vec::new();

        run(&mut session, input, &mut output).await.unwrap();

        assert_eq!(provider.request_count(), 0);
    }

    #[tokio::test]
    async fn test_tool_call_output_is_printed() {
        let provider = TestModelProvider::default();
        provider.push_reply(PresetReply::tool_call(
            "Let me calculate that.",
            "add",
            json!({ "a": 15, "b": 27 }),
        ));

        let mut session = SessionBuilder::with_model_provider(provider)
            .with_tool(AddTool::new())
            .build();
        let input = &b"What is 15 plus 27?\nquit\n"[..];
        let mut output = Vec::new();

        run(&mut session, input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("add"));
        assert!(output.contains("42"));
    }

    #[tokio::test]
    async fn test_model_failure_keeps_the_loop_alive() {
        let provider = TestModelProvider::default();
        provider.push_reply(PresetReply::failure());
        provider.push_reply(PresetReply::text("Still here."));

        let mut session =
            SessionBuilder::with_model_provider(provider).build();
        let input = &b"hello\nhello again\nquit\n"[..];
        let mut output = Vec::new();

        run(&mut session, input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("model request failed"));
        assert!(output.contains("Still here."));
        // The failed turn was rolled back, the successful one kept.
        assert_eq!(session.transcript().len(), 3);
    }
}
