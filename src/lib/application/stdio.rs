use crate::agent::TurnController;
use crate::model::ModelProvider;
use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a single input line asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand<'a> {
    Skip,
    Quit,
    Query(&'a str),
}

pub fn classify_line(line: &str) -> LoopCommand<'_> {
    let input = line.trim();
    if input.is_empty() {
        LoopCommand::Skip
    } else if input.eq_ignore_ascii_case("quit") {
        LoopCommand::Quit
    } else {
        LoopCommand::Query(input)
    }
}

/// Interactive chat on the process's stdin and stdout.
pub async fn run<P: ModelProvider>(controller: &mut TurnController<P>) -> Result<(), StdioError> {
    let stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    run_loop(controller, stdin, &mut stdout).await
}

/// Reads queries until `quit` or end of input. A failed turn is reported and
/// the loop carries on; a failed write ends it.
pub async fn run_loop<P, R, W>(
    controller: &mut TurnController<P>,
    reader: R,
    writer: &mut W,
) -> Result<(), StdioError>
where
    P: ModelProvider,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    print_banner(writer, controller).await?;

    loop {
        writer.write_all(b"\nQuery: ").await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            info!("Input closed, leaving chat loop");
            break;
        };

        let query = match classify_line(&line) {
            LoopCommand::Skip => continue,
            LoopCommand::Quit => break,
            LoopCommand::Query(query) => query,
        };

        match controller.run_turn(query).await {
            Ok(outcome) => {
                info!(phase = ?outcome.phase, tools = outcome.tool_calls.len(), "Turn finished");
                write_line(writer, "").await?;
                write_line(writer, &outcome.answer).await?;
            }
            Err(err) => {
                error!(%err, "Turn failed");
                write_line(writer, &format!("\nError: {}", err.user_message())).await?;
            }
        }
    }

    writer.flush().await?;
    Ok(())
}

async fn print_banner<P, W>(
    writer: &mut W,
    controller: &TurnController<P>,
) -> Result<(), StdioError>
where
    P: ModelProvider,
    W: AsyncWrite + Unpin,
{
    let names: Vec<&str> = controller
        .tools()
        .iter()
        .map(|tool| tool.name.as_str())
        .collect();
    let settings = controller.settings();
    write_line(writer, "MCP prompt client started.").await?;
    write_line(
        writer,
        &format!("Model: {} ({})", settings.model, settings.provider),
    )
    .await?;
    write_line(writer, &format!("Connected to server with tools: {names:?}")).await?;
    write_line(writer, "Type your queries or 'quit' to exit.").await?;
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> Result<(), StdioError> {
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_lines() {
        assert_eq!(classify_line("   "), LoopCommand::Skip);
        assert_eq!(classify_line(""), LoopCommand::Skip);
        assert_eq!(classify_line(" QuIt \n"), LoopCommand::Quit);
        assert_eq!(classify_line("  what is 2+2 "), LoopCommand::Query("what is 2+2"));
        assert_eq!(classify_line("quit now"), LoopCommand::Query("quit now"));
    }
}
