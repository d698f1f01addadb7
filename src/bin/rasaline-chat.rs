//! Interactive console client for a Rasa-compatible REST webhook.
//!
//! This binary reads messages from the command line, sends them to a bot
//! server, and prints the replies. When a reply carries buttons, the next
//! input is a selection from those buttons instead of free text.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a bot on localhost:5005, streaming responses
//! rasaline-chat
//!
//! # Point at another server, with a token
//! rasaline-chat --server-url http://bot.example.com:5005 --token secret
//!
//! # Wait for complete responses instead of streaming
//! rasaline-chat --blocking
//!
//! # End the session after five messages
//! rasaline-chat --max-messages 5
//! ```
//!
//! Type `/stop` to exit. A broken backend ends the session with a non-zero
//! exit status; there are no retries.

use arrrg::CommandLine;

use rasaline::chat::{ChatArgs, ChatConfig, ChatSession, EXIT_COMMAND, TerminalInput};
use rasaline::{PlainTextRenderer, Rasa, Renderer};

/// Main entry point for the rasaline-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("rasaline-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = Rasa::with_options(
        Some(config.server_url.clone()),
        config.token.clone(),
        Some(config.timeout),
    )?;
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut input = TerminalInput::new(use_color)?;
    let mut session = ChatSession::new(client, config);

    renderer.print_success(&format!(
        "Bot loaded. Type a message and press enter (use '{EXIT_COMMAND}' to exit):"
    ));

    match session.run(&mut input, &mut renderer).await {
        Ok(summary) => {
            renderer.print_info(&format!(
                "Session over: {} message(s) sent.",
                summary.messages_sent
            ));
            Ok(())
        }
        Err(err) => {
            renderer.print_error(&err.to_string());
            std::process::exit(1);
        }
    }
}
