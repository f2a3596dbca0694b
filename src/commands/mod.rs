/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat`: Interactive chat session
- `ask`: Send one message and print the answer

Both drive a [`ChatSession`]; rendering helpers live here so the two
commands print turns the same way.
*/

use crate::chat::{ChatSession, Reply};
use crate::config::Config;
use crate::error::{RagChatError, Result};
use crate::session::{SessionId, Transcript, Turn};
use colored::Colorize;
use std::path::Path;

// Special commands parser for the interactive session
pub mod special_commands;

// Chat command handler
pub mod chat {
    //! Interactive chat handler.
    //!
    //! Runs a readline loop; each non-command line is submitted to the
    //! session, then the reply and the full history (newest first) are
    //! printed before the next prompt.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let mut session = ChatSession::from_config(&config)?;
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&config, session.session_id());

        loop {
            match rl.readline(&format!("{} ", "You:".bold())) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::ShowHistory) => {
                            print_history(&session.transcript());
                            continue;
                        }
                        Ok(SpecialCommand::SaveTranscript(path)) => {
                            match save_transcript(&session.transcript(), &path) {
                                Ok(()) => println!(
                                    "{}\n",
                                    format!("Saved transcript to {}", path.display()).green()
                                ),
                                Err(e) => eprintln!("{}\n", format!("{:#}", e).red()),
                            }
                            continue;
                        }
                        Ok(SpecialCommand::ShowSession) => {
                            match session.session_id() {
                                Some(id) => println!("Session: {}\n", id.to_string().cyan()),
                                None => println!("Session: {}\n", "none".dimmed()),
                            }
                            continue;
                        }
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    }

                    rl.add_history_entry(trimmed)?;

                    if let Some(reply) = session.submit(trimmed).await? {
                        print_reply(&reply, config.chat.show_sources);
                        print_history(&session.transcript());
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    return Err(RagChatError::Readline(err).into());
                }
            }
        }

        tracing::info!("Chat session ended after {} turns", session.transcript().len());
        Ok(())
    }

    fn print_welcome_banner(config: &Config, session_id: Option<&SessionId>) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                 RagChat - Ask me anything                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Endpoint: {}", config.endpoint.url.cyan());
        if let Some(id) = session_id {
            println!("Session:  {}", id.to_string().cyan());
        }
        println!("\nType '/help' for available commands, '/exit' to quit\n");
    }
}

// One-shot command handler
pub mod ask {
    //! Single-message handler.

    use super::*;

    /// Send one message and print the reply
    ///
    /// Request failures are printed like any answer; the command still
    /// exits successfully, matching the interactive session.
    ///
    /// # Errors
    ///
    /// Returns error if the message is blank or the client cannot be built
    pub async fn run_ask(config: Config, message: String) -> Result<()> {
        let mut session = ChatSession::from_config(&config)?;

        match session.submit(&message).await? {
            Some(reply) => {
                print_reply(&reply, config.chat.show_sources);
                Ok(())
            }
            None => Err(RagChatError::Config("message must not be empty".to_string()).into()),
        }
    }
}

/// Render one reply for the terminal
pub fn format_reply(reply: &Reply, show_sources: bool) -> String {
    let label = if reply.is_error {
        "Bot:".red().bold()
    } else {
        "Bot:".green().bold()
    };
    let mut out = format!("{} {}", label, reply.output);

    if show_sources && !reply.sources.is_empty() {
        out.push_str(&format!("\n{}", "Sources:".dimmed()));
        for source in &reply.sources {
            out.push_str(&format!("\n  - {}", source));
        }
    }

    out
}

/// Render one turn of the history
pub fn format_turn(turn: &Turn) -> String {
    format!(
        "{} {}\n{} {}",
        "?".yellow().bold(),
        turn.input,
        ">".green().bold(),
        turn.output
    )
}

/// Render the full history, newest turn first
pub fn format_history(transcript: &Transcript) -> String {
    if transcript.is_empty() {
        return "No conversation yet.".yellow().to_string();
    }

    transcript
        .newest_first()
        .map(format_turn)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn print_reply(reply: &Reply, show_sources: bool) {
    println!("{}\n", format_reply(reply, show_sources));
}

fn print_history(transcript: &Transcript) {
    println!("\n{}", "Conversation History:".bold());
    println!("{}\n", format_history(transcript));
}

/// Write the flattened transcript to `path`
///
/// This is the "download" action: the file contains every input and output,
/// newest turn first, separated by newlines.
///
/// # Errors
///
/// Returns `RagChatError::Config` if the transcript is empty, or an IO error
/// if the file cannot be written
pub fn save_transcript(transcript: &Transcript, path: &Path) -> Result<()> {
    if transcript.is_empty() {
        return Err(RagChatError::Config("nothing to save yet".to_string()).into());
    }

    std::fs::write(path, transcript.flatten()).map_err(RagChatError::Io)?;
    tracing::info!("Saved {} turns to {}", transcript.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn transcript() -> Transcript {
        Transcript::from_pairs(
            &["first question".to_string(), "second question".to_string()],
            &["first answer".to_string(), "second answer".to_string()],
        )
    }

    #[test]
    fn test_format_history_is_newest_first() {
        let rendered = format_history(&transcript());
        let second = rendered.find("second question").unwrap();
        let first = rendered.find("first question").unwrap();
        assert!(second < first);
        assert!(rendered.contains("second answer"));
    }

    #[test]
    fn test_format_history_empty() {
        assert!(format_history(&Transcript::default()).contains("No conversation yet."));
    }

    #[test]
    fn test_format_reply_sources_only_when_enabled() {
        let reply = Reply {
            output: "Plug it in.".to_string(),
            sources: vec!["manual.pdf".to_string()],
            is_error: false,
        };
        assert!(format_reply(&reply, true).contains("manual.pdf"));
        assert!(!format_reply(&reply, false).contains("manual.pdf"));
        assert!(format_reply(&reply, false).contains("Plug it in."));
    }

    #[test]
    fn test_save_transcript_writes_flattened_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.txt");

        save_transcript(&transcript(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "second question\nsecond answer\nfirst question\nfirst answer"
        );
    }

    #[test]
    fn test_save_empty_transcript_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.txt");

        assert!(save_transcript(&Transcript::default(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_to_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("chat.txt");

        let err = save_transcript(&transcript(), &path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RagChatError>(),
            Some(RagChatError::Io(_))
        ));
    }
}
