//! Special commands parser for interactive chat
//!
//! Lines starting with `/` are commands for the chat client itself rather
//! than messages for the endpoint. Command names are case-insensitive;
//! arguments (such as a file path) keep their original case.

use colored::Colorize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Render the full transcript, newest first
    ShowHistory,

    /// Write the flattened transcript to a file
    SaveTranscript(PathBuf),

    /// Show the session identifier sent with each message
    ShowSession,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the input to the endpoint
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` for unrecognised `/` commands and
/// `CommandError::MissingArgument` for `/save` without a path.
///
/// # Examples
///
/// ```
/// use ragchat::commands::special_commands::{parse_special_command, SpecialCommand};
/// use std::path::PathBuf;
///
/// assert_eq!(parse_special_command("/history").unwrap(), SpecialCommand::ShowHistory);
/// assert_eq!(
///     parse_special_command("/save Chat.txt").unwrap(),
///     SpecialCommand::SaveTranscript(PathBuf::from("Chat.txt"))
/// );
/// assert_eq!(parse_special_command("hello").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    match name.as_str() {
        "/history" => Ok(SpecialCommand::ShowHistory),
        "/save" | "/download" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    usage: format!("{} <path>", name),
                    command: name.clone(),
                })
            } else {
                Ok(SpecialCommand::SaveTranscript(PathBuf::from(arg)))
            }
        }
        "/session" => Ok(SpecialCommand::ShowSession),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print the list of special commands
pub fn print_help() {
    println!("\n{}", "Available commands:".bold());
    println!("  {}          Show the conversation, newest first", "/history".cyan());
    println!("  {}      Save the conversation to a text file", "/save <path>".cyan());
    println!("  {}          Show the session identifier", "/session".cyan());
    println!("  {}             Show this help", "/help".cyan());
    println!("  {}             Leave the chat (also: /quit)", "/exit".cyan());
    println!(
        "\n{}\n",
        "Any other line starting with '/' is rejected; all other text is sent as a message."
            .dimmed()
    );
}
