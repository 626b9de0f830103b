//! Parsing of typed input lines.

use std::path::PathBuf;

/// What the user asked for on one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the line as a text message
    Say(String),
    /// Send a file as media
    File(PathBuf),
    /// Send a file as this user's avatar
    Avatar(PathBuf),
    /// Leave the chat
    Quit,
    /// Nothing to do (blank line or a command missing its argument)
    Ignore,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Ignore;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "/quit" | "/exit" => Command::Quit,
            "/file" if !rest.is_empty() => Command::File(PathBuf::from(rest)),
            "/avatar" if !rest.is_empty() => Command::Avatar(PathBuf::from(rest)),
            "/file" | "/avatar" => Command::Ignore,
            _ => Command::Say(line.to_string()),
        }
    }
}
