use std::fmt;

/// A command typed in plain mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick the card at this zero-based grid position.
    Pick(usize),
    Restart,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was entered.
    Empty,
    /// Card number is not a positive integer.
    InvalidCardNumber(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Enter a card number (e.g., '3')"),
            Self::InvalidCardNumber(value) => write!(
                f,
                "Invalid card number '{}'. Cards are numbered from 1",
                value
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a command string.
///
/// Card numbers are one-based as displayed; the returned position is
/// zero-based.
///
/// # Examples
///
/// ```
/// use mg_client::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("3"), Ok(Command::Pick(2)));
/// assert_eq!(parse_command("pick 1"), Ok(Command::Pick(0)));
/// assert_eq!(parse_command("quit"), Ok(Command::Quit));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    match trimmed.to_lowercase().as_str() {
        "" => return Err(ParseError::Empty),
        "restart" | "r" => return Ok(Command::Restart),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        _ => {}
    }

    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.as_slice() {
        [number] if number.chars().all(|c| c.is_ascii_digit()) => parse_card_number(number),
        [verb, number] if matches!(verb.to_lowercase().as_str(), "pick" | "click") => {
            parse_card_number(number)
        }
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

fn parse_card_number(value: &str) -> Result<Command, ParseError> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Command::Pick(n - 1)),
        _ => Err(ParseError::InvalidCardNumber(value.to_string())),
    }
}
