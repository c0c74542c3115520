//! Error types for the CLI application.

use std::fmt;

use holdem_engine::errors::GameError;

/// Errors a command can end with. Every variant maps to exit code `2`.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, config file reads)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(GameError),

    /// A check the CLI runs on engine output failed
    Internal(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        match error {
            GameError::InvalidCard(_) => CliError::InvalidInput(error.to_string()),
            GameError::InvalidConfig(msg) => CliError::Config(msg),
            other => CliError::Engine(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_errors_are_user_input() {
        let e: CliError = GameError::InvalidCard("Xx".into()).into();
        assert!(matches!(e, CliError::InvalidInput(_)));
        assert_eq!(e.to_string(), "Invalid input: Invalid card: \"Xx\"");
    }

    #[test]
    fn engine_errors_keep_their_source() {
        let e: CliError = GameError::TableFinished.into();
        assert!(std::error::Error::source(&e).is_some());
    }
}
