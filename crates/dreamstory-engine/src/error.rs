//! Error types for the console engine binary.
//!
//! [`EngineError`] wraps every failure that can end the process.
//! [`CommandError`] covers a single bad input line; the console reports it
//! and keeps reading.

use dreamstory_types::ParseEnumError;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: dreamstory_core::config::ConfigError,
    },

    /// The session actor stopped or failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: dreamstory_core::scheduler::SessionError,
    },

    /// Reading stdin or writing stdout failed.
    #[error("console I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// A console line that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a known command.
    #[error("unknown command `{name}` (try `help`)")]
    Unknown {
        /// The rejected command word.
        name: String,
    },

    /// The command needs an argument that was not given.
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        /// The command word.
        command: &'static str,
        /// What should follow it.
        expected: &'static str,
    },

    /// A numeric argument did not parse.
    #[error("`{value}` is not a number")]
    InvalidNumber {
        /// The rejected argument.
        value: String,
    },

    /// A room argument did not name a room.
    #[error("{source}")]
    InvalidRoom {
        /// The underlying parse error.
        #[from]
        source: ParseEnumError,
    },
}
