//! Error types for graph-text parsing

/// Error type for graph-text operations
#[derive(Debug, thiserror::Error)]
pub enum GraphTextError {
    /// Lexer error (invalid token)
    #[error("lexer error at position {position}: {message}")]
    Lexer { position: usize, message: String },

    /// Parser error (unexpected token or invalid structure)
    #[error("parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// Prefix not declared before use
    #[error("undefined prefix: {0}")]
    UndefinedPrefix(String),

    /// Invalid escape sequence in a string literal
    #[error("invalid escape sequence: {0}")]
    InvalidEscape(String),
}

/// Result type for graph-text operations
pub type Result<T> = std::result::Result<T, GraphTextError>;

impl GraphTextError {
    /// Create a lexer error
    pub fn lexer(position: usize, message: impl Into<String>) -> Self {
        Self::Lexer {
            position,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}
