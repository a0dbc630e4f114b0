use miette::Diagnostic;
use thiserror::Error;

/// Main error type for poster operations
#[derive(Error, Diagnostic, Debug)]
pub enum PosterError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(poster::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid parameter: {message}")]
    #[diagnostic(code(poster::invalid_parameter))]
    InvalidParameter {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Colour error: {message}")]
    #[diagnostic(code(poster::colour))]
    ColourParse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(poster::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Font error: {message}")]
    #[diagnostic(code(poster::font))]
    Font {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl PosterError {
    /// Shorthand for an out-of-range or malformed parameter.
    pub fn invalid(message: impl Into<String>, help: Option<&str>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            help: help.map(str::to_string),
        }
    }
}

pub type Result<T> = std::result::Result<T, PosterError>;
