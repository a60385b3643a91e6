use std::path::PathBuf;

/// Errors surfaced to the frontend caller by the method-binding bridge.
///
/// None of these are fatal to the process: the bridge serializes them
/// into a structured error response and keeps serving.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("not bound: {target}")]
    NotBound { target: String },

    #[error("argument error: {reason}")]
    Argument { reason: String },

    #[error("invocation failed: {message}")]
    Invocation { message: String },
}

impl BridgeError {
    pub fn not_bound(target: impl Into<String>) -> Self {
        Self::NotBound {
            target: target.into(),
        }
    }

    pub fn argument(reason: impl Into<String>) -> Self {
        Self::Argument {
            reason: reason.into(),
        }
    }

    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation {
            message: message.into(),
        }
    }

    /// Stable kind string used in wire-level error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotBound { .. } => "not_bound",
            Self::Argument { .. } => "argument",
            Self::Invocation { .. } => "invocation",
        }
    }

    /// The human-readable detail without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::NotBound { target } => target,
            Self::Argument { reason } => reason,
            Self::Invocation { message } => message,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Umbrella error for the shell. Only host-level construction failures
/// are treated as fatal; everything else is recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("host error: {0}")]
    Host(String),

    #[error("{0}")]
    Other(String),
}
