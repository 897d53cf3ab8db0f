use std::fmt;

/// Failures that can escape the core: unreadable or unparsable persisted
/// data, and storage I/O. Invalid user input and stale ids are not errors
/// here; the operations treat them as silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidData(String),
    Io(String),
}

impl AppError {
    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidData(message) => message,
            Self::Io(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
