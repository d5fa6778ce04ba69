use std::error::Error as StdError;

use thiserror::Error;

use crate::{config::LoadError, domain::error::FormatError, infra::error::InfraError};

/// An error flattened into its message and the messages of its sources.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration")]
    Config(#[source] LoadError),
    #[error("invalid format configuration")]
    Format(#[source] FormatError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("unknown format `{0}`")]
    UnknownFormat(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<LoadError> for AppError {
    fn from(error: LoadError) -> Self {
        Self::Config(error)
    }
}

impl From<FormatError> for AppError {
    fn from(error: FormatError) -> Self {
        Self::Format(error)
    }
}

impl AppError {
    pub fn unknown_format(name: impl Into<String>) -> Self {
        Self::UnknownFormat(name.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Process exit status, following the sysexits convention.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::UnknownFormat(_) => 64,
            AppError::Config(_) | AppError::Format(_) => 78,
            AppError::Infra(InfraError::Io(_)) => 74,
            AppError::Infra(InfraError::Telemetry(_)) | AppError::Unexpected(_) => 70,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }
}
