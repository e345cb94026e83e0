pub type AppResult<T> = Result<T, AppError>;
pub type SyncResult<T> = Result<T, SyncError>;

/// Failures produced by the section-sync core.
///
/// None of these are fatal. Callers log them and carry on with the UI
/// unchanged; `ObserverAttachment` is absorbed inside the observer by
/// switching to the scroll-offset fallback.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("unknown section: {id}")]
    UnknownSection { id: String },
    #[error("element for section {id} is not mounted")]
    ElementNotFound { id: String },
    #[error("visibility provider {provider} failed to attach: {reason}")]
    ObserverAttachment {
        provider: &'static str,
        reason: String,
    },
    #[error("invalid section registry: {0}")]
    InvalidRegistry(String),
}

impl SyncError {
    pub fn unknown_section(id: impl Into<String>) -> Self {
        Self::UnknownSection { id: id.into() }
    }

    pub fn element_not_found(id: impl Into<String>) -> Self {
        Self::ElementNotFound { id: id.into() }
    }

    pub fn observer_attachment(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::ObserverAttachment {
            provider,
            reason: reason.into(),
        }
    }

    pub fn invalid_registry(message: impl Into<String>) -> Self {
        Self::InvalidRegistry(message.into())
    }

    /// Whether the caller may retry the same request after a short delay.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("content error: {0}")]
    Content(String),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn content(message: impl Into<String>) -> Self {
        Self::Content(message.into())
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, SyncError};

    #[test]
    fn sync_error_converts_into_app_error_transparently() {
        let err: AppError = SyncError::unknown_section("contact").into();
        assert!(matches!(err, AppError::Sync(SyncError::UnknownSection { .. })));
        assert_eq!(err.to_string(), "unknown section: contact");
    }

    #[test]
    fn only_element_not_found_is_retryable() {
        assert!(SyncError::element_not_found("skills").is_retryable());
        assert!(!SyncError::unknown_section("skills").is_retryable());
        assert!(!SyncError::observer_attachment("intersection", "boom").is_retryable());
    }
}
