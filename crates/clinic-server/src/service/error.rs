//! Service layer error types.

use thiserror::Error;

/// Result type for service operations.
pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

/// Boxed source error carried by every variant.
type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised while building or running the services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid configuration value.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Database connection, migration or query error.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Authentication error.
    #[error("Authentication error: {message}")]
    Auth {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Internal service error.
    #[error("Internal service error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl ServiceError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    pub fn database_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the error category.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "configuration",
            Self::Database { .. } => "database",
            Self::Auth { .. } => "authentication",
            Self::Internal { .. } => "internal",
        }
    }

    /// Converts this service error into a handler error.
    pub fn into_handler_error(self) -> crate::handler::Error<'static> {
        use crate::handler::ErrorKind;

        match self {
            Self::Auth { message, .. } => ErrorKind::AuthenticationFailed.with_context(message),
            Self::Config { message, .. }
            | Self::Database { message, .. }
            | Self::Internal { message, .. } => ErrorKind::ServerError.with_context(message),
        }
    }
}

impl From<ServiceError> for crate::handler::Error<'static> {
    fn from(error: ServiceError) -> Self {
        error.into_handler_error()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::handler::ErrorKind;

    #[test]
    fn error_creation() {
        let error = ServiceError::config("token ttl must be positive");
        assert_eq!(error.category(), "configuration");
        assert!(error.to_string().contains("token ttl"));
    }

    #[test]
    fn error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = ServiceError::database_with_source("Failed to connect", source);

        assert_eq!(error.category(), "database");
        assert!(error.source().is_some());
    }

    #[test]
    fn handler_error_conversion() {
        let handler_error = ServiceError::auth("Invalid credentials").into_handler_error();
        assert_eq!(handler_error.kind(), ErrorKind::AuthenticationFailed);
        assert_eq!(handler_error.context(), Some("Invalid credentials"));

        let handler_error: crate::handler::Error = ServiceError::internal("boom").into();
        assert_eq!(handler_error.kind(), ErrorKind::ServerError);
    }
}
