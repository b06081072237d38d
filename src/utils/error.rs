use thiserror::Error;

#[derive(Error, Debug)]
pub enum KisanError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Service unavailable: {endpoint} returned HTTP {status}")]
    ServiceUnavailable { endpoint: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error on '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Input,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl KisanError {
    pub fn invalid_argument(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::ServiceUnavailable { .. } => ErrorCategory::Network,
            Self::InvalidArgument { .. } | Self::ValidationError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::CsvError(_)
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::StorageError { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Storage => ErrorSeverity::High,
        }
    }

    /// Exposed so callers can decide between a fallback and a hard failure.
    pub fn is_service_failure(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check that the backend is running and reachable",
            Self::ServiceUnavailable { .. } => "The service is down, try again later",
            Self::InvalidArgument { .. } | Self::ValidationError { .. } => {
                "Correct the highlighted field and submit again"
            }
            Self::ConfigError { .. } => "Review the configuration file and CLI flags",
            Self::CsvError(_) | Self::IoError(_) => "Check file permissions and free disk space",
            Self::SerializationError(_) => "The stored data may be corrupt, remove it and retry",
            Self::StorageError { .. } => "Check the data directory",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::ServiceUnavailable { .. } => {
                "Service unavailable, could not reach the server".to_string()
            }
            Self::InvalidArgument { field, reason, .. } => format!("{}: {}", field, reason),
            Self::ValidationError { field, reason } => format!("{}: {}", field, reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KisanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_high_severity() {
        let err = KisanError::invalid_argument("term_months", 0, "must be at least 1");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.user_friendly_message(), "term_months: must be at least 1");
    }

    #[test]
    fn test_service_unavailable_is_network_failure() {
        let err = KisanError::ServiceUnavailable {
            endpoint: "/api/health".to_string(),
            status: 503,
        };
        assert!(err.is_service_failure());
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("503"));
    }
}
