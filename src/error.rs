use serde::Serialize;
use thiserror::Error;

/// Application error types for better error handling and user feedback.
#[derive(Debug, Clone, Serialize, Error)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// Errors related to the local key-value store
    #[error("Storage error: {0}")]
    Storage(String),
    /// Errors encoding or decoding persisted JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Errors related to data validation
    #[error("Validation error: {0}")]
    Validation(String),
    /// Errors raised by the platform notification surface
    #[error("Notification error: {0}")]
    Notification(String),
    /// Errors resolving runtime configuration
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Serialization(error.to_string())
    }
}

// Conversion to String for front ends that only carry plain messages
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.to_string()
    }
}

// Convenience constructors
impl AppError {
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        AppError::Serialization(msg.into())
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn notification<S: Into<String>>(msg: S) -> Self {
        AppError::Notification(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }
}

/// Result type alias used across the crate
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::storage("file not found");
        assert_eq!(err.to_string(), "Storage error: file not found");
    }

    #[test]
    fn test_error_conversion_to_string() {
        let err = AppError::notification("no server");
        let s: String = err.into();
        assert!(s.contains("Notification error"));
    }

    #[test]
    fn test_error_constructors() {
        let storage_err = AppError::storage("test");
        assert!(matches!(storage_err, AppError::Storage(_)));

        let config_err = AppError::config("test");
        assert!(matches!(config_err, AppError::Config(_)));
    }

    #[test]
    fn test_serde_json_error_maps_to_serialization() {
        let parse_err = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let err: AppError = parse_err.into();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_error_serialization() {
        let err = AppError::validation("invalid input");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Validation"));
        assert!(json.contains("invalid input"));
    }
}
