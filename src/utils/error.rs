use thiserror::Error;

#[derive(Error, Debug)]
pub enum KitError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Store error on key '{key}': {message}")]
    StoreError { key: String, message: String },

    #[error("Cart rule violated for product {product_id}: {message}")]
    CartError { product_id: u64, message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Domain,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl KitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            KitError::ConfigValidationError { .. } | KitError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            KitError::IoError(_) | KitError::SerializationError(_) | KitError::StoreError { .. } => {
                ErrorCategory::Storage
            }
            KitError::CartError { .. } => ErrorCategory::Domain,
            KitError::ServerError { .. } => ErrorCategory::Network,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            KitError::CartError { .. } => ErrorSeverity::Low,
            KitError::StoreError { .. } | KitError::SerializationError(_) => ErrorSeverity::Medium,
            KitError::ConfigValidationError { .. } | KitError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            KitError::IoError(_) | KitError::ServerError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            KitError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            KitError::ConfigValidationError { field, message } => {
                format!("Could not read '{}': {}", field, message)
            }
            KitError::ServerError { message } => format!("Redirect server failed: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags or the TOML file against the documented defaults"
            }
            ErrorCategory::Storage => "Check that the store file is readable and contains valid JSON",
            ErrorCategory::Domain => "Reduce the requested quantity to the available stock",
            ErrorCategory::Network => "Make sure the listen port is free (another dev server may hold it)",
        }
    }

    /// Exit code used by the binaries. Never zero: every error is a failure.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, KitError>;
