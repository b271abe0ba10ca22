use crate::math::Complex;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FractalError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] png::EncodingError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Cannot parse '{input}': {reason}")]
    ParseError { input: String, reason: String },

    #[error("Newton iteration did not converge after {iterations} iterations (last value {last})")]
    NoConvergence { iterations: usize, last: Complex },

    #[error("Limit exceeded: {message}")]
    LimitExceeded { message: String },

    #[error("Resource not found: {resource}")]
    ResourceNotFound { resource: String },
}

pub type Result<T> = std::result::Result<T, FractalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Io,
    Configuration,
    Input,
    Computation,
    Encoding,
    Resource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FractalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FractalError::IoError(_) => ErrorCategory::Io,
            FractalError::SerializationError(_)
            | FractalError::CsvError(_)
            | FractalError::ImageError(_) => ErrorCategory::Encoding,
            FractalError::ConfigError { .. }
            | FractalError::ConfigValidationError { .. }
            | FractalError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FractalError::InvalidArgument { .. }
            | FractalError::ParseError { .. }
            | FractalError::LimitExceeded { .. } => ErrorCategory::Input,
            FractalError::NoConvergence { .. } => ErrorCategory::Computation,
            FractalError::ResourceNotFound { .. } => ErrorCategory::Resource,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Resource => ErrorSeverity::Low,
            ErrorCategory::Computation => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Encoding => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// 由呼叫端造成的錯誤 (HTTP 4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Input | ErrorCategory::Resource
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FractalError::IoError(_) => "Check that the path exists and is writable",
            FractalError::SerializationError(_) | FractalError::CsvError(_) => {
                "Report this as a bug; the output could not be serialized"
            }
            FractalError::ImageError(_) => "Try a smaller render width",
            FractalError::ConfigError { .. } | FractalError::ConfigValidationError { .. } => {
                "Check the TOML syntax of the configuration file"
            }
            FractalError::InvalidConfigValueError { .. } => {
                "Fix the reported configuration value and restart"
            }
            FractalError::InvalidArgument { .. } => "Check the request parameters",
            FractalError::ParseError { .. } => {
                "Write complex numbers as 'a + bi' using the configured decimal separator"
            }
            FractalError::NoConvergence { .. } => {
                "Use a different start value or a larger tolerance"
            }
            FractalError::LimitExceeded { .. } => "Reduce the recursion depth or spread",
            FractalError::ResourceNotFound { .. } => {
                "Check render.sample_path in the configuration"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FractalError::NoConvergence { .. } => {
                "Could not find all zeros of the polynomial".to_string()
            }
            FractalError::IoError(e) => format!("File system error: {}", e),
            other => other.to_string(),
        }
    }
}
