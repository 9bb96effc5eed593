use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("Error: Negative number not allowed")]
    NegativeInput,

    #[error("Scheduled task was dropped before completing")]
    TaskDropped,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Cannot parse '{input}' as {expected}")]
    ParseError { input: String, expected: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Runtime,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DrillError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DrillError::NegativeInput | DrillError::ParseError { .. } => ErrorCategory::Input,
            DrillError::TaskDropped => ErrorCategory::Runtime,
            DrillError::IoError(_) | DrillError::SerializationError(_) => ErrorCategory::Io,
            DrillError::ConfigValidationError { .. }
            | DrillError::InvalidConfigValueError { .. }
            | DrillError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Runtime => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DrillError::NegativeInput => "Negative numbers cannot be squared here".to_string(),
            DrillError::TaskDropped => {
                "The computation was interrupted before it finished".to_string()
            }
            DrillError::IoError(e) => format!("Could not read or write a file: {}", e),
            DrillError::SerializationError(e) => format!("Could not encode the report: {}", e),
            DrillError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            DrillError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            DrillError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            DrillError::ParseError { input, expected } => {
                format!("'{}' is not a valid {}", input, expected)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DrillError::NegativeInput => "Pass a number greater than or equal to zero",
            DrillError::TaskDropped => "Keep the runtime alive until every task has settled",
            DrillError::IoError(_) => "Check that the path exists and is writable",
            DrillError::SerializationError(_) => "Check the report contents for non-finite numbers",
            DrillError::ConfigValidationError { .. } => "Fix the TOML syntax and try again",
            DrillError::InvalidConfigValueError { .. } => "Correct the value in the scenario file",
            DrillError::MissingConfigError { .. } => "Add the missing setting to the scenario file",
            DrillError::ParseError { .. } => "Run with --help to see accepted values",
        }
    }
}

pub type Result<T> = std::result::Result<T, DrillError>;
