use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// The run can be retried once the input is fixed.
    Medium,
    High,
    /// The environment itself is broken (missing files, permissions).
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::CsvError(_) => ErrorCategory::Data,
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Validation => ErrorSeverity::Medium,
        }
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check that the input file exists and that you run from the project root".to_string()
            }
            EtlError::IoError(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                "Check read permission on the input and write permission on the output directory"
                    .to_string()
            }
            EtlError::IoError(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                "Make sure the input file is UTF-8 encoded".to_string()
            }
            EtlError::IoError(_) => "Check the input and output paths".to_string(),
            EtlError::CsvError(_) => "Check the output path and available disk space".to_string(),
            EtlError::ConfigError { .. } => {
                "Make sure the config file exists and is valid TOML".to_string()
            }
            EtlError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            EtlError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            EtlError::ValidationError { .. } => "Review the configuration values".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::IoError(e) => format!("ERROR during ETL: {}", e),
            EtlError::CsvError(e) => format!("ERROR writing CSV output: {}", e),
            EtlError::ConfigError { message } => format!("Configuration problem: {}", message),
            EtlError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Invalid setting {} = '{}': {}", field, value, reason),
            EtlError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            EtlError::ValidationError { message } => format!("Invalid configuration: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
