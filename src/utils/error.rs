use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrowthError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Invalid standards table: {message}")]
    InvalidStandardsTable { message: String },

    #[error("Invalid growth record: {message}")]
    InvalidRecord { message: String },

    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GrowthError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GrowthError::IoError(_) => ErrorCategory::Io,
            GrowthError::CsvError(_)
            | GrowthError::SerializationError(_)
            | GrowthError::InvalidStandardsTable { .. }
            | GrowthError::InvalidRecord { .. }
            | GrowthError::UnknownVariant { .. } => ErrorCategory::Data,
            GrowthError::ConfigValidationError { .. }
            | GrowthError::InvalidConfigValueError { .. }
            | GrowthError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GrowthError::IoError(_) => ErrorSeverity::Critical,
            GrowthError::CsvError(_) | GrowthError::SerializationError(_) => ErrorSeverity::Medium,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GrowthError::IoError(_) => "Check that the file exists and is readable",
            GrowthError::CsvError(_) => {
                "Check the CSV header: age_months,weight_kg,height_cm,head_circ_cm"
            }
            GrowthError::SerializationError(_) => "Check that the record file is valid JSON",
            GrowthError::ConfigValidationError { .. } => "Check the TOML syntax of the config file",
            GrowthError::InvalidConfigValueError { .. } => {
                "Fix the reported value or remove it to use the default"
            }
            GrowthError::MissingConfigError { .. } => "Add the missing field to the config file",
            GrowthError::InvalidStandardsTable { .. } => {
                "Standards tables need strictly increasing ages and positive values"
            }
            GrowthError::InvalidRecord { .. } => {
                "Check the record's birth date and measurement dates"
            }
            GrowthError::UnknownVariant { .. } => {
                "Use male/female, weight/height/head and g/kg/mm/cm"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a file: {}", self),
            ErrorCategory::Data => format!("Input data could not be used: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GrowthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = GrowthError::InvalidConfigValueError {
            field: "calculation.weeks_per_month".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("weeks_per_month"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = GrowthError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
