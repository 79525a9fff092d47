use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::config::models::{LoggingConfig, ServerConfig, StaticFilesConfig};

/// Validation result type alias
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, thiserror::Error, Clone)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid listen address '{address}': {reason}")]
    InvalidListenAddress { address: String, reason: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

/// Server configuration validator
pub struct ServerConfigValidator;

impl ServerConfigValidator {
    /// Validate the entire server configuration, reporting every problem at once
    pub fn validate(config: &ServerConfig) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_listen_address(&config.listen_addr) {
            errors.push(e);
        }

        if let Err(mut static_errors) = Self::validate_static_files(&config.static_files) {
            errors.append(&mut static_errors);
        }

        if let Err(e) = Self::validate_logging(&config.logging) {
            errors.push(e);
        }

        if config.shutdown_timeout_secs == 0 {
            errors.push(ValidationError::InvalidField {
                field: "shutdown_timeout_secs".to_string(),
                message: "Shutdown timeout must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ValidationFailed {
                message: Self::format_multiple_errors(errors),
            })
        }
    }

    /// Validate listen address format
    fn validate_listen_address(address: &str) -> ValidationResult<()> {
        if address.parse::<SocketAddr>().is_err() {
            return Err(ValidationError::InvalidListenAddress {
                address: address.to_string(),
                reason: "Must be in format 'IP:PORT' (e.g., '127.0.0.1:3000' or '0.0.0.0:8080')"
                    .to_string(),
            });
        }
        Ok(())
    }

    fn validate_static_files(config: &StaticFilesConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if config.root.trim().is_empty() {
            errors.push(ValidationError::MissingField {
                field: "static_files.root".to_string(),
            });
        }

        if config.index_file.trim().is_empty() {
            errors.push(ValidationError::MissingField {
                field: "static_files.index_file".to_string(),
            });
        } else if config.index_file.contains(['/', '\\']) || config.index_file.contains("..") {
            errors.push(ValidationError::InvalidField {
                field: "static_files.index_file".to_string(),
                message: "Index file must be a bare file name inside the static root".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_logging(config: &LoggingConfig) -> ValidationResult<()> {
        EnvFilter::try_new(&config.level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidField {
                field: "logging.level".to_string(),
                message: format!("Invalid log filter '{}': {e}", config.level),
            })
    }

    /// Format multiple validation errors into a single message
    fn format_multiple_errors(errors: Vec<ValidationError>) -> String {
        if errors.is_empty() {
            return "No errors".to_string();
        }

        if errors.len() == 1 {
            return errors[0].to_string();
        }

        let mut message = format!("Found {} validation errors:\n", errors.len());
        for (i, error) in errors.iter().enumerate() {
            message.push_str(&format!("  {}. {}\n", i + 1, error));
        }
        message
    }
}
