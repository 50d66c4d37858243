//! Layered error definitions
//!
//! Categorized by origin: config / source / general

use thiserror::Error;

/// Unified collaborator error
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Source Errors =====
    /// Asynchronous fetch of the next entry failed
    #[error("source '{source_id}' fetch error: {message}")]
    SourceFetch { source_id: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create source fetch error
    pub fn source_fetch(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceFetch {
            source_id: source_id.into(),
            message: message.into(),
        }
    }
}
