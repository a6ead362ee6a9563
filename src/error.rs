//! Error types for the pesoscan library

use thiserror::Error;

/// Result type alias for pesoscan operations
pub type Result<T> = std::result::Result<T, ClassifyError>;

#[derive(Error, Debug)]
pub enum ClassifyError {
    /// Image has no pixels to analyse
    #[error("Image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// A pipeline stage failed unexpectedly
    #[error("Processing error: {message}")]
    Processing { message: String },

    /// Invalid tuning parameter
    #[error("Invalid parameter: {parameter} = {value} ({reason})")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Same denomination listed twice in one reference table
    #[error("Duplicate denomination {denomination} in {table} table")]
    DuplicateDenomination { table: &'static str, denomination: u32 },

    /// Malformed reference entry
    #[error("Invalid reference for denomination {denomination}: {reason}")]
    InvalidReference { denomination: u32, reason: String },

    /// Configuration file could not be read or parsed
    #[error("Failed to load configuration: {message}")]
    ConfigLoad {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ClassifyError {
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigLoad {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Text suitable for showing to the person who uploaded the photo
    pub fn user_message(&self) -> String {
        match self {
            ClassifyError::EmptyImage { .. } => {
                "The image contains no pixels. Please upload a different photo.".to_string()
            }
            ClassifyError::Processing { message } => {
                format!("Error while processing the image: {}", message)
            }
            ClassifyError::InvalidParameter { .. }
            | ClassifyError::DuplicateDenomination { .. }
            | ClassifyError::InvalidReference { .. }
            | ClassifyError::ConfigLoad { .. } => {
                format!("The classifier is misconfigured: {}", self)
            }
        }
    }
}
