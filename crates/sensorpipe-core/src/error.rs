// crates/sensorpipe-core/src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid pipeline configuration: {message}")]
    Config { message: String },

    #[error("time column error: {message}")]
    Schema { message: String },

    #[error("{operation}: column not found in feature set: {column}")]
    ColumnNotFound {
        operation: &'static str,
        column: String,
    },

    #[error("{operation} validation failed: {message}")]
    Validation {
        operation: &'static str,
        message: String,
    },

    #[error("operation {index} ({kind}) failed: {source}")]
    Step {
        index: usize,
        kind: &'static str,
        #[source]
        source: Box<PipelineError>,
    },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl PipelineError {
    pub fn config(message: impl Into<String>) -> Self {
        PipelineError::Config {
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        PipelineError::Schema {
            message: message.into(),
        }
    }

    pub fn validation(operation: &'static str, message: impl Into<String>) -> Self {
        PipelineError::Validation {
            operation,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
