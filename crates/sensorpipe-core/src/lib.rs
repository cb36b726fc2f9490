pub mod config;
pub mod data;
pub mod error;
pub mod ops;
pub mod pipeline;

pub use config::{OperationConfig, PipelineConfig, PipelineSection};
pub use data::TimeSeriesData;
pub use error::{PipelineError, Result};
pub use ops::{FillMethod, FillNull, Lag, Operation, Standardize};
pub use pipeline::Pipeline;
