// crates/sensorpipe-core/src/ops/mod.rs

mod fill_null;
mod lag;
mod standardize;

pub use fill_null::{FillMethod, FillNull};
pub use lag::Lag;
pub use standardize::Standardize;

use crate::data::TimeSeriesData;
use crate::error::{PipelineError, Result};

/// A single pipeline step. Closed set of variants so configuration decoding
/// stays exhaustive: an unknown kind is a load-time error, never a silent
/// pass-through.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    FillNull(FillNull),
    Lag(Lag),
    Standardize(Standardize),
}

impl Operation {
    /// The `type` discriminator used in configuration documents.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::FillNull(_) => FillNull::KIND,
            Operation::Lag(_) => Lag::KIND,
            Operation::Standardize(_) => Standardize::KIND,
        }
    }

    /// Apply the operation, producing a new snapshot. The input is never
    /// mutated; on error no partial output exists.
    pub fn apply(&self, data: TimeSeriesData) -> Result<TimeSeriesData> {
        match self {
            Operation::FillNull(op) => op.apply(data),
            Operation::Lag(op) => op.apply(data),
            Operation::Standardize(op) => op.apply(data),
        }
    }
}

/// Expand an optional explicit column list against the input's feature set.
///
/// Every explicit name must be a feature column of the input; the time column
/// is not a valid target. Checked before any transformation work so failures
/// never leave partial results.
pub(crate) fn resolve_target_columns(
    operation: &'static str,
    requested: Option<&[String]>,
    data: &TimeSeriesData,
) -> Result<Vec<String>> {
    match requested {
        Some(columns) => {
            for column in columns {
                if !data.feature_columns().contains(column) {
                    return Err(PipelineError::ColumnNotFound {
                        operation,
                        column: column.clone(),
                    });
                }
            }
            Ok(columns.to_vec())
        }
        None => Ok(data.feature_columns().to_vec()),
    }
}
