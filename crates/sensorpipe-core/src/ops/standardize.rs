// crates/sensorpipe-core/src/ops/standardize.rs

use polars::prelude::*;

use crate::data::TimeSeriesData;
use crate::error::{PipelineError, Result};
use crate::ops::resolve_target_columns;

/// Per-column z-score normalization: `(v - mean) / std` over the non-null
/// values, sample standard deviation (ddof = 1). Nulls pass through.
///
/// A column with fewer than two non-null values has no defined standard
/// deviation, and a constant column has a zero one; both are validation
/// errors the caller must avoid by excluding the column.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardize {
    pub columns: Option<Vec<String>>,
}

impl Standardize {
    pub const KIND: &'static str = "standardize";

    pub fn new(columns: Option<Vec<String>>) -> Self {
        Self { columns }
    }

    pub(crate) fn apply(&self, data: TimeSeriesData) -> Result<TimeSeriesData> {
        let targets = resolve_target_columns(Self::KIND, self.columns.as_deref(), &data)?;

        let time_column = data.time_column().to_string();
        let mut df = data.into_polars();

        for name in &targets {
            let series = df.column(name)?.as_materialized_series();
            if !series.dtype().is_primitive_numeric() {
                return Err(PipelineError::validation(
                    Self::KIND,
                    format!("column '{name}' has non-numeric type {:?}", series.dtype()),
                ));
            }

            let non_null = series.len() - series.null_count();
            if non_null < 2 {
                return Err(PipelineError::validation(
                    Self::KIND,
                    format!("column '{name}' has {non_null} non-null values, need at least 2"),
                ));
            }

            let cast = series.cast(&DataType::Float64)?;
            let values = cast.f64()?;
            let mean = values.mean().unwrap_or(0.0);
            let std = values.std(1).unwrap_or(0.0);
            if std == 0.0 {
                return Err(PipelineError::validation(
                    Self::KIND,
                    format!("column '{name}' has zero variance"),
                ));
            }

            let scaled = values.apply_values(|v| (v - mean) / std).into_series();
            df.replace(name, scaled)?;
        }

        TimeSeriesData::new(df, Some(&time_column))
    }
}
