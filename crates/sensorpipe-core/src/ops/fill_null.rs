// crates/sensorpipe-core/src/ops/fill_null.rs

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::TimeSeriesData;
use crate::error::Result;
use crate::ops::resolve_target_columns;

/// Direction a fill propagates along row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMethod {
    Forward,
    Backward,
}

/// Null imputation by propagating the nearest non-null neighbour.
///
/// A leading run of nulls (forward) or trailing run (backward) has no
/// qualifying neighbour and stays null; downstream operations must tolerate
/// the residue.
#[derive(Debug, Clone, PartialEq)]
pub struct FillNull {
    pub method: FillMethod,
    pub columns: Option<Vec<String>>,
}

impl FillNull {
    pub const KIND: &'static str = "fill_null";

    pub fn new(method: FillMethod, columns: Option<Vec<String>>) -> Self {
        Self { method, columns }
    }

    pub(crate) fn apply(&self, data: TimeSeriesData) -> Result<TimeSeriesData> {
        let targets = resolve_target_columns(Self::KIND, self.columns.as_deref(), &data)?;

        let strategy = match self.method {
            FillMethod::Forward => FillNullStrategy::Forward(None),
            FillMethod::Backward => FillNullStrategy::Backward(None),
        };

        let time_column = data.time_column().to_string();
        let mut df = data.into_polars();
        for name in &targets {
            let filled = df
                .column(name)?
                .as_materialized_series()
                .fill_null(strategy)?;
            df.replace(name, filled)?;
        }

        TimeSeriesData::new(df, Some(&time_column))
    }
}
