// crates/sensorpipe-core/src/ops/lag.rs

use std::collections::HashSet;

use polars::prelude::*;

use crate::data::TimeSeriesData;
use crate::error::{PipelineError, Result};
use crate::ops::resolve_target_columns;

/// Lag-feature generation: for each target column and period `p`, append
/// `<column>_lag_<p>` holding the value from `p` rows earlier. The first `p`
/// rows of a generated column are null.
///
/// Output column order is all original columns followed by the generated ones
/// in (column, then period-as-given) order.
#[derive(Debug, Clone, PartialEq)]
pub struct Lag {
    pub periods: Vec<u32>,
    pub columns: Option<Vec<String>>,
}

impl Lag {
    pub const KIND: &'static str = "lag";

    pub fn new(periods: Vec<u32>, columns: Option<Vec<String>>) -> Self {
        Self { periods, columns }
    }

    pub(crate) fn apply(&self, data: TimeSeriesData) -> Result<TimeSeriesData> {
        let targets = resolve_target_columns(Self::KIND, self.columns.as_deref(), &data)?;

        let time_column = data.time_column().to_string();
        let mut df = data.into_polars();

        let mut names_taken: HashSet<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        let mut generated: Vec<Column> = Vec::with_capacity(targets.len() * self.periods.len());
        for name in &targets {
            let source = df.column(name)?.as_materialized_series().clone();
            for &period in &self.periods {
                if period == 0 {
                    return Err(PipelineError::validation(
                        Self::KIND,
                        format!("period must be positive, got 0 for column '{name}'"),
                    ));
                }
                let lag_name = format!("{name}_lag_{period}");
                if !names_taken.insert(lag_name.clone()) {
                    return Err(PipelineError::validation(
                        Self::KIND,
                        format!("duplicate output column '{lag_name}'"),
                    ));
                }
                let mut shifted = source.shift(period as i64);
                shifted.rename(lag_name.into());
                generated.push(shifted.into());
            }
        }

        df.hstack_mut(&generated)?;
        TimeSeriesData::new(df, Some(&time_column))
    }
}
