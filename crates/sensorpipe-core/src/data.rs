// crates/sensorpipe-core/src/data.rs

use std::fmt;
use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::{PipelineError, Result};

/// Conventional time column names, probed in priority order when no explicit
/// name is given.
const TIME_COLUMN_CANDIDATES: [&str; 10] = [
    "DateTime",
    "datetime",
    "tagTime",
    "tagtime",
    "timestamp",
    "Timestamp",
    "time",
    "Time",
    "date",
    "Date",
];

/// A tabular time-series snapshot: one time column plus feature columns.
///
/// Instances are immutable; every transformation produces a new value over a
/// new frame, so a single instance can be shared freely across pipelines.
#[derive(Debug, Clone)]
pub struct TimeSeriesData {
    df: DataFrame,
    time_column: String,
    feature_columns: Vec<String>,
}

impl TimeSeriesData {
    /// Wrap a DataFrame, resolving the time column.
    ///
    /// An explicit `time_column` must exist and hold a temporal dtype.
    /// Without one, the conventional names in [`TIME_COLUMN_CANDIDATES`] are
    /// probed in order; failing that, a single temporal-typed column is
    /// accepted. Anything else is a schema error.
    pub fn new(df: DataFrame, time_column: Option<&str>) -> Result<Self> {
        let time_column = match time_column {
            Some(name) => {
                if !has_column(&df, name) {
                    return Err(PipelineError::schema(format!(
                        "explicit time column '{name}' not found in data"
                    )));
                }
                name.to_string()
            }
            None => detect_time_column(&df)?,
        };

        let dtype = df.column(&time_column)?.dtype().clone();
        if !is_temporal_dtype(&dtype) {
            return Err(PipelineError::schema(format!(
                "time column '{time_column}' has non-temporal type {dtype:?}"
            )));
        }

        let feature_columns = df
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != time_column)
            .map(|name| name.to_string())
            .collect();

        Ok(Self {
            df,
            time_column,
            feature_columns,
        })
    }

    /// Load from a CSV file, parsing date-like columns, then resolve the time
    /// column as in [`TimeSeriesData::new`].
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
            .into_reader_with_file_handle(file)
            .finish()?;
        Self::new(df, None)
    }

    /// Load from a Parquet file.
    pub fn from_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let df = ParquetReader::new(file).finish()?;
        Self::new(df, None)
    }

    /// Write the full frame to CSV, original column order.
    ///
    /// CSV round trips may lose sub-second timestamp precision; Parquet keeps
    /// the temporal dtype exact.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut df = self.df.clone();
        CsvWriter::new(file).include_header(true).finish(&mut df)?;
        Ok(())
    }

    /// Write the full frame to Parquet.
    pub fn to_parquet<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut df = self.df.clone();
        ParquetWriter::new(file).finish(&mut df)?;
        Ok(())
    }

    pub fn time_column(&self) -> &str {
        &self.time_column
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Borrow the underlying frame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Owned copy of the underlying frame.
    pub fn to_polars(&self) -> DataFrame {
        self.df.clone()
    }

    /// Consume self, returning the underlying frame.
    pub fn into_polars(self) -> DataFrame {
        self.df
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.is_empty()
    }

    /// First `n` rows (default 5).
    pub fn head(&self, n: Option<usize>) -> DataFrame {
        self.df.head(Some(n.unwrap_or(5)))
    }

    /// Last `n` rows (default 5).
    pub fn tail(&self, n: Option<usize>) -> DataFrame {
        self.df.tail(Some(n.unwrap_or(5)))
    }

    /// Summary statistics for the numeric feature columns, one statistic per
    /// row. Safe on zero-row data: aggregates come back null.
    pub fn describe(&self) -> Result<DataFrame> {
        const STATISTICS: [&str; 6] = ["count", "null_count", "mean", "std", "min", "max"];

        let mut columns: Vec<Column> = vec![Series::new(
            "statistic".into(),
            STATISTICS.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )
        .into()];

        for name in &self.feature_columns {
            let series = self.df.column(name)?.as_materialized_series();
            if !series.dtype().is_primitive_numeric() {
                continue;
            }
            let cast = series.cast(&DataType::Float64)?;
            let values = cast.f64()?;
            let stats: Vec<Option<f64>> = vec![
                Some((series.len() - series.null_count()) as f64),
                Some(series.null_count() as f64),
                values.mean(),
                values.std(1),
                values.min(),
                values.max(),
            ];
            columns.push(Series::new(name.as_str().into(), stats).into());
        }

        Ok(DataFrame::new(columns)?)
    }
}

impl fmt::Display for TimeSeriesData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TimeSeriesData({} rows, time_column='{}', {} features)",
            self.len(),
            self.time_column,
            self.feature_columns.len()
        )
    }
}

fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|col| col.as_str() == name)
}

fn is_temporal_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Date | DataType::Datetime(_, _))
}

fn detect_time_column(df: &DataFrame) -> Result<String> {
    for name in &TIME_COLUMN_CANDIDATES {
        if has_column(df, name) {
            return Ok(name.to_string());
        }
    }

    // No conventional name: accept a frame with exactly one temporal column.
    let temporal: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| is_temporal_dtype(col.dtype()))
        .map(|col| col.name().to_string())
        .collect();

    match temporal.as_slice() {
        [only] => Ok(only.clone()),
        [] => Err(PipelineError::schema(
            "no time column given and none of the conventional names matched",
        )),
        many => Err(PipelineError::schema(format!(
            "ambiguous time column: several temporal columns present ({})",
            many.join(", ")
        ))),
    }
}
