// crates/sensorpipe-core/src/pipeline.rs

use std::fmt;
use std::path::Path;

use crate::config::{OperationConfig, PipelineConfig, PipelineSection};
use crate::data::TimeSeriesData;
use crate::error::{PipelineError, Result};
use crate::ops::Operation;

/// An ordered, reusable sequence of operations. Carries no execution state:
/// every `process` call is an independent fold, so one instance can serve
/// many datasets (and many threads, read-only) without cross-contamination.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    name: String,
    operations: Vec<Operation>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
        }
    }

    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.push(operation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Thread `data` through every operation in declared order. An empty
    /// pipeline is the identity. The first failure aborts the run, wrapped so
    /// the error names the failing step and its kind.
    pub fn process(&self, data: TimeSeriesData) -> Result<TimeSeriesData> {
        let mut data = data;
        for (index, operation) in self.operations.iter().enumerate() {
            tracing::debug!(
                pipeline = %self.name,
                index,
                kind = operation.kind(),
                rows = data.len(),
                "applying operation"
            );
            data = operation
                .apply(data)
                .map_err(|source| PipelineError::Step {
                    index,
                    kind: operation.kind(),
                    source: Box::new(source),
                })?;
        }
        Ok(data)
    }

    /// Decode a configuration document into a runnable pipeline.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        for operation in &config.operations {
            operation.validate()?;
        }
        Ok(Self {
            name: config.pipeline.name,
            operations: config
                .operations
                .into_iter()
                .map(OperationConfig::into_operation)
                .collect(),
        })
    }

    /// Inverse of [`Pipeline::from_config`]: round trips preserve operation
    /// count, kinds, and parameters.
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            pipeline: PipelineSection {
                name: self.name.clone(),
            },
            operations: self
                .operations
                .iter()
                .map(OperationConfig::from_operation)
                .collect(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::from_config(PipelineConfig::from_toml_str(text)?)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let pipeline = Self::from_config(PipelineConfig::from_toml_file(path.as_ref())?)?;
        tracing::debug!(
            pipeline = %pipeline.name,
            operations = pipeline.len(),
            "loaded pipeline configuration"
        );
        Ok(pipeline)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        self.to_config().to_toml_string()
    }

    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_config().to_toml_file(path.as_ref())
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pipeline(name='{}', {} operations)",
            self.name,
            self.len()
        )
    }
}
