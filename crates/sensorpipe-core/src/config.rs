// crates/sensorpipe-core/src/config.rs
//
// TOML document model for pipelines. Kept separate from the execution types
// so the text format can evolve without touching the engine.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::ops::{FillMethod, FillNull, Lag, Operation, Standardize};

/// Root of a pipeline configuration document:
///
/// ```toml
/// [pipeline]
/// name = "sensor_prep"
///
/// [[operations]]
/// type = "fill_null"
/// method = "forward"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub pipeline: PipelineSection,
    #[serde(default)]
    pub operations: Vec<OperationConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSection {
    pub name: String,
}

/// One `[[operations]]` table, tagged by `type`. Array order is execution
/// order. Unknown tags and missing required fields fail at decode time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationConfig {
    FillNull {
        method: FillMethod,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
    },
    Lag {
        periods: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
    },
    Standardize {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
    },
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PipelineConfig =
            toml::from_str(text).map_err(|err| PipelineError::config(err.to_string()))?;
        for operation in &config.operations {
            operation.validate()?;
        }
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| PipelineError::config(err.to_string()))
    }

    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = self.to_toml_string()?;
        fs::write(path.as_ref(), text)?;
        Ok(())
    }
}

impl OperationConfig {
    /// Structural checks serde cannot express. Failing here keeps bad
    /// configurations a load-time error rather than a process-time one.
    pub fn validate(&self) -> Result<()> {
        if let OperationConfig::Lag { periods, .. } = self {
            if periods.is_empty() {
                return Err(PipelineError::config("lag operation needs at least one period"));
            }
            let mut seen = HashSet::new();
            for &period in periods {
                if period == 0 {
                    return Err(PipelineError::config("lag periods must be positive"));
                }
                if !seen.insert(period) {
                    return Err(PipelineError::config(format!(
                        "duplicate lag period {period}"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn into_operation(self) -> Operation {
        match self {
            OperationConfig::FillNull { method, columns } => {
                Operation::FillNull(FillNull::new(method, columns))
            }
            OperationConfig::Lag { periods, columns } => {
                Operation::Lag(Lag::new(periods, columns))
            }
            OperationConfig::Standardize { columns } => {
                Operation::Standardize(Standardize::new(columns))
            }
        }
    }

    pub fn from_operation(operation: &Operation) -> Self {
        match operation {
            Operation::FillNull(op) => OperationConfig::FillNull {
                method: op.method,
                columns: op.columns.clone(),
            },
            Operation::Lag(op) => OperationConfig::Lag {
                periods: op.periods.clone(),
                columns: op.columns.clone(),
            },
            Operation::Standardize(op) => OperationConfig::Standardize {
                columns: op.columns.clone(),
            },
        }
    }
}
