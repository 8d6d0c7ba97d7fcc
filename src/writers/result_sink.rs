use crate::error::{ProcessingError, Result};
use crate::reports::ReportOutput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// What to do when a result table already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    #[default]
    Overwrite,
    ErrorIfExists,
}

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "overwrite" => Ok(WriteMode::Overwrite),
            "error_if_exists" | "error" => Ok(WriteMode::ErrorIfExists),
            other => Err(format!("unknown write mode '{}'", other)),
        }
    }
}

/// File format of persisted result tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Parquet,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Parquet => "parquet",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parquet" => Ok(OutputFormat::Parquet),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Destination for computed report tables.
///
/// Persisting the same rows under the same name twice with
/// [`WriteMode::Overwrite`] must leave the same result as persisting once.
pub trait ResultSink: Send + Sync {
    fn persist(&self, table_name: &str, rows: &ReportOutput, mode: WriteMode) -> Result<()>;
}

/// Create the parent directory of `path` and enforce `mode` against an existing file.
pub fn prepare_target(path: &Path, mode: WriteMode) -> Result<()> {
    if mode == WriteMode::ErrorIfExists && path.exists() {
        return Err(ProcessingError::OutputExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    Ok(())
}
