//! Run configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `FLIGHTPERF_*` environment variables. Command-line flags are applied on
//! top by the CLI.

use crate::error::Result;
use crate::readers::{CsvDatasetLoader, Dataset};
use crate::reports::ReportParams;
use crate::utils::constants::{
    AIRLINES_FILE, AIRPORTS_FILE, COMPRESSION_SNAPPY, DEFAULT_DATA_DIR, ENV_PREFIX, FLIGHTS_FILE,
    ON_TIME_THRESHOLD_MINUTES, REPORT_YEAR,
};
use crate::utils::filename::generate_default_output_dir;
use crate::writers::{OutputFormat, WriteMode};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalysisConfig {
    pub data_dir: PathBuf,

    #[validate(length(min = 1))]
    pub airlines_file: String,

    #[validate(length(min = 1))]
    pub airports_file: String,

    #[validate(length(min = 1))]
    pub flights_file: String,

    pub output_dir: PathBuf,

    pub output_format: OutputFormat,

    pub compression: String,

    pub write_mode: WriteMode,

    #[validate(range(min = 1, max = 1024))]
    pub max_workers: usize,

    #[validate(range(min = 1900, max = 2100))]
    pub report_year: i32,

    #[validate(range(min = 0, max = 1440))]
    pub on_time_threshold_minutes: i32,

    pub strict: bool,
}

impl AnalysisConfig {
    /// Load configuration from defaults, an optional file, and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("airlines_file", AIRLINES_FILE)?
            .set_default("airports_file", AIRPORTS_FILE)?
            .set_default("flights_file", FLIGHTS_FILE)?
            .set_default(
                "output_dir",
                generate_default_output_dir().to_string_lossy().to_string(),
            )?
            .set_default("output_format", "parquet")?
            .set_default("compression", COMPRESSION_SNAPPY)?
            .set_default("write_mode", "overwrite")?
            .set_default("max_workers", num_cpus::get() as i64)?
            .set_default("report_year", i64::from(REPORT_YEAR))?
            .set_default("on_time_threshold_minutes", i64::from(ON_TIME_THRESHOLD_MINUTES))?
            .set_default("strict", false)?;

        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let config: AnalysisConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn report_params(&self) -> ReportParams {
        ReportParams {
            year: self.report_year,
            on_time_threshold: self.on_time_threshold_minutes,
        }
    }

    pub fn loader(&self) -> CsvDatasetLoader {
        CsvDatasetLoader::new(&self.data_dir)
            .with_file_name(Dataset::Airlines, &self.airlines_file)
            .with_file_name(Dataset::Airports, &self.airports_file)
            .with_file_name(Dataset::Flights, &self.flights_file)
            .with_strict(self.strict)
    }
}
