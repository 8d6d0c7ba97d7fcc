use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

use crate::utils::constants::DEFAULT_OUTPUT_ROOT;

/// Generate default output directory with format: output/flight-reports-{YYMMDD}
pub fn generate_default_output_dir() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let dirname = format!("flight-reports-{:02}{:02}{:02}", year, month, day);
    PathBuf::from(DEFAULT_OUTPUT_ROOT).join(dirname)
}

/// Path of a result table file inside `output_dir`
pub fn table_path(output_dir: &Path, table_name: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", table_name, extension))
}
