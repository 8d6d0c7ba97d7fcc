use crate::error::Result;
use crate::reports::ReportOutput;
use crate::utils::filename::table_path;
use crate::writers::{prepare_target, report_to_batch, ResultSink, WriteMode};
use arrow::csv::WriterBuilder;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

/// Writes each result table to `<output_dir>/<table>.csv` with a header row.
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn table_path(&self, table_name: &str) -> PathBuf {
        table_path(&self.output_dir, table_name, "csv")
    }
}

impl ResultSink for CsvSink {
    fn persist(&self, table_name: &str, rows: &ReportOutput, mode: WriteMode) -> Result<()> {
        let path = self.table_path(table_name);
        prepare_target(&path, mode)?;

        let batch = report_to_batch(rows)?;
        let file = File::create(&path)?;
        let mut writer = WriterBuilder::new().with_header(true).build(file);
        writer.write(&batch)?;

        info!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DelayCause;
    use crate::reports::{DelayReasonAverage, MonthlyFlightCount};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_writes_header_and_rows() -> Result<()> {
        let dir = TempDir::new()?;
        let sink = CsvSink::new(dir.path());
        let rows = ReportOutput::DelayReasons(vec![DelayReasonAverage {
            airport: "Newark Liberty International Airport".to_string(),
            delay_reason: DelayCause::Weather,
            avg_delay: Some(12.5),
        }]);

        sink.persist("delays", &rows, WriteMode::Overwrite)?;
        let text = std::fs::read_to_string(sink.table_path("delays"))?;
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "airport,delay_reason,avg_delay");
        assert_eq!(lines[1], "Newark Liberty International Airport,Weather Delay,12.5");
        Ok(())
    }

    #[test]
    fn test_dates_and_missing_values() -> Result<()> {
        let dir = TempDir::new()?;
        let sink = CsvSink::new(dir.path());
        let rows = ReportOutput::MonthlyFlightCounts(vec![MonthlyFlightCount {
            airline: "Virgin America".to_string(),
            origin_airport: "San Francisco International Airport".to_string(),
            month: NaiveDate::from_ymd_opt(2015, 3, 1),
            flight_count: 40,
        }]);

        sink.persist("monthly", &rows, WriteMode::Overwrite)?;
        let text = std::fs::read_to_string(sink.table_path("monthly"))?;

        assert!(text.contains("Virgin America,San Francisco International Airport,2015-03-01,40"));
        Ok(())
    }

    #[test]
    fn test_empty_table_keeps_header() -> Result<()> {
        let dir = TempDir::new()?;
        let sink = CsvSink::new(dir.path());

        sink.persist("routes", &ReportOutput::UniqueRoutes(Vec::new()), WriteMode::Overwrite)?;
        let text = std::fs::read_to_string(sink.table_path("routes"))?;

        assert_eq!(text.trim(), "airline,unique_routes_count");
        Ok(())
    }
}
