pub mod csv_sink;
pub mod memory_sink;
pub mod parquet_sink;
pub mod record_batch;
pub mod result_sink;

pub use csv_sink::CsvSink;
pub use memory_sink::MemorySink;
pub use parquet_sink::{ParquetFileInfo, ParquetSink};
pub use record_batch::{report_schema, report_to_batch};
pub use result_sink::{prepare_target, OutputFormat, ResultSink, WriteMode};
