pub mod integrity_checker;
pub mod report_runner;

pub use integrity_checker::{IntegrityChecker, IntegrityReport};
pub use report_runner::{ReportRunner, RunSummary, TableSummary};
