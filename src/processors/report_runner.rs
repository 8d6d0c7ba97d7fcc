use crate::error::{ProcessingError, Result};
use crate::index::JoinIndex;
use crate::models::FlightDataset;
use crate::reports::{ReportEngine, ReportKind, ReportParams};
use crate::utils::progress::ProgressReporter;
use crate::writers::{ResultSink, WriteMode};
use std::time::Instant;
use tracing::info;

/// One persisted result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub kind: ReportKind,
    pub table_name: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub tables: Vec<TableSummary>,
}

impl RunSummary {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    pub fn rows_for(&self, kind: ReportKind) -> Option<usize> {
        self.tables.iter().find(|t| t.kind == kind).map(|t| t.rows)
    }
}

/// Computes the selected reports in parallel and hands each result to a sink.
pub struct ReportRunner {
    max_workers: usize,
    write_mode: WriteMode,
    kinds: Vec<ReportKind>,
    params: ReportParams,
}

impl Default for ReportRunner {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl ReportRunner {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            write_mode: WriteMode::default(),
            kinds: ReportKind::ALL.to_vec(),
            params: ReportParams::default(),
        }
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn with_reports(mut self, kinds: Vec<ReportKind>) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn with_params(mut self, params: ReportParams) -> Self {
        self.params = params;
        self
    }

    pub fn reports(&self) -> &[ReportKind] {
        &self.kinds
    }

    /// Evaluate every selected report over `dataset`, then persist the results
    /// in selection order. The first sink failure aborts the run.
    pub fn run(
        &self,
        dataset: &FlightDataset,
        sink: &dyn ResultSink,
        progress: Option<&ProgressReporter>,
    ) -> Result<RunSummary> {
        let started = Instant::now();

        if let Some(p) = progress {
            p.set_message("Building lookup index...");
        }
        let index = JoinIndex::from_dataset(dataset);

        if let Some(p) = progress {
            p.set_message(&format!("Computing {} reports...", self.kinds.len()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let engine = ReportEngine::new(&dataset.flights, &index).with_params(self.params);
        let outputs = pool.install(|| engine.run_all(&self.kinds));

        info!(
            "Computed {} reports over {} flights in {:.2?}",
            outputs.len(),
            dataset.flights.len(),
            started.elapsed()
        );

        let mut summary = RunSummary::default();
        for output in &outputs {
            let kind = output.kind();
            let table_name = kind.table_name();

            if let Some(p) = progress {
                p.set_message(&format!("Writing {}...", table_name));
            }
            sink.persist(table_name, output, self.write_mode)?;

            summary.tables.push(TableSummary {
                kind,
                table_name: table_name.to_string(),
                rows: output.len(),
            });

            if let Some(p) = progress {
                p.table_written(table_name, output.len());
            }
        }

        if let Some(p) = progress {
            p.finish_with_message(&format!("Wrote {} tables", summary.tables.len()));
        }

        Ok(summary)
    }
}
