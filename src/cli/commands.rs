use crate::cli::args::{Cli, Commands, DataArgs};
use crate::config::AnalysisConfig;
use crate::error::{ProcessingError, Result};
use crate::index::JoinIndex;
use crate::models::FlightDataset;
use crate::processors::{IntegrityChecker, ReportRunner};
use crate::readers::load_dataset_concurrently;
use crate::reports::render::render_text;
use crate::reports::{ReportEngine, ReportKind};
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvSink, OutputFormat, ParquetSink, WriteMode};
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(&cli)?;

    let mut config = AnalysisConfig::load(cli.config.as_deref())?;
    let silent = cli.quiet;

    match cli.command {
        Commands::Run {
            data,
            output_dir,
            format,
            compression,
            reports,
            no_overwrite,
        } => {
            apply_data_args(&mut config, &data);
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if let Some(format) = format {
                config.output_format = format;
            }
            if let Some(compression) = compression {
                config.compression = compression;
            }
            if no_overwrite {
                config.write_mode = WriteMode::ErrorIfExists;
            }

            let dataset = load(&config, silent).await?;
            report_integrity(&dataset, silent);

            let kinds = if reports.is_empty() {
                ReportKind::ALL.to_vec()
            } else {
                reports
            };

            println!("Output directory: {}", config.output_dir.display());
            println!("Workers: {}, Format: {}", config.max_workers, config.output_format);

            let runner = ReportRunner::new(config.max_workers)
                .with_write_mode(config.write_mode)
                .with_reports(kinds)
                .with_params(config.report_params());

            let progress = ProgressReporter::new(
                runner.reports().len() as u64,
                "Computing reports...",
                silent,
            );

            match config.output_format {
                OutputFormat::Parquet => {
                    let sink = ParquetSink::new(&config.output_dir)
                        .with_compression(&config.compression)?;
                    let summary = runner.run(&dataset, &sink, Some(&progress))?;

                    println!();
                    for table in &summary.tables {
                        let info = sink.file_info(&sink.table_path(&table.table_name))?;
                        println!("{}: {}", table.table_name, info.summary());
                    }
                    println!("Total rows: {}", summary.total_rows());
                }
                OutputFormat::Csv => {
                    let sink = CsvSink::new(&config.output_dir);
                    let summary = runner.run(&dataset, &sink, Some(&progress))?;

                    println!();
                    for table in &summary.tables {
                        println!(
                            "{}: {} rows -> {}",
                            table.table_name,
                            table.rows,
                            sink.table_path(&table.table_name).display()
                        );
                    }
                    println!("Total rows: {}", summary.total_rows());
                }
            }

            println!("Reports complete!");
        }

        Commands::Report {
            kind,
            data,
            json,
            limit,
        } => {
            apply_data_args(&mut config, &data);
            let dataset = load(&config, silent).await?;

            let index = JoinIndex::from_dataset(&dataset);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.max_workers)
                .build()
                .map_err(|e| ProcessingError::Config(e.to_string()))?;

            let engine =
                ReportEngine::new(&dataset.flights, &index).with_params(config.report_params());
            let output = pool.install(|| engine.run(kind));

            if json {
                let rendered = match limit {
                    Some(n) => {
                        let value = serde_json::to_value(&output)?;
                        let rows: Vec<_> = value
                            .as_array()
                            .map(|rows| rows.iter().take(n).cloned().collect())
                            .unwrap_or_default();
                        serde_json::to_string_pretty(&rows)?
                    }
                    None => serde_json::to_string_pretty(&output)?,
                };
                println!("{}", rendered);
            } else {
                print!("{}", render_text(&output, limit));
            }
        }

        Commands::Validate { data } => {
            apply_data_args(&mut config, &data);
            let dataset = load(&config, silent).await?;

            let checker = IntegrityChecker::new();
            let report = checker.check(&dataset);
            println!("\n{}", checker.generate_summary(&report));

            if report.is_clean() {
                println!("All records passed integrity checks");
            } else {
                println!(
                    "{} flight references do not resolve and will be dropped from joined reports",
                    report.unresolved_total()
                );
            }
        }
    }

    Ok(())
}

fn apply_data_args(config: &mut AnalysisConfig, data: &DataArgs) {
    if let Some(dir) = &data.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(workers) = data.max_workers {
        config.max_workers = workers.max(1);
    }
    if data.strict {
        config.strict = true;
    }
}

async fn load(config: &AnalysisConfig, silent: bool) -> Result<FlightDataset> {
    info!("Loading datasets from {}", config.data_dir.display());

    let progress = ProgressReporter::new_spinner("Loading datasets...", silent);
    let dataset = load_dataset_concurrently(Arc::new(config.loader())).await?;
    progress.finish_with_message(&format!("Loaded {}", dataset.summary()));

    if dataset.is_empty() {
        warn!("No flights loaded; reports will be empty");
    }

    Ok(dataset)
}

fn report_integrity(dataset: &FlightDataset, silent: bool) {
    let checker = IntegrityChecker::new();
    let report = checker.check(dataset);

    if report.unresolved_total() > 0 {
        warn!(
            "{} flight references do not resolve and will be dropped from joined reports",
            report.unresolved_total()
        );
    }

    if !silent {
        println!("\n{}", checker.generate_summary(&report));
    }
}

/// Set up structured logging to stderr, and to `--log-file` when given.
fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = cli.log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("flight_performance={}", log_level)));

    let file_layer = match &cli.log_file {
        Some(path) => Some(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(File::options().create(true).append(true).open(path)?)
}
