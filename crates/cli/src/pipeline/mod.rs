//! Merge run orchestration.
//!
//! Builds the sources and printer a blueprint describes and drives the
//! merger matching its mode.

use std::fmt;

use anyhow::{Context, Result};
use contracts::{MergeBlueprint, MergeMode};
use log_sources::RandomLogSource;
use merge_engine::{AsyncMerger, MergeReport, SyncMerger};
use printer::{create_printer, PrintStats};
use tracing::info;

/// Run configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub blueprint: MergeBlueprint,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: MergeReport,
    pub printed: PrintStats,
}

impl RunSummary {
    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n{self}");
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report)?;
        writeln!(f, "Printer: {}", self.printed)
    }
}

/// Merge pipeline
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Generate sources, merge them and return the summary
    pub async fn run(self) -> Result<RunSummary> {
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        let blueprint = &self.config.blueprint;
        let sources = RandomLogSource::from_config(&blueprint.sources);
        let mut printer = create_printer(&blueprint.printer);

        info!(
            mode = blueprint.mode.as_str(),
            sources = sources.len(),
            lookahead = blueprint.merge.lookahead_capacity,
            "Starting merge"
        );

        let report = match blueprint.mode {
            MergeMode::Sync => {
                let mut sources = sources;
                SyncMerger::new(blueprint.merge.clone())
                    .merge(&mut sources, &mut printer)
                    .context("Synchronous merge failed")?
            }
            MergeMode::Async => AsyncMerger::new(blueprint.merge.clone())
                .merge(sources, &mut printer)
                .await
                .context("Asynchronous merge failed")?,
        };

        Ok(RunSummary {
            report,
            printed: printer.stats(),
        })
    }
}
