//! `run` command implementation.

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use contracts::MergeBlueprint;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_merge(args: &RunArgs) -> Result<()> {
    let mut blueprint = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => {
            info!("No configuration file given, using defaults");
            MergeBlueprint::default()
        }
    };

    apply_overrides(&mut blueprint, args);
    ConfigLoader::validate(&blueprint).context("Invalid configuration after CLI overrides")?;

    info!(
        mode = blueprint.mode.as_str(),
        sources = blueprint.sources.count,
        lookahead = blueprint.merge.lookahead_capacity,
        ordering = ?blueprint.merge.ordering,
        printer = ?blueprint.printer.kind,
        "Configuration loaded"
    );

    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    let pipeline = Pipeline::new(PipelineConfig {
        blueprint,
        metrics_port: (args.metrics_port != 0).then_some(args.metrics_port),
    });

    tokio::select! {
        result = pipeline.run() => {
            let summary = result.context("Merge run failed")?;
            info!(
                emitted = summary.report.emitted,
                out_of_order = summary.report.out_of_order,
                duration_secs = summary.report.elapsed.as_secs_f64(),
                rate = format!("{:.2}", summary.report.rate()),
                "Merge completed successfully"
            );
            summary.print_summary();
        }
        _ = shutdown_signal() => {
            warn!("Received shutdown signal, stopping merge...");
        }
    }

    Ok(())
}

/// Apply command-line overrides on top of the loaded blueprint
fn apply_overrides(blueprint: &mut MergeBlueprint, args: &RunArgs) {
    if let Some(mode) = args.mode {
        blueprint.mode = mode.into();
    }
    if let Some(count) = args.sources {
        blueprint.sources.count = count;
    }
    if let Some(capacity) = args.lookahead {
        blueprint.merge.lookahead_capacity = capacity;
    }
    if let Some(ordering) = args.ordering {
        blueprint.merge.ordering = ordering.into();
    }
    if let Some(seed) = args.seed {
        blueprint.sources.seed = Some(seed);
    }
    if let Some(kind) = args.printer {
        blueprint.printer.kind = kind.into();
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &MergeBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Mode: {}", blueprint.mode.as_str());
    println!("\nMerge:");
    println!("  Look-ahead capacity: {}", blueprint.merge.lookahead_capacity);
    println!("  Ordering policy: {:?}", blueprint.merge.ordering);
    println!("\nSources ({}):", blueprint.sources.count);
    println!(
        "  History: {}..={} days",
        blueprint.sources.history_days_min, blueprint.sources.history_days_max
    );
    println!("  Max step: {}h", blueprint.sources.max_step_hours);
    println!(
        "  Latency: {}..={} ms",
        blueprint.sources.latency_ms_min, blueprint.sources.latency_ms_max
    );
    match blueprint.sources.seed {
        Some(seed) => println!("  Seed: {seed}"),
        None => println!("  Seed: random"),
    }
    println!("\nPrinter: {:?}", blueprint.printer.kind);
    println!();
}
