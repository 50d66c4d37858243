//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{MergeBlueprint, MergeMode};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    mode: String,
    source_count: usize,
    lookahead_capacity: usize,
    ordering: String,
    printer: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: (!warnings.is_empty()).then_some(warnings),
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    mode: blueprint.mode.as_str().to_string(),
                    source_count: blueprint.sources.count,
                    lookahead_capacity: blueprint.merge.lookahead_capacity,
                    ordering: format!("{:?}", blueprint.merge.ordering),
                    printer: format!("{:?}", blueprint.printer.kind),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &MergeBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.mode == MergeMode::Sync && blueprint.sources.latency_ms_max > 0 {
        warnings.push("sources.latency_ms_* is ignored in sync mode".to_string());
    }

    if blueprint.mode == MergeMode::Async && blueprint.merge.lookahead_capacity == 1 {
        warnings.push(
            "merge.lookahead_capacity = 1 leaves no read-ahead beyond the pending entry"
                .to_string(),
        );
    }

    if blueprint.sources.seed.is_none() {
        warnings.push("sources.seed is unset - runs are not reproducible".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Mode: {}", summary.mode);
            println!("  Sources: {}", summary.source_count);
            println!("  Look-ahead capacity: {}", summary.lookahead_capacity);
            println!("  Ordering: {}", summary.ordering);
            println!("  Printer: {}", summary.printer);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\nWarnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
