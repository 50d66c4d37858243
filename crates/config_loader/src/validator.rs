//! Configuration validation
//!
//! Rules:
//! - merge.lookahead_capacity >= 1
//! - sources.count >= 1
//! - sources.history_days_min <= sources.history_days_max
//! - sources.max_step_hours > 0 and finite
//! - sources.latency_ms_min <= sources.latency_ms_max

use contracts::{ContractError, GeneratorConfig, MergeBlueprint, MergeConfig};

/// Validate a parsed blueprint
///
/// Returns the first error encountered.
pub fn validate(blueprint: &MergeBlueprint) -> Result<(), ContractError> {
    validate_merge(&blueprint.merge)?;
    validate_sources(&blueprint.sources)?;
    Ok(())
}

fn validate_merge(merge: &MergeConfig) -> Result<(), ContractError> {
    if merge.lookahead_capacity == 0 {
        return Err(ContractError::config_validation(
            "merge.lookahead_capacity",
            "lookahead_capacity must be >= 1",
        ));
    }
    Ok(())
}

fn validate_sources(sources: &GeneratorConfig) -> Result<(), ContractError> {
    if sources.count == 0 {
        return Err(ContractError::config_validation(
            "sources.count",
            "at least one source is required",
        ));
    }

    if sources.history_days_min > sources.history_days_max {
        return Err(ContractError::config_validation(
            "sources.history_days_min / sources.history_days_max",
            format!(
                "history_days_min ({}) must be <= history_days_max ({})",
                sources.history_days_min, sources.history_days_max
            ),
        ));
    }

    if !(sources.max_step_hours.is_finite() && sources.max_step_hours > 0.0) {
        return Err(ContractError::config_validation(
            "sources.max_step_hours",
            format!(
                "max_step_hours must be > 0, got {}",
                sources.max_step_hours
            ),
        ));
    }

    if sources.latency_ms_min > sources.latency_ms_max {
        return Err(ContractError::config_validation(
            "sources.latency_ms_min / sources.latency_ms_max",
            format!(
                "latency_ms_min ({}) must be <= latency_ms_max ({})",
                sources.latency_ms_min, sources.latency_ms_max
            ),
        ));
    }

    Ok(())
}
