//! MergeBlueprint - Config Loader output
//!
//! Describes a complete merge run: engine settings, draining mode, how the
//! demo sources are generated and where merged entries go.

use serde::{Deserialize, Serialize};

use crate::{MergeConfig, MergeMode};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete run blueprint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Draining protocol
    #[serde(default)]
    pub mode: MergeMode,

    /// Engine settings
    #[serde(default)]
    pub merge: MergeConfig,

    /// Generated source settings
    #[serde(default)]
    pub sources: GeneratorConfig,

    /// Output settings
    #[serde(default)]
    pub printer: PrinterConfig,
}

/// Random source generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of sources
    #[serde(default = "default_source_count")]
    pub count: usize,

    /// Lower bound of how far back a source starts (days)
    #[serde(default = "default_history_days_min")]
    pub history_days_min: u32,

    /// Upper bound of how far back a source starts (days)
    #[serde(default = "default_history_days_max")]
    pub history_days_max: u32,

    /// Largest gap between consecutive entries of one source (hours), must be > 0
    #[serde(default = "default_max_step_hours")]
    pub max_step_hours: f64,

    /// Simulated fetch latency lower bound (async mode)
    #[serde(default)]
    pub latency_ms_min: u64,

    /// Simulated fetch latency upper bound (async mode)
    #[serde(default = "default_latency_ms_max")]
    pub latency_ms_max: u64,

    /// RNG seed; each source derives its own seed from it
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_source_count() -> usize {
    100
}

fn default_history_days_min() -> u32 {
    40
}

fn default_history_days_max() -> u32 {
    60
}

fn default_max_step_hours() -> f64 {
    10.0
}

fn default_latency_ms_max() -> u64 {
    8
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: default_source_count(),
            history_days_min: default_history_days_min(),
            history_days_max: default_history_days_max(),
            max_step_hours: default_max_step_hours(),
            latency_ms_min: 0,
            latency_ms_max: default_latency_ms_max(),
            seed: None,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterConfig {
    /// Printer kind
    #[serde(default)]
    pub kind: PrinterKind,
}

/// Available printers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterKind {
    /// Log every entry through tracing
    Log,
    /// Only count and verify order, print a summary
    #[default]
    Stats,
}
