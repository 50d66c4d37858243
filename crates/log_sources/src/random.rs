//! Random log source
//!
//! Each source starts somewhere between `history_days_max` and
//! `history_days_min` days before its horizon (construction time by default)
//! and walks forward by up to `max_step_hours` per entry. It is drained once
//! the next step would pass the horizon.

use std::ops::RangeInclusive;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use contracts::{AsyncLogSource, ContractError, GeneratorConfig, LogEntry, LogSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const MS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;
const LATENCY_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

const WORDS: &[&str] = &[
    "request", "served", "cache", "miss", "retry", "timeout", "user", "login", "shard",
    "flushed", "queue", "drained", "worker", "spawned", "checkpoint", "written", "lease",
    "renewed", "socket", "closed",
];

/// Randomly generated, time-ordered log source
#[derive(Debug)]
pub struct RandomLogSource {
    id: String,
    rng: StdRng,
    latency_rng: StdRng,
    next_date: Option<DateTime<Utc>>,
    horizon: DateTime<Utc>,
    max_step_ms: i64,
    latency_ms: RangeInclusive<u64>,
    produced: u64,
}

impl RandomLogSource {
    /// Create a source whose horizon is now
    pub fn new(id: impl Into<String>, config: &GeneratorConfig, seed: u64) -> Self {
        Self::with_horizon(id, config, seed, Utc::now())
    }

    /// Create a source with an explicit horizon
    pub fn with_horizon(
        id: impl Into<String>,
        config: &GeneratorConfig,
        seed: u64,
        horizon: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        let mut rng = StdRng::seed_from_u64(seed);
        let latency_rng = StdRng::seed_from_u64(seed ^ LATENCY_SEED_SALT);

        let days_lo = config.history_days_min.min(config.history_days_max) as i64;
        let days_hi = config.history_days_min.max(config.history_days_max) as i64;
        let back_ms = rng.random_range(days_lo * MS_PER_DAY..=days_hi * MS_PER_DAY);
        let next_date = horizon.checked_sub_signed(TimeDelta::milliseconds(back_ms));

        let max_step_ms = ((config.max_step_hours * MS_PER_HOUR) as i64).max(1);
        let latency_ms = config.latency_ms_min.min(config.latency_ms_max)
            ..=config.latency_ms_min.max(config.latency_ms_max);

        debug!(
            source = %id,
            start = ?next_date,
            %horizon,
            max_step_ms,
            "random log source created"
        );

        Self {
            id,
            rng,
            latency_rng,
            next_date,
            horizon,
            max_step_ms,
            latency_ms,
            produced: 0,
        }
    }

    /// Build `config.count` sources
    ///
    /// With `config.seed` set, source `i` uses `seed + i` and runs are reproducible.
    pub fn from_config(config: &GeneratorConfig) -> Vec<Self> {
        let horizon = Utc::now();
        let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());

        (0..config.count)
            .map(|i| {
                Self::with_horizon(
                    format!("source-{i}"),
                    config,
                    base_seed.wrapping_add(i as u64),
                    horizon,
                )
            })
            .collect()
    }

    /// Source identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Entries produced so far
    pub fn produced(&self) -> u64 {
        self.produced
    }

    /// Whether every entry has been produced
    pub fn is_drained(&self) -> bool {
        self.next_date.is_none()
    }

    fn message(&mut self) -> String {
        let words: Vec<&str> = (0..3)
            .map(|_| WORDS[self.rng.random_range(0..WORDS.len())])
            .collect();
        format!("{} #{}: {}", self.id, self.produced, words.join(" "))
    }
}

impl LogSource for RandomLogSource {
    fn pop(&mut self) -> Option<LogEntry> {
        let date = self.next_date?;
        let entry = LogEntry::new(date, self.message());
        self.produced += 1;

        let step = TimeDelta::milliseconds(self.rng.random_range(0..=self.max_step_ms));
        self.next_date = date
            .checked_add_signed(step)
            .filter(|next| *next <= self.horizon);

        if self.next_date.is_none() {
            debug!(source = %self.id, produced = self.produced, "random log source drained");
        }
        Some(entry)
    }
}

impl AsyncLogSource for RandomLogSource {
    async fn pop_async(&mut self) -> Result<Option<LogEntry>, ContractError> {
        let latency = self.latency_rng.random_range(self.latency_ms.clone());
        trace!(source = %self.id, latency_ms = latency, "simulated fetch");
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        Ok(self.pop())
    }
}
