use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::animation::{Counter, HeroCounters, DEFAULT_EXIT_INTENT_DELAY};
use crate::scoring::{BenchmarkTable, IndustryBenchmark, ScoringConfig};

pub const DEFAULT_TICK_RATE_MS: u64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,

    /// Benchmark entries merged over the built-in table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmarks: Option<BTreeMap<String, IndustryBenchmark>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counters: Option<CountersConfig>,

    /// How long focus must be away before the exit prompt shows, e.g. "1s"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_intent_delay: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_rate_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CountersConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<CounterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<CounterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<CounterConfig>,
}

/// One animated counter: final value and a humantime duration ("2s", "2500ms").
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CounterConfig {
    pub end: u64,
    pub duration: String,
}

impl CounterConfig {
    fn to_counter(&self) -> Result<Counter> {
        let duration = humantime::parse_duration(self.duration.trim())
            .with_context(|| format!("invalid duration '{}'", self.duration))?;
        Ok(Counter::new(self.end, duration))
    }
}

impl Config {
    /// Scoring rules, built-in values for anything unset
    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    /// Built-in benchmark table with configured entries merged on top
    pub fn benchmark_table(&self) -> BenchmarkTable {
        let mut table = BenchmarkTable::default();
        if let Some(ref overrides) = self.benchmarks {
            table.merge(overrides);
        }
        table
    }

    pub fn exit_intent_delay(&self) -> Result<Duration> {
        match self.exit_intent_delay {
            Some(ref s) => humantime::parse_duration(s.trim())
                .with_context(|| format!("invalid duration '{}'", s)),
            None => Ok(DEFAULT_EXIT_INTENT_DELAY),
        }
    }

    pub fn hero_counters(&self) -> Result<HeroCounters> {
        let mut counters = HeroCounters::default();
        if let Some(ref c) = self.counters {
            if let Some(ref execution) = c.execution {
                counters.execution = execution.to_counter()?;
            }
            if let Some(ref industry) = c.industry {
                counters.industry = industry.to_counter()?;
            }
            if let Some(ref roi) = c.roi {
                counters.roi = roi.to_counter()?;
            }
        }
        Ok(counters)
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.unwrap_or_default()
    }

    pub fn tick_rate_ms(&self) -> u64 {
        self.tick_rate_ms.unwrap_or(DEFAULT_TICK_RATE_MS)
    }
}
