//! Process configuration, read from `PHARMAGUARD_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use pharmaguard_ai::{CompletionClient, DEFAULT_CONTEXT_LIMIT, OfflineCompletionClient};
use pharmaguard_infra::{
    CachedSource, CsvInventorySource, HttpCompletionClient, HttpCompletionConfig,
    InventorySource, SampleInventorySource,
};
use pharmaguard_inventory::{DirectUsage, LookupUsage, StockMagnitudeUsage, UsageStrategy};
use pharmaguard_observability::LogFormat;

pub const DEFAULT_QUESTION: &str = "Which location has the highest risk of insulin shortage?";

/// Which policy supplies `daily_usage_avg`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UsageStrategyKind {
    Direct,
    Lookup,
    Heuristic,
}

impl FromStr for UsageStrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "lookup" => Ok(Self::Lookup),
            "heuristic" => Ok(Self::Heuristic),
            other => Err(format!("unknown usage strategy '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// CSV file with the inventory table; `None` uses the built-in sample.
    pub data_path: Option<PathBuf>,
    pub cache_ttl: Duration,
    pub usage_strategy: UsageStrategyKind,
    pub usage_seed: u64,
    pub default_usage: f64,
    /// Remote model; `None` answers every question from local data.
    pub llm: Option<HttpCompletionConfig>,
    pub context_limit: usize,
    pub question: String,
    pub export_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values are logged and
    /// replaced by their defaults.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let llm = non_empty("PHARMAGUARD_LLM_ENDPOINT").map(|endpoint| HttpCompletionConfig {
            endpoint,
            model: non_empty("PHARMAGUARD_LLM_MODEL")
                .unwrap_or_else(|| "mistral-large".to_string()),
            api_key: non_empty("PHARMAGUARD_LLM_API_KEY"),
            timeout: Duration::from_secs(parse_or(&get, "PHARMAGUARD_LLM_TIMEOUT_SECS", 20)),
        });

        Self {
            data_path: non_empty("PHARMAGUARD_DATA_PATH").map(PathBuf::from),
            cache_ttl: Duration::from_secs(parse_or(&get, "PHARMAGUARD_CACHE_TTL_SECS", 300)),
            usage_strategy: parse_or(&get, "PHARMAGUARD_USAGE_STRATEGY", UsageStrategyKind::Direct),
            usage_seed: parse_or(&get, "PHARMAGUARD_USAGE_SEED", 42),
            default_usage: parse_or(&get, "PHARMAGUARD_DEFAULT_USAGE", 5.0),
            llm,
            context_limit: parse_or(&get, "PHARMAGUARD_CONTEXT_LIMIT", DEFAULT_CONTEXT_LIMIT),
            question: non_empty("PHARMAGUARD_QUESTION")
                .unwrap_or_else(|| DEFAULT_QUESTION.to_string()),
            export_path: non_empty("PHARMAGUARD_EXPORT_PATH").map(PathBuf::from),
            log_format: parse_or(&get, "PHARMAGUARD_LOG_FORMAT", LogFormat::Json),
        }
    }

    pub fn usage_strategy(&self) -> Box<dyn UsageStrategy> {
        match self.usage_strategy {
            UsageStrategyKind::Direct => Box::new(DirectUsage),
            UsageStrategyKind::Lookup => Box::new(LookupUsage::formulary(self.default_usage)),
            UsageStrategyKind::Heuristic => Box::new(StockMagnitudeUsage::new(self.usage_seed)),
        }
    }

    pub fn inventory_source(&self) -> Box<dyn InventorySource> {
        match &self.data_path {
            Some(path) => Box::new(CachedSource::new(
                CsvInventorySource::new(path),
                self.cache_ttl,
            )),
            None => Box::new(CachedSource::new(SampleInventorySource, self.cache_ttl)),
        }
    }

    /// The configured remote client, or the offline client when none is set
    /// or it cannot be built.
    pub fn completion_client(&self) -> Box<dyn CompletionClient> {
        let Some(llm) = &self.llm else {
            return Box::new(OfflineCompletionClient);
        };
        match HttpCompletionClient::new(llm.clone()) {
            Ok(client) => Box::new(client),
            Err(e) => {
                warn!(error = %e, "remote model client unavailable; answers will use local data");
                Box::new(OfflineCompletionClient)
            }
        }
    }
}

fn parse_or<T, F>(get: &F, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) if !raw.trim().is_empty() => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                warn!(key, value = %raw, error = %e, "invalid configuration value; using default");
                default
            }
        },
        _ => default,
    }
}
