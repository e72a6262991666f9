use anyhow::{Context, Result, ensure};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};

use crate::parallel::ParallelContext;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Config file looked up in the working directory
pub const REPO_CONFIG: &str = "enumerable.toml";

/// Prefix for environment overrides; nested keys are split on `__`
pub const ENV_PREFIX: &str = "ENUMERABLE_";

const SECTION: &str = "parallel";

/// Settings for the parallel engine, read from the `[parallel]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Target partitions/workers per call (0 = derive from CPUs)
    pub concurrency: usize,

    /// Percentage of CPU cores to use when deriving (1-100)
    pub thread_percentage: u8,

    /// Maximum derived workers (0 = no limit)
    pub max_threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency: 0,
            thread_percentage: 100,
            max_threads: 0,
        }
    }
}

impl EngineConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    /// Load defaults, then `custom_config` (or `enumerable.toml`), then the
    /// environment. Missing files are skipped.
    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        Self::from_figment(&Self::figment(custom_config))
    }

    /// The layered provider stack, lowest priority first
    pub fn figment(custom_config: Option<&str>) -> Figment {
        let figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        let figment = match custom_config {
            Some(custom_path) => figment.merge(Toml::file(custom_path)),
            None => figment.merge(Toml::file(REPO_CONFIG)),
        };

        // Environment variables always have highest priority
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: EngineConfig = figment
            .extract_inner(SECTION)
            .with_context(|| format!("Failed to read [{SECTION}] configuration"))?;

        ensure!(
            config.thread_percentage <= 100,
            "thread_percentage must be between 0 and 100, got {}",
            config.thread_percentage
        );

        tracing::trace!("CONFIG LOAD: {:?}", config);
        Ok(config)
    }

    /// Concurrency factor for new parallel contexts.
    ///
    /// An explicit `concurrency` wins; otherwise the factor is derived from
    /// the CPU count, `thread_percentage` and `max_threads`. Always at least 1.
    pub fn resolve_concurrency(&self) -> usize {
        if self.concurrency > 0 {
            self.concurrency
        } else {
            ParallelContext::calculate_optimal_workers(self.max_threads, self.thread_percentage)
        }
    }
}
