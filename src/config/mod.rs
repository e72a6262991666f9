//! Configuration management
//!
//! Engine settings are layered with figment, lowest priority first:
//!
//! 1. Embedded defaults (`default-config.toml`)
//! 2. `enumerable.toml` in the working directory, or a custom path
//! 3. `ENUMERABLE_`-prefixed environment variables, e.g.
//!    `ENUMERABLE_PARALLEL__CONCURRENCY=8`
//!
//! ```toml
//! [parallel]
//! concurrency = 0          # 0 = derive from CPUs
//! thread_percentage = 75
//! max_threads = 8
//! ```

mod core;

pub use self::core::{ENV_PREFIX, EngineConfig, REPO_CONFIG};

#[cfg(test)]
mod tests;
