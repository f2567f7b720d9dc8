use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

// ── Chunking config ───────────────────────────────────────────

/// Size bounds and merge policy for one segmentation run. Immutable once
/// validated; the pipeline never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Preferred chunk size in characters; the buffer flushes once it
    /// reaches this.
    pub target_size: usize,
    /// Lower bound for plain-text chunks (trailing remainders and flushes
    /// forced by a protected block may fall below it).
    pub min_size: usize,
    /// Hard ceiling for plain-text chunks. Protected and merged chunks may
    /// exceed it.
    pub max_size: usize,
    /// Whether boundary chunks severed by pagination are rejoined.
    pub enable_merging: bool,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_size: 1000,
            min_size: 200,
            max_size: 2000,
            enable_merging: true,
        }
    }
}

impl ChunkingConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            target_size: env_usize("CHUNK_TARGET_SIZE", defaults.target_size),
            min_size: env_usize("CHUNK_MIN_SIZE", defaults.min_size),
            max_size: env_usize("CHUNK_MAX_SIZE", defaults.max_size),
            enable_merging: env_bool("CHUNK_MERGING", defaults.enable_merging),
        }
    }

    /// Reject malformed size bounds before any page is processed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_size == 0 {
            return Err(ConfigError::ZeroTarget);
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::MinExceedsMax {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.target_size < self.min_size || self.target_size > self.max_size {
            return Err(ConfigError::TargetOutOfBounds {
                target: self.target_size,
                min: self.min_size,
                max: self.max_size,
            });
        }
        Ok(())
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!(
            "Chunking config: target={} min={} max={} merging={}",
            self.target_size,
            self.min_size,
            self.max_size,
            self.enable_merging
        );
    }
}
