//! Configuration types for cachedu

use crate::core::Session;
use crate::error::{CacheduError, Result};
use std::path::PathBuf;

/// Output format for usage reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<blocks>\t<path>` lines, du style
    #[default]
    Console,
    /// JSON output with per-path counters
    Json,
}

/// Configuration options for a cachedu run
#[derive(Debug, Clone)]
pub struct Config {
    /// Paths to measure, each independently
    pub paths: Vec<PathBuf>,

    /// Ignore every existing cache record and recompute (default: false)
    pub force_renew: bool,

    /// Depth up to which primary per-directory records are kept (default: 0)
    /// Directories deeper than this are covered by boundary records
    pub cache_level: usize,

    /// Emit the per-directory trace on the diagnostic stream
    pub verbose: bool,

    /// Use the caching walker (false = plain recursive walk)
    pub use_cache: bool,

    /// Remove all cache records below each path before measuring
    pub clear_cache: bool,

    /// Output format (console or json)
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(".")],
            force_renew: false,
            cache_level: 0,
            verbose: false,
            use_cache: true,
            clear_cache: false,
            output_format: OutputFormat::Console,
        }
    }
}

impl Config {
    /// The immutable traversal settings threaded through one computation
    pub fn session(&self) -> Session {
        Session {
            force_renew: self.force_renew,
            cache_level: self.cache_level,
            verbose: self.verbose,
        }
    }

    /// Reject configurations that cannot produce a report
    pub fn validate(&self) -> Result<()> {
        if self.paths.is_empty() {
            return Err(CacheduError::InvalidConfig(
                "at least one path is required".to_string(),
            ));
        }
        Ok(())
    }
}
