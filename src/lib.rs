//! cachedu - disk usage with persisted per-directory size caches
//!
//! Repeated runs over large, mostly static trees reuse size records stored
//! inside each directory instead of walking every subtree again. A record is
//! trusted only while the directory's modification time is unchanged.

pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod export;

pub use cache::{clear_cache, CacheKind, CacheRecord};
pub use config::{Config, OutputFormat};
pub use crate::core::{
    compute_cached, compute_cached_at_level, compute_cached_with, compute_uncached, measure,
    Session, Tally, Usage,
};
pub use error::{CacheduError, Result};
