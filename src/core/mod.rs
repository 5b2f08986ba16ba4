//! Core data structures and traversal algorithms for disk usage

pub mod blocks;
pub mod cached;
pub mod session;
pub mod usage;
pub mod walker;

pub use blocks::blocks;
pub use cached::{cached_disk_usage, Visit};
pub use session::{Session, Tally, Usage};
pub use usage::{
    compute_cached, compute_cached_at_level, compute_cached_with, compute_uncached, measure,
};
pub use walker::disk_usage;
