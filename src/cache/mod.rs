//! Per-directory size records
//!
//! This module persists the last known size of a directory subtree next to
//! the directory itself, so repeated runs over a mostly static tree can skip
//! walking subtrees whose modification time has not moved.

mod storage;

pub use storage::{
    clear_cache, is_cache_file, load, mark_pending, save, CacheKind, CacheRecord, BOUNDARY_FILE,
    PRIMARY_FILE,
};
