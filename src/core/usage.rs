//! Entry points for measuring a single path

use crate::core::cached::cached_disk_usage;
use crate::core::walker::disk_usage;
use crate::core::{Session, Tally, Usage};
use std::path::Path;

/// Exact usage of `path` without touching any cache record
pub fn compute_uncached(path: &Path) -> Usage {
    measure(path, &Session::default(), false)
}

/// Cached usage of `path` with the default session
pub fn compute_cached(path: &Path) -> Usage {
    measure(path, &Session::default(), true)
}

/// Cached usage of `path` keeping primary records down to `cache_level`
pub fn compute_cached_at_level(path: &Path, cache_level: usize) -> Usage {
    compute_cached_with(path, false, cache_level)
}

/// Cached usage of `path`, fully parameterized
pub fn compute_cached_with(path: &Path, force_renew: bool, cache_level: usize) -> Usage {
    let session = Session {
        force_renew,
        cache_level,
        verbose: false,
    };
    measure(path, &session, true)
}

/// Measure `path` under `session`, cached or not.
///
/// Every call owns a fresh tally; only this outermost result is the
/// authoritative total.
pub fn measure(path: &Path, session: &Session, use_cache: bool) -> Usage {
    let mut tally = Tally::default();
    let blocks = if use_cache {
        cached_disk_usage(path, session, &mut tally)
    } else {
        disk_usage(path, session, &mut tally)
    };
    Usage { blocks, tally }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("top"), vec![0u8; 4096]).unwrap();
        let sub = temp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("inner"), vec![0u8; 8192]).unwrap();
        temp
    }

    #[test]
    fn test_uncached_leaves_no_records() {
        let temp = sample_tree();
        let usage = compute_uncached(temp.path());

        assert!(usage.blocks > 0);
        assert_eq!(usage.tally.cache_writes, 0);
        assert!(!temp.path().join(".cachedu").exists());
    }

    #[test]
    fn test_all_entry_points_agree() {
        let temp = sample_tree();
        let exact = compute_uncached(temp.path()).blocks;

        assert_eq!(compute_cached(temp.path()).blocks, exact);
        assert_eq!(compute_cached_at_level(temp.path(), 1).blocks, exact);
        assert_eq!(compute_cached_with(temp.path(), true, 2).blocks, exact);
    }

    #[test]
    fn test_repeat_call_is_served_from_cache() {
        let temp = sample_tree();
        let first = compute_cached(temp.path());
        let second = compute_cached(temp.path());

        assert!(!first.tally.fully_cached());
        assert!(second.tally.fully_cached());
        assert_eq!(first.blocks, second.blocks);
    }

    #[test]
    fn test_force_renew_always_recomputes() {
        let temp = sample_tree();
        compute_cached(temp.path());

        let forced = compute_cached_with(temp.path(), true, 0);
        assert_eq!(forced.tally.recomputed_dirs, 1);
        assert_eq!(forced.tally.plain_walks, 1);
    }
}
