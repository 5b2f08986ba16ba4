//! Traversal session and per-call counters

use std::path::Path;

/// Immutable settings for one top-level computation.
///
/// Shared by reference across the whole recursion, never mutated mid-walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    /// Ignore existing cache records and recompute everything
    pub force_renew: bool,
    /// Deepest directory depth that keeps a primary record
    pub cache_level: usize,
    /// Emit the per-directory trace
    pub verbose: bool,
}

/// Counters collected during one top-level computation.
///
/// `errors` doubles as the error indicator: any per-entry failure bumps it,
/// and the total is still best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    /// Directories whose primary record was (re)written with a fresh sum
    pub recomputed_dirs: u64,
    /// Subtrees measured by the plain walker at a cache boundary
    pub plain_walks: u64,
    /// Cache records read
    pub cache_reads: u64,
    /// Cache records written (pending markers included)
    pub cache_writes: u64,
    /// Entries that could not be inspected or listed
    pub errors: u64,
}

impl Tally {
    /// Whether any entry failed during the traversal
    #[inline]
    pub fn had_errors(&self) -> bool {
        self.errors > 0
    }

    /// Whether the traversal reused caches without any recomputation
    #[inline]
    pub fn fully_cached(&self) -> bool {
        self.recomputed_dirs == 0 && self.plain_walks == 0
    }

    /// Record a per-entry failure and keep going
    pub(crate) fn fail(&mut self, path: &Path, err: &std::io::Error) {
        log::warn!("du: {}: {}", path.display(), err);
        self.errors += 1;
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: &Tally) {
        self.recomputed_dirs += other.recomputed_dirs;
        self.plain_walks += other.plain_walks;
        self.cache_reads += other.cache_reads;
        self.cache_writes += other.cache_writes;
        self.errors += other.errors;
    }
}

/// Result of measuring one path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    /// Total blocks used by the path and everything beneath it
    pub blocks: u64,
    /// What the traversal had to do to get there
    pub tally: Tally,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fresh_tally_is_clean() {
        let tally = Tally::default();
        assert!(!tally.had_errors());
        assert!(tally.fully_cached());
    }

    #[test]
    fn test_fail_raises_indicator() {
        let mut tally = Tally::default();
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        tally.fail(Path::new("/nope"), &err);
        assert!(tally.had_errors());
        assert_eq!(tally.errors, 1);
    }

    #[test]
    fn test_merge_sums_counters() {
        let mut a = Tally {
            recomputed_dirs: 1,
            plain_walks: 2,
            cache_reads: 3,
            cache_writes: 4,
            errors: 0,
        };
        let b = Tally {
            recomputed_dirs: 10,
            plain_walks: 0,
            cache_reads: 1,
            cache_writes: 1,
            errors: 1,
        };
        a.merge(&b);
        assert_eq!(
            a,
            Tally {
                recomputed_dirs: 11,
                plain_walks: 2,
                cache_reads: 4,
                cache_writes: 5,
                errors: 1,
            }
        );
    }
}
