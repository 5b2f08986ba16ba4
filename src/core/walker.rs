//! Plain recursive walker
//!
//! Computes the exact block usage of a path and everything beneath it,
//! without consulting or writing any cache record. Used directly for
//! uncached runs and as the fallback below a cache boundary.

use crate::cache::is_cache_file;
use crate::core::blocks::{blocks, status_change};
use crate::core::{Session, Tally};
use std::fs::{self, Metadata};
use std::path::Path;

/// Total blocks used by `path` and its subtree.
///
/// A symlinked `path` is followed, like opening it as a directory would.
/// Symlinks below it are counted as entries, never followed. Hard-linked
/// files are counted once per link.
pub fn disk_usage(path: &Path, session: &Session, tally: &mut Tally) -> u64 {
    match fs::metadata(path) {
        Ok(meta) => walk(path, &meta, session, tally),
        Err(e) => {
            tally.fail(path, &e);
            0
        }
    }
}

/// Walk `path` whose metadata has already been read
pub(crate) fn walk(path: &Path, meta: &Metadata, session: &Session, tally: &mut Tally) -> u64 {
    // The directory's own allocation, i.e. the "." entry
    let mut size = blocks(meta);

    if !meta.is_dir() {
        return size;
    }

    let entries = match fs::read_dir(path) {
        Ok(e) => e,
        Err(e) => {
            tally.fail(path, &e);
            trace(session, size, path, meta);
            return size;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tally.fail(path, &e);
                continue;
            }
        };
        if is_cache_file(&entry.file_name()) {
            continue;
        }

        let child = entry.path();
        let child_meta = match fs::symlink_metadata(&child) {
            Ok(m) => m,
            Err(e) => {
                tally.fail(&child, &e);
                continue;
            }
        };

        if child_meta.is_dir() {
            size += walk(&child, &child_meta, session, tally);
        } else {
            size += blocks(&child_meta);
        }
    }

    trace(session, size, path, meta);
    size
}

/// Verbose per-directory trace line
pub(crate) fn trace(session: &Session, size: u64, path: &Path, meta: &Metadata) {
    if session.verbose {
        log::info!("{}\t{}", size, path.display());
        log::info!("Last status change:       {}", status_change(meta));
    }
}
