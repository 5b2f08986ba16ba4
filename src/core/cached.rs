//! Caching walker
//!
//! Directories shallower than the session's cache level keep a primary
//! record covering their whole subtree. Directories one level past that are
//! cache boundaries: each keeps a boundary record computed by the plain
//! walker, so nothing beneath a boundary ever gets a record of its own.
//!
//! A record is trusted only when its timestamp equals the directory's
//! current modification time and it holds a non-zero count. Each level
//! decides on its own: a child that recomputes does not invalidate its
//! parent's primary record, but a boundary that recomputes does.

use crate::cache::{self, is_cache_file, CacheKind, CacheRecord};
use crate::core::blocks::blocks;
use crate::core::walker::{trace, walk};
use crate::core::{Session, Tally};
use std::fs::{self, Metadata};
use std::path::Path;

/// Outcome of resolving one directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Resolved size of the subtree
    pub size: u64,
    /// Whether the size was computed rather than taken from a record
    pub recomputed: bool,
}

/// Total blocks used by `path` and its subtree, reusing and refreshing
/// cache records on the way.
pub fn cached_disk_usage(path: &Path, session: &Session, tally: &mut Tally) -> u64 {
    visit(path, 0, session, tally).size
}

/// Resolve `path`, which sits `depth` levels below the traversal root
pub fn visit(path: &Path, depth: usize, session: &Session, tally: &mut Tally) -> Visit {
    let record = read_record(CacheKind::Primary, path, tally);

    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            tally.fail(path, &e);
            return Visit {
                size: 0,
                recomputed: false,
            };
        }
    };

    if !meta.is_dir() {
        return Visit {
            size: blocks(&meta),
            recomputed: true,
        };
    }

    let entries = match fs::read_dir(path) {
        Ok(e) => e,
        Err(e) => {
            tally.fail(path, &e);
            return Visit {
                size: blocks(&meta),
                recomputed: true,
            };
        }
    };

    let mut needs_recompute = session.force_renew || !is_fresh(&record, &meta);
    match record {
        CacheRecord::Absent => {
            log::debug!("no {} in {}", CacheKind::Primary.file_name(), path.display());
            // Pending marker: an interrupted run leaves a zero behind
            write_pending(CacheKind::Primary, path, tally);
        }
        CacheRecord::Pending => log::debug!("{} is pending", path.display()),
        CacheRecord::Valid { size, .. } if needs_recompute => {
            log::debug!("{} needs update (cached {})", path.display(), size)
        }
        CacheRecord::Valid { .. } => {}
    }

    let mut size = blocks(&meta);

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

        if !child_meta.is_dir() {
            size += blocks(&child_meta);
        } else if depth < session.cache_level {
            size += visit(&child, depth + 1, session, tally).size;
        } else {
            let sub = boundary(&child, &child_meta, session, tally);
            if sub.recomputed {
                needs_recompute = true;
            }
            size += sub.size;
        }
    }

    let resolved = match record.size() {
        Some(cached) if !needs_recompute => Visit {
            size: cached,
            recomputed: false,
        },
        _ => {
            log::debug!("update cache size={}, path={}", size, path.display());
            write_record(CacheKind::Primary, path, size, tally);
            tally.recomputed_dirs += 1;
            Visit {
                size,
                recomputed: true,
            }
        }
    };

    trace(session, resolved.size, path, &meta);
    resolved
}

/// Resolve a directory on the cache boundary from its boundary record,
/// falling back to a plain walk of the whole subtree.
fn boundary(dir: &Path, meta: &Metadata, session: &Session, tally: &mut Tally) -> Visit {
    let record = read_record(CacheKind::Boundary, dir, tally);

    if !session.force_renew && is_fresh(&record, meta) {
        if let Some(size) = record.size() {
            return Visit {
                size,
                recomputed: false,
            };
        }
    }

    write_pending(CacheKind::Boundary, dir, tally);
    let size = walk(dir, meta, session, tally);
    tally.plain_walks += 1;
    log::debug!("using du on {}, size={}", dir.display(), size);
    write_record(CacheKind::Boundary, dir, size, tally);

    Visit {
        size,
        recomputed: true,
    }
}

fn is_fresh(record: &CacheRecord, meta: &Metadata) -> bool {
    meta.modified().is_ok_and(|mtime| record.is_fresh(mtime))
}

fn read_record(kind: CacheKind, dir: &Path, tally: &mut Tally) -> CacheRecord {
    tally.cache_reads += 1;
    cache::load(kind, dir)
}

fn write_pending(kind: CacheKind, dir: &Path, tally: &mut Tally) {
    match cache::mark_pending(kind, dir) {
        Ok(()) => tally.cache_writes += 1,
        Err(e) => log::warn!("du: {}", e),
    }
}

fn write_record(kind: CacheKind, dir: &Path, size: u64, tally: &mut Tally) {
    match cache::save(kind, dir, size) {
        Ok(()) => tally.cache_writes += 1,
        Err(e) => log::warn!("du: {}", e),
    }
}
