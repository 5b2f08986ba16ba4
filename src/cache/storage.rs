//! Cache record storage
//!
//! Each record is a small text file living inside the directory it
//! describes: one decimal block count followed by a newline. The file's own
//! modification time is the moment the count was taken, and every write
//! re-stamps the owning directory with that same instant so the record can
//! later be validated against the directory's modification time.

use crate::error::{CacheduError, Result};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Filename of the primary (full subtree, layer-by-layer) record
pub const PRIMARY_FILE: &str = ".cachedu";

/// Filename of the boundary (whole uncached subtree) record
pub const BOUNDARY_FILE: &str = ".sub_cachedu";

/// Which of the two per-directory records to address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    /// Maintained at every directory shallower than the cache level
    Primary,
    /// Maintained at directories sitting on the cache boundary
    Boundary,
}

impl CacheKind {
    /// Reserved filename for this kind
    pub fn file_name(self) -> &'static str {
        match self {
            CacheKind::Primary => PRIMARY_FILE,
            CacheKind::Boundary => BOUNDARY_FILE,
        }
    }

    /// Location of this kind's record inside `dir`
    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

/// Whether a directory entry is one of the reserved record files.
///
/// Record files are bookkeeping, not usage: both walkers skip them so the
/// total never depends on how many records a run happened to leave behind.
pub fn is_cache_file(name: &OsStr) -> bool {
    name == PRIMARY_FILE || name == BOUNDARY_FILE
}

/// State of a persisted size record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheRecord {
    /// No record file, or its content is not a block count
    Absent,
    /// A zero count: the marker written before a recompute, or a run that
    /// never finished. Also what a genuinely empty subtree looks like.
    Pending,
    /// A finished count and the instant it was taken
    Valid { size: u64, as_of: SystemTime },
}

impl CacheRecord {
    /// The stored count, if the record holds one
    pub fn size(&self) -> Option<u64> {
        match self {
            CacheRecord::Valid { size, .. } => Some(*size),
            _ => None,
        }
    }

    /// Whether the record can stand in for a walk of a directory last
    /// modified at `mtime`
    pub fn is_fresh(&self, mtime: SystemTime) -> bool {
        matches!(self, CacheRecord::Valid { as_of, .. } if *as_of == mtime)
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, CacheRecord::Absent)
    }
}

/// Read the `kind` record stored in `dir`
pub fn load(kind: CacheKind, dir: &Path) -> CacheRecord {
    let path = kind.path_in(dir);

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return CacheRecord::Absent,
    };

    let size: u64 = match content.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            log::debug!("unparsable {}, ignoring", path.display());
            return CacheRecord::Absent;
        }
    };

    let as_of = match fs::symlink_metadata(&path).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(e) => {
            log::warn!("du: {}: {}", path.display(), e);
            return CacheRecord::Absent;
        }
    };

    if size == 0 {
        CacheRecord::Pending
    } else {
        CacheRecord::Valid { size, as_of }
    }
}

/// Write `size` as the `kind` record of `dir`, then stamp both the record
/// and `dir` with the same instant.
///
/// Setting an explicit time on `dir` needs ownership of it, not just write
/// access. When that is refused the directory keeps the time the kernel gave
/// it and the record is stamped with that time instead, so it still
/// validates on the next read.
pub fn save(kind: CacheKind, dir: &Path, size: u64) -> Result<()> {
    let path = kind.path_in(dir);

    let mut file = File::create(&path).map_err(|e| {
        CacheduError::CacheError(format!(
            "Failed to create cache file '{}': {}",
            path.display(),
            e
        ))
    })?;

    writeln!(file, "{}", size).map_err(|e| {
        CacheduError::CacheError(format!(
            "Failed to write cache file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let now = SystemTime::now();
    file.set_modified(now)?;
    if let Err(e) = touch_dir(dir, now) {
        log::debug!("{}; keeping directory time", e);
        align_to_dir(&file, dir)?;
    }

    Ok(())
}

/// Stamp an open record with `dir`'s current modification time
fn align_to_dir(record: &File, dir: &Path) -> Result<()> {
    let mtime = fs::metadata(dir).and_then(|m| m.modified())?;
    record.set_modified(mtime)?;
    Ok(())
}

/// Write the pending marker for `kind` in `dir`
#[inline]
pub fn mark_pending(kind: CacheKind, dir: &Path) -> Result<()> {
    save(kind, dir, 0)
}

fn touch_dir(dir: &Path, at: SystemTime) -> Result<()> {
    let handle = File::open(dir).map_err(|e| CacheduError::PathNotFound {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;
    handle.set_modified(at).map_err(|e| {
        CacheduError::CacheError(format!(
            "Failed to touch directory '{}': {}",
            dir.display(),
            e
        ))
    })
}

/// Remove every primary and boundary record at or below `root`.
///
/// Symlinks are not followed. Returns the number of record files removed.
pub fn clear_cache(root: &Path) -> Result<usize> {
    let meta = fs::symlink_metadata(root).map_err(|e| CacheduError::PathNotFound {
        path: root.display().to_string(),
        reason: e.to_string(),
    })?;

    if !meta.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    clear_dir(root, &mut removed);
    Ok(removed)
}

fn clear_dir(dir: &Path, removed: &mut usize) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            log::warn!("du: {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("du: {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();

        if is_cache_file(&entry.file_name()) {
            match fs::remove_file(&path) {
                Ok(()) => *removed += 1,
                Err(e) => log::warn!("du: {}: {}", path.display(), e),
            }
            continue;
        }

        match entry.file_type() {
            Ok(ft) if ft.is_dir() => clear_dir(&path, removed),
            Ok(_) => {}
            Err(e) => log::warn!("du: {}: {}", path.display(), e),
        }
    }
}
