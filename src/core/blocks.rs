//! Block accounting for filesystem entries
//!
//! Sizes are reported in 1 KiB blocks, matching GNU du rather than the
//! POSIX 512-byte unit.

use std::fs::Metadata;

/// Convert raw 512-byte allocation units into reported blocks
#[cfg(target_os = "macos")]
#[inline]
fn normalize(raw: u64) -> u64 {
    raw
}

/// Convert raw 512-byte allocation units into reported blocks
#[cfg(all(unix, not(target_os = "macos")))]
#[inline]
fn normalize(raw: u64) -> u64 {
    raw / 2
}

/// Blocks allocated to a single entry (the entry itself, never its children)
#[cfg(unix)]
pub fn blocks(meta: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    normalize(meta.blocks())
}

/// Blocks allocated to a single entry (the entry itself, never its children)
#[cfg(not(unix))]
pub fn blocks(meta: &Metadata) -> u64 {
    meta.len().div_ceil(1024)
}

/// Last status change of an entry, formatted like `ctime(3)`
#[cfg(unix)]
pub fn status_change(meta: &Metadata) -> String {
    use std::os::unix::fs::MetadataExt;
    format_timestamp(meta.ctime(), meta.ctime_nsec())
}

/// Last status change of an entry, formatted like `ctime(3)`
#[cfg(not(unix))]
pub fn status_change(meta: &Metadata) -> String {
    use std::time::UNIX_EPOCH;
    match meta.modified().ok().and_then(|t| t.duration_since(UNIX_EPOCH).ok()) {
        Some(d) => format_timestamp(d.as_secs() as i64, d.subsec_nanos() as i64),
        None => "unknown".to_string(),
    }
}

fn format_timestamp(secs: i64, nsecs: i64) -> String {
    let nsecs = u32::try_from(nsecs).unwrap_or(0);
    match chrono::DateTime::from_timestamp(secs, nsecs) {
        Some(utc) => utc
            .with_timezone(&chrono::Local)
            .format("%a %b %e %H:%M:%S %Y")
            .to_string(),
        None => "unknown".to_string(),
    }
}
