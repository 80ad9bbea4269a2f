//! Store file locations and atomic writes

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default per-user data directory for Vinyl stores
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("vinyl"))
}

/// Write `contents` to `path` atomically (temp file + rename)
///
/// A crash mid-write leaves either the old file or the new one, never a
/// truncated mix.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}
