// ## 📂 File: `src/pipeline/io.rs`
//! Whole-file I/O. Files are small (< 64 KiB by construction) and always
//! buffered fully; failures carry the path and are never retried.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::types::ConfigError;

/// Read an entire file.
pub fn read_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    let buf = fs::read(path).map_err(|e| ConfigError::io(path, e))?;
    debug!(path = %path.display(), len = buf.len(), "read input");
    Ok(buf)
}

/// Create or truncate `path` and write `bytes`.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ConfigError> {
    fs::write(path, bytes).map_err(|e| ConfigError::io(path, e))?;
    debug!(path = %path.display(), len = bytes.len(), "wrote output");
    Ok(())
}
