use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to write output to file {path:?}: {source}")]
pub struct Error {
    path: String,
    source: std::io::Error,
}

/// Writes the rendered claims to `path` in a single call.
pub fn write(data: &[u8], path: &Path) -> Result<(), Error> {
    std::fs::write(path, data).map_err(|source| Error {
        path: path.display().to_string(),
        source,
    })
}
