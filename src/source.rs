use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not valid UTF-8 (invalid byte at offset {valid_up_to})", .path.display())]
    Encoding { path: PathBuf, valid_up_to: usize },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the markdown comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Text(String),
    File(PathBuf),
}

impl Source {
    /// Return the full markdown content. Files are read in one call and the
    /// handle is closed before decoding starts.
    pub fn read(&self) -> Result<String, SourceError> {
        match self {
            Source::Text(text) => Ok(text.clone()),
            Source::File(path) => read_file(path),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Text(text) => write!(f, "<text, {} bytes>", text.len()),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn read_file(path: &Path) -> Result<String, SourceError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "source read");
    decode_utf8(path, &bytes)
}

/// Strict UTF-8 decoding; a leading byte-order mark is dropped.
fn decode_utf8(path: &Path, bytes: &[u8]) -> Result<String, SourceError> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(SourceError::Encoding {
            path: path.to_path_buf(),
            valid_up_to: Encoding::utf8_valid_up_to(bytes),
        });
    }
    Ok(text.into_owned())
}
