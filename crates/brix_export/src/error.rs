//! Export error types

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Export-related errors.
///
/// File-system failures are classified by `io::ErrorKind` so callers
/// can distinguish a permission problem from a full disk without
/// losing the underlying cause.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The surface to capture has no pixels
    #[error("cannot export a {width}x{height} surface")]
    ZeroSize { width: u32, height: u32 },

    /// The destination path is unusable (empty, or not representable)
    #[error("invalid export path: {path:?}")]
    PathInvalid { path: PathBuf },

    /// Destination exists but the process may not write it
    #[error("permission denied writing {path:?}")]
    Permission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The storage device is out of space
    #[error("storage full while writing {path:?}")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Image encoding failed
    #[error("image encoding failed")]
    Encode(#[from] image::ImageError),

    /// The gallery index could not be read or written
    #[error("gallery index at {path:?} is corrupt")]
    IndexCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other i/o failure
    #[error("i/o error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// Classify an i/o error against the path it occurred on.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::Permission { path, source },
            io::ErrorKind::StorageFull => Self::DiskFull { path, source },
            io::ErrorKind::NotFound | io::ErrorKind::InvalidInput => {
                Self::PathInvalid { path }
            }
            _ => Self::Io { path, source },
        }
    }
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_permission_denied() {
        let err = ExportError::from_io(
            Path::new("/nope"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ExportError::Permission { .. }));
    }

    #[test]
    fn classifies_missing_path_as_invalid() {
        let err = ExportError::from_io(
            Path::new("/gone"),
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, ExportError::PathInvalid { .. }));
    }
}
