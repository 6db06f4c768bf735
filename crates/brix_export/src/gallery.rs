//! Owned media-gallery store.
//!
//! Stands in for a platform media store: encoded images land under a
//! root directory and every insert appends a metadata record to an
//! `index.json` ledger, so hosts can enumerate what was exported.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encode::{self, ImageFormat};
use crate::error::{ExportError, Result};
use crate::frame::Frame;

const INDEX_FILE: &str = "index.json";

/// One gallery entry's metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub title: String,
    pub display_name: String,
    pub description: String,
    pub mime_type: String,
    /// Unix seconds at insert time
    pub date_added: u64,
    /// Degrees; always 0 for chart exports
    pub orientation: u32,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// A media gallery rooted at a directory.
pub struct MediaGallery {
    root: PathBuf,
}

impl MediaGallery {
    /// Open (creating if needed) a gallery at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(ExportError::PathInvalid { path: root });
        }
        fs::create_dir_all(&root).map_err(|e| ExportError::from_io(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Encode `frame` and insert it with metadata.
    ///
    /// The file lands under `root/subfolder/` (subfolder may be empty),
    /// with the format's extension appended to `file_name` when
    /// missing. JPEG quality outside 0..=100 falls back to the default.
    pub fn insert(
        &self,
        frame: &Frame,
        file_name: &str,
        subfolder: &str,
        description: &str,
        format: ImageFormat,
        quality: i32,
    ) -> Result<MediaRecord> {
        if file_name.is_empty() {
            return Err(ExportError::PathInvalid {
                path: PathBuf::from(file_name),
            });
        }
        let file_name = format.ensure_extension(file_name);
        let dir = if subfolder.is_empty() {
            self.root.clone()
        } else {
            self.root.join(subfolder)
        };
        let path = dir.join(&file_name);
        encode::save_to_path(frame, format, quality, &path)?;
        let size_bytes = fs::metadata(&path)
            .map_err(|e| ExportError::from_io(&path, e))?
            .len();

        let record = MediaRecord {
            title: file_name.clone(),
            display_name: file_name,
            description: description.to_string(),
            mime_type: format.mime_type().to_string(),
            date_added: unix_now(),
            orientation: 0,
            path,
            size_bytes,
        };
        self.append_record(record.clone())?;
        debug!(path = %record.path.display(), mime = %record.mime_type, "gallery insert");
        Ok(record)
    }

    /// All records, oldest first. Missing index reads as empty.
    pub fn records(&self) -> Result<Vec<MediaRecord>> {
        let index = self.root.join(INDEX_FILE);
        let raw = match fs::read(&index) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ExportError::from_io(&index, e)),
        };
        serde_json::from_slice(&raw).map_err(|source| ExportError::IndexCorrupt {
            path: index,
            source,
        })
    }

    fn append_record(&self, record: MediaRecord) -> Result<()> {
        let index = self.root.join(INDEX_FILE);
        let mut records = self.records()?;
        records.push(record);
        let raw = serde_json::to_vec_pretty(&records).map_err(|source| {
            ExportError::IndexCorrupt {
                path: index.clone(),
                source,
            }
        })?;
        fs::write(&index, raw).map_err(|e| ExportError::from_io(&index, e))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
