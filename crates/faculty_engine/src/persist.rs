use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::capture::capture_filename;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("capture directory missing or not writable: {0}")]
    CaptureDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Raw-HTML capture side channel: one file per profile URL, written
/// atomically (temp file, then rename). Write-only from the pipeline's
/// point of view.
pub struct RawHtmlStore {
    dir: PathBuf,
}

impl RawHtmlStore {
    /// Creates the directory if missing and probes writability, so an
    /// unusable capture directory fails at startup rather than mid-crawl.
    pub fn create(dir: PathBuf) -> Result<Self, PersistError> {
        ensure_dir(&dir)?;
        NamedTempFile::new_in(&dir).map_err(|e| PersistError::CaptureDir(e.to_string()))?;
        Ok(Self { dir })
    }

    /// Write the raw body for `url` under its capture filename, replacing
    /// any previous capture of the same URL.
    pub fn save(&self, url: &str, html: &str) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(capture_filename(url));

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(html.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::CaptureDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::CaptureDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::CaptureDir(e.to_string()))?;
    }
    Ok(())
}
