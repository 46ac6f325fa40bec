use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use deck_logging::{deck_debug, deck_info};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("payload reference already revoked")]
    Revoked,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), DeliveryError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| DeliveryError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(DeliveryError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| DeliveryError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| DeliveryError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, DeliveryError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace existing file if present to keep determinism.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target)
            .map_err(|e| DeliveryError::Io(e.error))?;
        Ok(target)
    }
}

/// Transient, process-local reference binding a binary payload to a
/// revocable staging file and a suggested filename.
///
/// Lifecycle: created at success time, consumed by save actions, and
/// revoked after use or on abandonment. Dropping an unrevoked handle
/// removes the staging file as well.
pub struct DeliveryHandle {
    staged: Option<NamedTempFile>,
    filename: String,
    byte_len: u64,
}

impl DeliveryHandle {
    /// Write the payload to a private staging file.
    pub fn stage(payload: &[u8], filename: impl Into<String>) -> Result<Self, DeliveryError> {
        let mut staged = NamedTempFile::new()?;
        staged.write_all(payload)?;
        staged.flush()?;
        Ok(Self {
            staged: Some(staged),
            filename: filename.into(),
            byte_len: payload.len() as u64,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    /// Save the staged payload under the suggested filename in `dir`.
    ///
    /// Idempotent from the user's perspective: repeated saves rewrite the
    /// same unchanged artifact.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, DeliveryError> {
        let staged = self.staged.as_ref().ok_or(DeliveryError::Revoked)?;
        let payload = fs::read(staged.path())?;
        let target = AtomicFileWriter::new(dir.to_path_buf()).write(&self.filename, &payload)?;
        deck_info!("Saved artifact to {:?} ({} bytes)", target, self.byte_len);
        Ok(target)
    }

    /// Release the staging file. Further saves fail with `Revoked`.
    pub fn revoke(&mut self) -> Result<(), DeliveryError> {
        if let Some(staged) = self.staged.take() {
            staged.close()?;
            deck_debug!("Revoked staged artifact {}", self.filename);
        }
        Ok(())
    }

    /// Whether the staging file is still available.
    pub fn is_revoked(&self) -> bool {
        self.staged.is_none()
    }
}

/// Immediate delivery: stage the payload, save it bound to `filename`,
/// revoke the reference. The reference does not outlive this call.
pub fn deliver_immediately(
    payload: &[u8],
    filename: &str,
    dir: &Path,
) -> Result<PathBuf, DeliveryError> {
    let mut handle = DeliveryHandle::stage(payload, filename)?;
    let saved = handle.save_to(dir);
    let revoked = handle.revoke();
    let target = saved?;
    revoked?;
    Ok(target)
}
