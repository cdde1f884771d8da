//! Flat-file persistence for motivos.
//!
//! The whole list is read and rewritten on every mutation. There is no lock;
//! the store is meant for a single clerk at a single desk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::model::{seed_reasons, Reason};
use crate::generators::NoticeError;

/// JSON-backed list of motivos.
#[derive(Debug, Clone)]
pub struct ReasonStore {
    path: PathBuf,
}

impl ReasonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every motivo in display order.
    ///
    /// A missing file is seeded with the example motivos. A file that is not
    /// a valid motivo list reads as empty.
    pub fn load(&self) -> Result<Vec<Reason>, NoticeError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let seed = seed_reasons();
                self.save(&seed)?;
                log::info!(
                    "Motivos file {} not found, seeded with {} examples",
                    self.path.display(),
                    seed.len()
                );
                return Ok(seed);
            }
            Err(e) => return Err(NoticeError::ReadReasons(e)),
        };

        match serde_json::from_slice::<Vec<Reason>>(&raw) {
            Ok(reasons) => Ok(reasons),
            Err(e) => {
                log::warn!(
                    "Motivos file {} is corrupt, treating it as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the file with `reasons`, 4-space indented, UTF-8 kept literal.
    pub fn save(&self, reasons: &[Reason]) -> Result<(), NoticeError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        reasons
            .serialize(&mut serializer)
            .map_err(NoticeError::SerializeReasons)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(NoticeError::WriteReasons)?;
            }
        }
        fs::write(&self.path, buf).map_err(NoticeError::WriteReasons)
    }

    /// Append a motivo. Returns `false` when nothing was stored.
    ///
    /// Both fields are trimmed. Empty fields and titles already present are
    /// ignored, so a title always identifies a single motivo.
    pub fn add(&self, title: &str, detail: &str) -> Result<bool, NoticeError> {
        let (title, detail) = (title.trim(), detail.trim());
        if title.is_empty() || detail.is_empty() {
            log::debug!("Ignoring motivo with empty title or detail");
            return Ok(false);
        }

        let mut reasons = self.load()?;
        if reasons.iter().any(|r| r.title == title) {
            log::warn!("Motivo '{}' already exists, not adding it again", title);
            return Ok(false);
        }

        reasons.push(Reason::new(title, detail));
        self.save(&reasons)?;
        log::info!("Motivo '{}' added ({} total)", title, reasons.len());
        Ok(true)
    }

    /// Delete every motivo whose title matches exactly. Returns how many went.
    pub fn remove(&self, title: &str) -> Result<usize, NoticeError> {
        let mut reasons = self.load()?;
        let before = reasons.len();
        reasons.retain(|r| r.title != title);
        let removed = before - reasons.len();

        if removed > 0 {
            self.save(&reasons)?;
            log::info!("Motivo '{}' removed", title);
        }
        Ok(removed)
    }

    /// First motivo with exactly this title.
    pub fn find(&self, title: &str) -> Result<Option<Reason>, NoticeError> {
        Ok(self.load()?.into_iter().find(|r| r.title == title))
    }

    pub fn titles(&self) -> Result<Vec<String>, NoticeError> {
        Ok(self.load()?.into_iter().map(|r| r.title).collect())
    }
}
