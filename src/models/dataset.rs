//! Uploaded job dataset and its intake.
//!
//! The client never looks inside the spreadsheet; content checks belong
//! to the scheduling service. Intake only checks the declared media type.

use std::sync::Arc;
use tracing::{info, warn};

use crate::validation::{ValidationError, ValidationErrorKind};

/// Media type of an Excel workbook (.xlsx).
pub const SPREADSHEET_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A file offered for upload, as a picker would hand it over.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Media type declared by the picker.
    pub media_type: String,
    /// Display name (usually the file name).
    pub name: String,
}

impl FileCandidate {
    /// Creates a new candidate.
    pub fn new(
        bytes: impl Into<Vec<u8>>,
        media_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
            name: name.into(),
        }
    }
}

/// An accepted spreadsheet.
///
/// Immutable after intake. Cloning shares the byte buffer, so a request
/// built from a dataset holds a snapshot reference rather than a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    bytes: Arc<[u8]>,
    name: String,
}

impl Dataset {
    /// File contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared media type; always [`SPREADSHEET_MIME`].
    pub fn media_type(&self) -> &'static str {
        SPREADSHEET_MIME
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Holds at most one accepted dataset.
#[derive(Debug, Clone, Default)]
pub struct FileIntake {
    current: Option<Dataset>,
}

impl FileIntake {
    /// Creates an empty intake.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts or rejects a candidate.
    ///
    /// Succeeds iff the declared media type is exactly [`SPREADSHEET_MIME`].
    /// On any failure (including no candidate) the previously held dataset
    /// is dropped.
    pub fn accept(&mut self, candidate: Option<FileCandidate>) -> Result<&Dataset, ValidationError> {
        match candidate {
            Some(file) if file.media_type == SPREADSHEET_MIME => {
                info!(name = %file.name, size = file.bytes.len(), "dataset accepted");
                let dataset = self.current.insert(Dataset {
                    bytes: file.bytes.into(),
                    name: file.name,
                });
                Ok(&*dataset)
            }
            other => {
                if let Some(file) = &other {
                    warn!(name = %file.name, media_type = %file.media_type, "dataset rejected");
                } else {
                    warn!("no file offered");
                }
                self.current = None;
                Err(ValidationError::from_kind(ValidationErrorKind::InvalidFileType))
            }
        }
    }

    /// The held dataset, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.current.as_ref()
    }

    /// Drops the held dataset.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
