//! Files attached to a submission

use feeder_core::config::compile_time::attachments::{
    MAX_ATTACHMENTS, MAX_ATTACHMENT_BYTES, MAX_TOTAL_ATTACHMENT_BYTES,
};
use feeder_core::logging::codes;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Accepted extensions and their MIME types
const ACCEPTED_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("txt", "text/plain"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("Maximum {max} files allowed")]
    TooManyFiles { max: usize },

    #[error("Some files exceed the {}MB limit: {}", max / (1024 * 1024), names.join(", "))]
    FilesTooLarge { names: Vec<String>, max: u64 },

    #[error("Attachments total {total} bytes, maximum allowed is {max}")]
    TotalTooLarge { total: u64, max: u64 },

    #[error("Unsupported file type: {}", names.join(", "))]
    UnsupportedType { names: Vec<String> },
}

impl AttachmentError {
    pub fn error_code(&self) -> codes::Code {
        codes::submission::ATTACHMENT_LIMIT_EXCEEDED
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        let content = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(file_name, content))
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// MIME type from the extension, if the extension is accepted
    pub fn content_type(&self) -> Option<&'static str> {
        let extension = Path::new(&self.file_name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        ACCEPTED_TYPES
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, mime)| *mime)
    }
}

/// Attachments accepted so far; a rejected batch leaves the set unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    files: Vec<Attachment>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, batch: Vec<Attachment>) -> Result<(), AttachmentError> {
        if self.files.len() + batch.len() > MAX_ATTACHMENTS {
            return Err(AttachmentError::TooManyFiles {
                max: MAX_ATTACHMENTS,
            });
        }

        let unsupported: Vec<String> = batch
            .iter()
            .filter(|file| file.content_type().is_none())
            .map(|file| file.file_name.clone())
            .collect();
        if !unsupported.is_empty() {
            return Err(AttachmentError::UnsupportedType { names: unsupported });
        }

        let oversized: Vec<String> = batch
            .iter()
            .filter(|file| file.size() > MAX_ATTACHMENT_BYTES)
            .map(|file| file.file_name.clone())
            .collect();
        if !oversized.is_empty() {
            return Err(AttachmentError::FilesTooLarge {
                names: oversized,
                max: MAX_ATTACHMENT_BYTES,
            });
        }

        let total = self.total_bytes() + batch.iter().map(Attachment::size).sum::<u64>();
        if total > MAX_TOTAL_ATTACHMENT_BYTES {
            return Err(AttachmentError::TotalTooLarge {
                total,
                max: MAX_TOTAL_ATTACHMENT_BYTES,
            });
        }

        self.files.extend(batch);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Attachment> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(Attachment::size).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
