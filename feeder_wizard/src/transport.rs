//! Delivery seam for email payloads

use crate::email::EmailPayload;
use feeder_core::logging::codes;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The service answered but refused the payload
    #[error("Delivery rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The service could not be reached or written to
    #[error("Delivery service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Failed to encode payload: {message}")]
    Encoding { message: String },
}

impl TransportError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::Encoding { .. } => codes::submission::PAYLOAD_ENCODING_ERROR,
            _ => codes::submission::TRANSPORT_FAILURE,
        }
    }
}

/// Sends one payload and reports a single success or failure
pub trait EmailTransport: Send + Sync {
    fn send(&self, payload: &EmailPayload) -> Result<(), TransportError>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Writes each payload as `<submission id>.json` into a directory for an
/// external sender to pick up
#[derive(Debug, Clone)]
pub struct OutboxTransport {
    dir: PathBuf,
}

impl OutboxTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, payload: &EmailPayload) -> PathBuf {
        self.dir.join(format!("{}.json", payload.submission_id))
    }
}

impl EmailTransport for OutboxTransport {
    fn send(&self, payload: &EmailPayload) -> Result<(), TransportError> {
        let json = payload.to_json().map_err(|e| TransportError::Encoding {
            message: e.to_string(),
        })?;

        fs::create_dir_all(&self.dir).map_err(|e| TransportError::Unavailable {
            message: format!("{}: {}", self.dir.display(), e),
        })?;

        let path = self.path_for(payload);
        fs::write(&path, json).map_err(|e| TransportError::Unavailable {
            message: format!("{}: {}", path.display(), e),
        })
    }

    fn name(&self) -> &str {
        "outbox"
    }
}

/// Keeps every payload in memory
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<EmailPayload>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<EmailPayload> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl EmailTransport for RecordingTransport {
    fn send(&self, payload: &EmailPayload) -> Result<(), TransportError> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(payload.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Fails every send with the configured error
#[derive(Debug, Clone)]
pub struct FailingTransport {
    error: TransportError,
}

impl FailingTransport {
    pub fn new(error: TransportError) -> Self {
        Self { error }
    }
}

impl EmailTransport for FailingTransport {
    fn send(&self, _payload: &EmailPayload) -> Result<(), TransportError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::AttachmentSet;
    use crate::contact::ContactForm;
    use feeder_core::data::FeederData;
    use feeder_core::schema::{DimensionSchema, FeederSchema};

    fn payload() -> EmailPayload {
        let schema = FeederSchema::new("hopper", DimensionSchema::from_pairs(&[("H", "Height")]));
        EmailPayload::build(
            &ContactForm::default(),
            &FeederData::new(),
            &schema,
            &AttachmentSet::new(),
        )
    }

    #[test]
    fn test_outbox_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let transport = OutboxTransport::new(dir.path().join("outbox"));
        let payload = payload();

        transport.send(&payload).unwrap();

        let written = fs::read_to_string(transport.path_for(&payload)).unwrap();
        let restored: EmailPayload = serde_json::from_str(&written).unwrap();
        assert_eq!(restored, payload);
    }

    #[test]
    fn test_outbox_unwritable_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let transport = OutboxTransport::new(file.path());

        let error = transport.send(&payload()).unwrap_err();
        assert!(matches!(error, TransportError::Unavailable { .. }));
        assert_eq!(error.error_code(), codes::submission::TRANSPORT_FAILURE);
    }

    #[test]
    fn test_recording_and_failing() {
        let recording = RecordingTransport::new();
        recording.send(&payload()).unwrap();
        assert_eq!(recording.sent_count(), 1);

        let failing = FailingTransport::new(TransportError::Rejected {
            status: 500,
            message: "Failed to send email".to_string(),
        });
        assert!(failing.send(&payload()).is_err());
    }
}
