//! Sending a completed feeder page

use crate::attachments::AttachmentSet;
use crate::contact::{ContactError, ContactForm};
use crate::email::EmailPayload;
use crate::transport::{EmailTransport, TransportError};
use chrono::{DateTime, Utc};
use feeder_core::data::FormStore;
use feeder_core::logging::{self, codes};
use feeder_core::schema::FeederSchema;
use feeder_core::validation::{validate_feeder, ValidationError};
use feeder_core::{log_error, log_success};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub const SENT_MESSAGE: &str = "Email sent successfully!";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    pub sent_at: DateTime<Utc>,
    pub feeder_type: String,
    pub transport: String,
    pub attachment_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error(transparent)]
    Incomplete(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SubmissionError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::Contact(e) => e.error_code(),
            Self::Incomplete(e) => e.error_code(),
            Self::Transport(e) => e.error_code(),
        }
    }

    /// Text for the user; transport details stay in the logs
    pub fn user_message(&self) -> String {
        match self {
            Self::Contact(e) => e.to_string(),
            Self::Incomplete(e) => e.user_message(),
            Self::Transport(_) => SEND_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Definite result of a send attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Sent(SubmissionReceipt),
    Failed { message: String, retryable: bool },
}

impl SubmissionOutcome {
    pub fn message(&self) -> &str {
        match self {
            SubmissionOutcome::Sent(_) => SENT_MESSAGE,
            SubmissionOutcome::Failed { message, .. } => message,
        }
    }
}

impl From<Result<SubmissionReceipt, SubmissionError>> for SubmissionOutcome {
    fn from(result: Result<SubmissionReceipt, SubmissionError>) -> Self {
        match result {
            Ok(receipt) => SubmissionOutcome::Sent(receipt),
            Err(e) => SubmissionOutcome::Failed {
                message: e.user_message(),
                retryable: matches!(e, SubmissionError::Transport(_)),
            },
        }
    }
}

/// Check the contact form and page, build the payload and send it once.
///
/// Neither the store nor the contact form is modified, so a failed send can
/// be retried as is.
pub fn submit(
    transport: &dyn EmailTransport,
    store: &FormStore,
    schema: &FeederSchema,
    contact: &ContactForm,
    attachments: &AttachmentSet,
) -> Result<SubmissionReceipt, SubmissionError> {
    logging::with_feeder_context(&schema.feeder_type, || {
        let result = send_checked(transport, store, schema, contact, attachments);
        match &result {
            Ok(receipt) => log_success!(
                codes::success::SUBMISSION_SENT,
                SENT_MESSAGE,
                "submission_id" => receipt.submission_id,
                "transport" => transport.name(),
                "attachments" => receipt.attachment_count
            ),
            Err(e) => log_error!(
                e.error_code(),
                "Submission failed",
                "transport" => transport.name(),
                "error" => e
            ),
        }
        result
    })
}

fn send_checked(
    transport: &dyn EmailTransport,
    store: &FormStore,
    schema: &FeederSchema,
    contact: &ContactForm,
    attachments: &AttachmentSet,
) -> Result<SubmissionReceipt, SubmissionError> {
    contact.check()?;

    let data = store.get(&schema.feeder_type);
    validate_feeder(data, schema)?;

    let payload = EmailPayload::build(contact, data, schema, attachments);
    transport.send(&payload)?;

    Ok(SubmissionReceipt {
        submission_id: payload.submission_id,
        sent_at: Utc::now(),
        feeder_type: schema.feeder_type.clone(),
        transport: transport.name().to_string(),
        attachment_count: payload.attachments.len(),
    })
}
