//! Wizard-side orchestration for feeder configuration pages

pub mod attachments;
pub mod contact;
pub mod email;
pub mod gate;
pub mod submission;
pub mod transport;
pub mod workflow;

// Re-export key types for library consumers
pub use attachments::{Attachment, AttachmentError, AttachmentSet};
pub use contact::{ContactError, ContactForm};
pub use email::{render_configuration_html, render_configuration_text, EmailPayload};
pub use gate::{clear_page, gate_next, gate_ok, GateOutcome};
pub use submission::{submit, SubmissionError, SubmissionOutcome, SubmissionReceipt};
pub use transport::{
    EmailTransport, FailingTransport, OutboxTransport, RecordingTransport, TransportError,
};
pub use workflow::{
    DialogPhase, PasteDialog, WorkflowError, WorkflowStatus, PASTE_TRUNCATED_MESSAGE,
};
