//! Paste dialog: preview / apply state machine around the parser
//!
//! ```text
//! Idle --open--> Editing --analyze--> Previewing --apply--> Idle
//!                  |  ^                  |
//!                  |  +------back--------+
//!                  +--------apply---------------------------> Idle
//! any --cancel--> Idle
//! ```

use feeder_core::data::{FormStore, ParsedConfiguration};
use feeder_core::logging::{self, codes, LogEvent};
use feeder_core::parser::{ConfigurationParser, ParseMetrics, ParseResult};
use feeder_core::schema::FeederSchema;
use feeder_core::{log_error, log_info, log_success};
use std::fmt;
use thiserror::Error;

/// Shown after a successful apply
pub const IMPORT_SUCCESS_MESSAGE: &str = "Data imported successfully!";

/// Shown when the pasted text went past the paste limits
pub const PASTE_TRUNCATED_MESSAGE: &str =
    "The pasted text is too long. Only the beginning was analyzed, please check the result.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Idle,
    Editing,
    Previewing,
}

impl fmt::Display for DialogPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialogPhase::Idle => "idle",
            DialogPhase::Editing => "editing",
            DialogPhase::Previewing => "previewing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DialogState {
    Idle,
    Editing,
    Previewing(ParsedConfiguration),
}

impl DialogState {
    fn phase(&self) -> DialogPhase {
        match self {
            DialogState::Idle => DialogPhase::Idle,
            DialogState::Editing => DialogPhase::Editing,
            DialogState::Previewing(_) => DialogPhase::Previewing,
        }
    }
}

/// Result of a dialog action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowStatus {
    Editing,
    Previewing {
        machine_info: usize,
        dimensions: usize,
    },
    /// Parsed values merged into the store; dialog back to idle
    Applied { keys: usize },
    /// Dialog closed without touching the store
    Cancelled,
    /// Only part of the text was scanned; the partial result is previewed
    Advisory {
        message: String,
        machine_info: usize,
        dimensions: usize,
    },
}

impl WorkflowStatus {
    /// Text for the user, when the status carries one
    pub fn message(&self) -> Option<&str> {
        match self {
            WorkflowStatus::Applied { .. } => Some(IMPORT_SUCCESS_MESSAGE),
            WorkflowStatus::Advisory { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Cannot {action} while the paste dialog is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: DialogPhase,
    },
}

impl WorkflowError {
    pub fn error_code(&self) -> codes::Code {
        codes::workflow::INVALID_TRANSITION
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Paste dialog for one feeder page
#[derive(Debug, Clone)]
pub struct PasteDialog {
    parser: ConfigurationParser,
    state: DialogState,
    text: String,
}

impl PasteDialog {
    pub fn new(parser: ConfigurationParser) -> Self {
        Self {
            parser,
            state: DialogState::Idle,
            text: String::new(),
        }
    }

    pub fn for_schema(schema: &FeederSchema) -> ParseResult<Self> {
        Ok(Self::new(ConfigurationParser::for_schema(schema)?))
    }

    pub fn phase(&self) -> DialogPhase {
        self.state.phase()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cached result while previewing
    pub fn preview(&self) -> Option<&ParsedConfiguration> {
        match &self.state {
            DialogState::Previewing(parsed) => Some(parsed),
            _ => None,
        }
    }

    pub fn open(&mut self) -> WorkflowResult<WorkflowStatus> {
        self.require("open", &[DialogPhase::Idle])?;
        self.text.clear();
        self.state = DialogState::Editing;
        Ok(WorkflowStatus::Editing)
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> WorkflowResult<()> {
        self.require("edit text", &[DialogPhase::Editing])?;
        self.text = text.into();
        Ok(())
    }

    /// Parse the current text and cache the result for preview
    pub fn analyze(&mut self) -> WorkflowResult<WorkflowStatus> {
        self.require("analyze", &[DialogPhase::Editing, DialogPhase::Previewing])?;

        let (parsed, metrics) = self.parser.parse_with_metrics(&self.text);
        let (machine_info, dimensions) = (parsed.machine_info.len(), parsed.dimensions.len());
        self.state = DialogState::Previewing(parsed);

        if metrics.truncated {
            log_advisory(&metrics);
            return Ok(WorkflowStatus::Advisory {
                message: PASTE_TRUNCATED_MESSAGE.to_string(),
                machine_info,
                dimensions,
            });
        }

        Ok(WorkflowStatus::Previewing {
            machine_info,
            dimensions,
        })
    }

    /// Merge the parsed values into the store.
    ///
    /// From previewing the cached result is applied; from editing the text is
    /// parsed once first, and a truncated parse is applied as far as it got.
    pub fn apply(
        &mut self,
        store: &mut FormStore,
        feeder_type: &str,
    ) -> WorkflowResult<WorkflowStatus> {
        self.require("apply", &[DialogPhase::Editing, DialogPhase::Previewing])?;

        let parsed = match &self.state {
            DialogState::Previewing(parsed) => parsed.clone(),
            _ => {
                let (parsed, metrics) = self.parser.parse_with_metrics(&self.text);
                if metrics.truncated {
                    log_advisory(&metrics);
                }
                parsed
            }
        };

        let keys = logging::with_feeder_context(feeder_type, || {
            let keys = store.entry(feeder_type).overlay(&parsed);
            log_success!(
                codes::success::PARSED_DATA_APPLIED,
                IMPORT_SUCCESS_MESSAGE,
                "keys" => keys
            );
            keys
        });

        self.reset();
        Ok(WorkflowStatus::Applied { keys })
    }

    /// Discard the preview and return to editing with the text kept
    pub fn back(&mut self) -> WorkflowResult<WorkflowStatus> {
        self.require("go back", &[DialogPhase::Previewing])?;
        self.state = DialogState::Editing;
        Ok(WorkflowStatus::Editing)
    }

    /// Close the dialog from any phase
    pub fn cancel(&mut self) -> WorkflowStatus {
        if self.phase() != DialogPhase::Idle {
            log_info!("Paste dialog cancelled", "phase" => self.phase());
        }
        self.reset();
        WorkflowStatus::Cancelled
    }

    fn reset(&mut self) {
        self.state = DialogState::Idle;
        self.text.clear();
    }

    fn require(&self, action: &'static str, allowed: &[DialogPhase]) -> WorkflowResult<()> {
        let phase = self.phase();
        if allowed.contains(&phase) {
            return Ok(());
        }

        let error = WorkflowError::InvalidTransition { action, phase };
        log_error!(error.error_code(), &error.to_string());
        Err(error)
    }
}

fn log_advisory(metrics: &ParseMetrics) {
    let scanned = metrics.lines_scanned.to_string();
    logging::log_with_context(
        LogEvent::warning_with_code(codes::workflow::PASTE_TRUNCATED, PASTE_TRUNCATED_MESSAGE),
        vec![("lines_scanned", scanned.as_str())],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use feeder_core::config::compile_time::paste::{MAX_PASTE_BYTES, MAX_PASTE_LINES};
    use feeder_core::schema::DimensionSchema;

    fn schema() -> FeederSchema {
        FeederSchema::new(
            "bowl",
            DimensionSchema::from_pairs(&[("A", "Bowl Diameter"), ("B", "Height")]),
        )
    }

    fn dialog() -> PasteDialog {
        PasteDialog::for_schema(&schema()).unwrap()
    }

    #[test]
    fn test_preview_then_apply() {
        let mut store = FormStore::new();
        store.entry("bowl").set_dimension("B", "40");
        let mut dialog = dialog();

        assert_eq!(dialog.open().unwrap(), WorkflowStatus::Editing);
        dialog.set_text("Machine no.: M-42\nA: 120").unwrap();
        assert_eq!(
            dialog.analyze().unwrap(),
            WorkflowStatus::Previewing {
                machine_info: 1,
                dimensions: 1
            }
        );
        // nothing merged before apply
        assert_eq!(store.get("bowl").dimension("A"), None);

        let status = dialog.apply(&mut store, "bowl").unwrap();
        assert_eq!(status, WorkflowStatus::Applied { keys: 2 });
        assert_eq!(status.message(), Some(IMPORT_SUCCESS_MESSAGE));

        let data = store.get("bowl");
        assert_eq!(data.dimension("A"), Some("120"));
        assert_eq!(data.dimension("B"), Some("40"));
        assert_eq!(data.machine_info_value("machineNo"), Some("M-42"));

        assert_eq!(dialog.phase(), DialogPhase::Idle);
        assert!(dialog.text().is_empty());
    }

    #[test]
    fn test_direct_apply_from_editing() {
        let mut store = FormStore::new();
        let mut dialog = dialog();

        dialog.open().unwrap();
        dialog.set_text("UPH: 900").unwrap();
        assert_eq!(
            dialog.apply(&mut store, "bowl").unwrap(),
            WorkflowStatus::Applied { keys: 1 }
        );
        assert_eq!(store.get("bowl").machine_info_value("uph"), Some("900"));
    }

    #[test]
    fn test_back_keeps_text_and_drops_preview() {
        let mut dialog = dialog();
        dialog.open().unwrap();
        dialog.set_text("A: 1").unwrap();
        dialog.analyze().unwrap();
        assert!(dialog.preview().is_some());

        assert_eq!(dialog.back().unwrap(), WorkflowStatus::Editing);
        assert!(dialog.preview().is_none());
        assert_eq!(dialog.text(), "A: 1");
    }

    #[test]
    fn test_reanalyze_replaces_preview() {
        let mut dialog = dialog();
        dialog.open().unwrap();
        dialog.set_text("A: 1").unwrap();
        dialog.analyze().unwrap();
        dialog.back().unwrap();
        dialog.set_text("A: 2\nB: 3").unwrap();
        dialog.analyze().unwrap();
        dialog.analyze().unwrap();

        let preview = dialog.preview().unwrap();
        assert_eq!(preview.dimensions["A"], "2");
        assert_eq!(preview.dimensions["B"], "3");
    }

    #[test]
    fn test_cancel_leaves_store_untouched() {
        let mut store = FormStore::new();
        store.entry("bowl").set_dimension("A", "10");
        let before = store.clone();
        let mut dialog = dialog();

        dialog.open().unwrap();
        dialog.set_text("A: 99").unwrap();
        dialog.analyze().unwrap();

        assert_eq!(dialog.cancel(), WorkflowStatus::Cancelled);
        assert_eq!(dialog.phase(), DialogPhase::Idle);
        assert_eq!(store, before);

        // cancelling an idle dialog is allowed
        assert_eq!(dialog.cancel(), WorkflowStatus::Cancelled);
    }

    #[test]
    fn test_invalid_transitions_keep_state() {
        let mut store = FormStore::new();
        let mut dialog = dialog();

        assert_matches!(
            dialog.analyze(),
            Err(WorkflowError::InvalidTransition { phase: DialogPhase::Idle, .. })
        );
        assert_matches!(dialog.set_text("x"), Err(WorkflowError::InvalidTransition { .. }));
        assert_matches!(dialog.apply(&mut store, "bowl"), Err(_));
        assert_matches!(dialog.back(), Err(_));
        assert_eq!(dialog.phase(), DialogPhase::Idle);

        dialog.open().unwrap();
        assert_matches!(dialog.open(), Err(_));
        assert_matches!(dialog.back(), Err(_));
        assert_eq!(dialog.phase(), DialogPhase::Editing);

        dialog.analyze().unwrap();
        assert_matches!(
            dialog.set_text("A: 5"),
            Err(WorkflowError::InvalidTransition { phase: DialogPhase::Previewing, .. })
        );
        assert_eq!(dialog.phase(), DialogPhase::Previewing);
        assert!(store.get("bowl").is_empty());
    }

    #[test]
    fn test_truncated_paste_previews_partial_result() {
        let mut store = FormStore::new();
        let mut dialog = dialog();
        dialog.open().unwrap();
        let filler = "note line without values\n".repeat(MAX_PASTE_BYTES / 20);
        dialog.set_text(format!("A: 5\n{}B: 9", filler)).unwrap();

        let status = dialog.analyze().unwrap();
        assert_eq!(
            status,
            WorkflowStatus::Advisory {
                message: PASTE_TRUNCATED_MESSAGE.to_string(),
                machine_info: 0,
                dimensions: 1,
            }
        );
        assert_eq!(status.message(), Some(PASTE_TRUNCATED_MESSAGE));
        assert_eq!(dialog.phase(), DialogPhase::Previewing);
        assert_eq!(dialog.preview().unwrap().dimensions["A"], "5");

        assert_eq!(
            dialog.apply(&mut store, "bowl").unwrap(),
            WorkflowStatus::Applied { keys: 1 }
        );
        assert_eq!(store.get("bowl").dimension("A"), Some("5"));
        assert_eq!(store.get("bowl").dimension("B"), None);
    }

    #[test]
    fn test_truncated_paste_applies_directly() {
        let mut store = FormStore::new();
        let mut dialog = dialog();
        dialog.open().unwrap();
        let filler = "\n".repeat(MAX_PASTE_LINES);
        dialog.set_text(format!("UPH: 900\n{}A: 5", filler)).unwrap();

        assert_eq!(
            dialog.apply(&mut store, "bowl").unwrap(),
            WorkflowStatus::Applied { keys: 1 }
        );
        assert_eq!(store.get("bowl").machine_info_value("uph"), Some("900"));
        assert_eq!(store.get("bowl").dimension("A"), None);
    }
}
