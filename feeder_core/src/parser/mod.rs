//! Paste-data parser
//!
//! Recovers machine-info values and dimension numbers from free text. Lines
//! are scanned top to bottom. Each line is tried against every machine-info
//! field and every dimension code, and a later match overwrites an earlier
//! one for the same key. Text past the compile-time paste limits is not
//! scanned, and the result reports the truncation.

pub mod error;
pub mod patterns;

pub use error::{ParseError, ParseResult, PARSE_FAILURE_MESSAGE};
pub use patterns::{DimensionPatterns, FieldPatterns};

use crate::config::compile_time::paste::{MAX_PASTE_BYTES, MAX_PASTE_LINES};
use crate::config::ParserPreferences;
use crate::data::ParsedConfiguration;
use crate::logging::codes;
use crate::schema::{DimensionSchema, FeederSchema, MachineInfoSchema};
use crate::{log_debug, log_error, log_success, log_warning};
use std::time::Instant;

/// Counters collected during one parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseMetrics {
    pub lines_scanned: usize,
    pub lines_skipped: usize,
    pub machine_info_matches: usize,
    pub dimension_matches: usize,
    /// Input went past `MAX_PASTE_BYTES` or `MAX_PASTE_LINES`; the rest was not scanned
    pub truncated: bool,
    pub duration_ms: u128,
}

/// Parser with the patterns for one schema compiled once
#[derive(Debug, Clone)]
pub struct ConfigurationParser {
    fields: Vec<FieldPatterns>,
    dimensions: Vec<DimensionPatterns>,
    preferences: ParserPreferences,
}

impl ConfigurationParser {
    pub fn new(dimensions: &DimensionSchema, fields: &MachineInfoSchema) -> ParseResult<Self> {
        Self::with_preferences(dimensions, fields, ParserPreferences::default())
    }

    pub fn for_schema(schema: &FeederSchema) -> ParseResult<Self> {
        Self::new(&schema.dimensions, &schema.machine_info)
    }

    pub fn with_preferences(
        dimensions: &DimensionSchema,
        fields: &MachineInfoSchema,
        preferences: ParserPreferences,
    ) -> ParseResult<Self> {
        let fields = fields
            .iter()
            .map(FieldPatterns::new)
            .collect::<ParseResult<Vec<_>>>();
        let dimensions = dimensions
            .iter()
            .map(DimensionPatterns::new)
            .collect::<ParseResult<Vec<_>>>();

        match (fields, dimensions) {
            (Ok(fields), Ok(dimensions)) => Ok(Self {
                fields,
                dimensions,
                preferences,
            }),
            (Err(e), _) | (_, Err(e)) => {
                log_error!(e.error_code(), "Failed to compile paste patterns", "error" => &e);
                Err(e)
            }
        }
    }

    /// Parse pasted text into machine-info values and dimensions.
    ///
    /// Never fails: text without matches gives an empty result, and text over
    /// the paste limits is scanned up to the limit.
    pub fn parse(&self, text: &str) -> ParsedConfiguration {
        self.parse_with_metrics(text).0
    }

    pub fn parse_with_metrics(&self, text: &str) -> (ParsedConfiguration, ParseMetrics) {
        let start = Instant::now();

        let mut parsed = ParsedConfiguration::default();
        let mut metrics = ParseMetrics::default();

        let (window, cut_by_size) = scan_window(text);
        let mut lines = window.lines().enumerate();

        for (index, raw) in lines.by_ref().take(MAX_PASTE_LINES) {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if self.preferences.skip_separator_lines && is_separator_line(line) {
                metrics.lines_skipped += 1;
                continue;
            }
            metrics.lines_scanned += 1;

            for field in &self.fields {
                if let Some(value) = field.match_line(line) {
                    if self.preferences.log_line_matches {
                        log_debug!("Machine-info match",
                            "line" => index + 1, "field" => &field.id, "value" => &value);
                    }
                    parsed.machine_info.insert(field.id.clone(), value);
                    metrics.machine_info_matches += 1;
                }
            }

            for dimension in &self.dimensions {
                if let Some(value) = dimension.match_line(line) {
                    if self.preferences.log_line_matches {
                        log_debug!("Dimension match",
                            "line" => index + 1, "code" => &dimension.code, "value" => &value);
                    }
                    parsed.dimensions.insert(dimension.code.clone(), value);
                    metrics.dimension_matches += 1;
                }
            }
        }

        metrics.truncated = cut_by_size || lines.next().is_some();
        metrics.duration_ms = start.elapsed().as_millis();

        if metrics.truncated {
            log_warning!(
                "Pasted text truncated",
                "bytes" => text.len(),
                "max_bytes" => MAX_PASTE_BYTES,
                "max_lines" => MAX_PASTE_LINES
            );
        }

        log_success!(
            codes::success::PARSE_COMPLETE,
            "Pasted text parsed",
            "lines" => metrics.lines_scanned,
            "machine_info" => parsed.machine_info.len(),
            "dimensions" => parsed.dimensions.len(),
            "duration_ms" => metrics.duration_ms
        );

        (parsed, metrics)
    }
}

/// One-shot parse without keeping the compiled patterns
pub fn parse_configuration_text(
    text: &str,
    dimensions: &DimensionSchema,
    fields: &MachineInfoSchema,
) -> ParseResult<ParsedConfiguration> {
    Ok(ConfigurationParser::new(dimensions, fields)?.parse(text))
}

/// Leading part of `text` within `MAX_PASTE_BYTES`, cut after the last whole
/// line so a value is never read from half a line
fn scan_window(text: &str) -> (&str, bool) {
    if text.len() <= MAX_PASTE_BYTES {
        return (text, false);
    }

    if text.as_bytes()[MAX_PASTE_BYTES] == b'\n' {
        return (&text[..MAX_PASTE_BYTES], true);
    }

    let mut end = MAX_PASTE_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let end = text[..end].rfind('\n').unwrap_or(0);
    (&text[..end], true)
}

/// Rule lines such as `-----` or `=====`
fn is_separator_line(line: &str) -> bool {
    line.chars()
        .all(|c| matches!(c, '-' | '=' | '_' | '*' | '#' | '~' | '|') || c.is_whitespace())
}
