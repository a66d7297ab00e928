//! Per-schema line patterns
//!
//! Every label, code and description is passed through [`regex::escape`]
//! before interpolation, so schema text like `Machine no.` or `Width (W)`
//! matches literally.

use super::error::{ParseError, ParseResult};
use crate::schema::{DimensionSpec, MachineInfoField};
use regex::{Regex, RegexBuilder};

fn compile(target: &str, pattern: &str) -> ParseResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ParseError::PatternConstruction {
            target: target.to_string(),
            source,
        })
}

/// Label patterns for one machine-info field
#[derive(Debug, Clone)]
pub struct FieldPatterns {
    pub id: String,
    /// `<label>: value`
    with_colon: Regex,
    /// `<label> value`
    with_space: Regex,
}

impl FieldPatterns {
    pub fn new(field: &MachineInfoField) -> ParseResult<Self> {
        let label = regex::escape(&field.label);
        Ok(Self {
            id: field.id.clone(),
            with_colon: compile(&field.id, &format!(r"{}\s*:\s*(.+)", label))?,
            with_space: compile(&field.id, &format!(r"{}\s+([^:]+)", label))?,
        })
    }

    /// Trimmed value on `line`, the colon form taking priority
    pub fn match_line(&self, line: &str) -> Option<String> {
        [&self.with_colon, &self.with_space]
            .into_iter()
            .find_map(|pattern| capture_trimmed(pattern, line))
    }
}

/// Ordered patterns for one dimension code
#[derive(Debug, Clone)]
pub struct DimensionPatterns {
    pub code: String,
    /// Tried in order; the first that captures wins
    ordered: [Regex; 5],
}

impl DimensionPatterns {
    pub fn new(spec: &DimensionSpec) -> ParseResult<Self> {
        let code = regex::escape(&spec.code);
        let description = regex::escape(&spec.description);
        let target = spec.code.as_str();

        Ok(Self {
            code: spec.code.clone(),
            ordered: [
                // A: 120
                compile(target, &format!(r"\b{}\s*:\s*([0-9]+)", code))?,
                // A (Bowl Diameter): 120
                compile(target, &format!(r"\b{}\s*\([^)]*\)\s*:\s*([0-9]+)", code))?,
                // A ... 120 mm
                compile(target, &format!(r"\b{}\b[^:]*?\b([0-9]+)\s*mm\b", code))?,
                // Bowl Diameter: 120
                compile(target, &format!(r"\b{}\s*:\s*([0-9]+)", description))?,
                // A ... 120
                compile(target, &format!(r"\b{}\b[^:]*?\b([0-9]+)\b", code))?,
            ],
        })
    }

    pub fn match_line(&self, line: &str) -> Option<String> {
        self.ordered
            .iter()
            .find_map(|pattern| capture_trimmed(pattern, line))
    }
}

fn capture_trimmed(pattern: &Regex, line: &str) -> Option<String> {
    let value = pattern.captures(line)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimension(code: &str, description: &str) -> DimensionPatterns {
        DimensionPatterns::new(&DimensionSpec::new(code, description)).unwrap()
    }

    #[test]
    fn test_field_colon_form_wins() {
        let patterns = FieldPatterns::new(&MachineInfoField::number("uph", "UPH")).unwrap();

        assert_eq!(patterns.match_line("UPH: 1200"), Some("1200".to_string()));
        assert_eq!(patterns.match_line("uph 900 parts"), Some("900 parts".to_string()));
        assert_eq!(patterns.match_line("UPH:   "), None);
    }

    #[test]
    fn test_field_label_is_literal() {
        let patterns =
            FieldPatterns::new(&MachineInfoField::text("machineNo", "Machine no.")).unwrap();

        assert_eq!(patterns.match_line("Machine no.: M-42"), Some("M-42".to_string()));
        // the dot must not match an arbitrary character
        assert_eq!(patterns.match_line("Machine nox: M-42"), None);
    }

    #[test]
    fn test_field_label_with_parentheses() {
        let patterns =
            FieldPatterns::new(&MachineInfoField::text("speed", "Speed (rpm)")).unwrap();
        assert_eq!(patterns.match_line("speed (RPM): 40"), Some("40".to_string()));
    }

    #[test]
    fn test_dimension_pattern_precedence() {
        let patterns = dimension("A", "Bowl Diameter");

        assert_eq!(patterns.match_line("A: 120"), Some("120".to_string()));
        assert_eq!(patterns.match_line("A (Bowl Diameter): 300"), Some("300".to_string()));
        assert_eq!(patterns.match_line("A is 250 mm wide"), Some("250".to_string()));
        assert_eq!(patterns.match_line("bowl diameter: 410"), Some("410".to_string()));
        assert_eq!(patterns.match_line("A around 90"), Some("90".to_string()));
        assert_eq!(patterns.match_line("Area: 90"), None);
    }

    #[test]
    fn test_dimension_mm_form_beats_bare_number() {
        let patterns = dimension("B", "Height");
        assert_eq!(patterns.match_line("B rev 2 height 75 mm"), Some("75".to_string()));
    }

    #[test]
    fn test_dimension_code_is_literal() {
        let patterns = dimension("A.1", "Inner (Ø)");

        assert_eq!(patterns.match_line("A.1: 12"), Some("12".to_string()));
        assert_eq!(patterns.match_line("AX1: 12"), None);
        assert_eq!(patterns.match_line("Inner (Ø): 33"), Some("33".to_string()));
    }
}
