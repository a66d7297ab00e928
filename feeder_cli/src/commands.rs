//! Command handlers. Each returns `Ok(false)` when the command ran but the
//! page is not in the requested state.

use chrono::Local;
use crate::session::{self, CliResult};
use crate::Gate;
use feeder_core::data::FeederData;
use feeder_core::parser::{ConfigurationParser, ParseError};
use feeder_core::validation::CompletenessReport;
use feeder_wizard::{
    clear_page, gate_next, gate_ok, render_configuration_html, render_configuration_text, submit as wizard_submit,
    Attachment, AttachmentSet, ContactForm, OutboxTransport, PasteDialog, SubmissionOutcome,
    WorkflowStatus, PASTE_TRUNCATED_MESSAGE,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn check_schema(path: &Path, json: bool) -> CliResult<bool> {
    let schema = session::schema(path)?;

    if json {
        print_json(&schema)?;
    } else {
        println!("[OK] {} ({})", schema.display_title(), schema.feeder_type);
        println!("  Dimensions: {}", schema.dimensions.codes().collect::<Vec<_>>().join(", "));
        for field in schema.machine_info.iter() {
            let exempt = if field.is_exempt() { " (optional)" } else { "" };
            println!("  {} [{}] {}{}", field.id, field.field_type.as_str(), field.label, exempt);
        }
    }
    Ok(true)
}

pub fn parse(schema_path: &Path, input: Option<&Path>, json: bool) -> CliResult<bool> {
    let schema = session::schema(schema_path)?;
    let text = session::read_input(input)?;
    let parser = match ConfigurationParser::for_schema(&schema) {
        Ok(parser) => parser,
        Err(e) => return Ok(parse_failed(&e)),
    };

    let (parsed, metrics) = parser.parse_with_metrics(&text);
    if json {
        print_json(&parsed)?;
    } else {
        print_parsed(&parsed.machine_info, &parsed.dimensions);
    }
    if metrics.truncated {
        eprintln!("{}", PASTE_TRUNCATED_MESSAGE);
    }
    Ok(true)
}

fn parse_failed(error: &ParseError) -> bool {
    log::warn!("{}", error);
    eprintln!("{}", error.user_message());
    false
}

fn print_parsed(
    machine_info: &std::collections::BTreeMap<String, String>,
    dimensions: &std::collections::BTreeMap<String, String>,
) {
    println!("Machine info:");
    for (id, value) in machine_info {
        println!("  {}: {}", id, value);
    }
    println!("Dimensions:");
    for (code, value) in dimensions {
        println!("  {}: {}", code, value);
    }
}

pub fn apply(
    schema_path: &Path,
    data_path: &Path,
    input: Option<&Path>,
    preview: bool,
    json: bool,
) -> CliResult<bool> {
    let schema = session::schema(schema_path)?;
    let mut store = session::load_store(data_path)?;
    let mut dialog = match PasteDialog::for_schema(&schema) {
        Ok(dialog) => dialog,
        Err(e) => return Ok(parse_failed(&e)),
    };

    dialog.open()?;
    dialog.set_text(session::read_input(input)?)?;

    if let WorkflowStatus::Advisory { message, .. } = dialog.analyze()? {
        eprintln!("{}", message);
    }

    if preview {
        if let Some(parsed) = dialog.preview() {
            if json {
                print_json(parsed)?;
            } else {
                print_parsed(&parsed.machine_info, &parsed.dimensions);
            }
        }
    }

    match dialog.apply(&mut store, &schema.feeder_type)? {
        status @ WorkflowStatus::Applied { .. } => {
            session::save_store(data_path, &store)?;
            if !json {
                println!("{}", status.message().unwrap_or_default());
            }
            Ok(true)
        }
        status => {
            eprintln!("{}", status.message().unwrap_or_default());
            Ok(false)
        }
    }
}

pub fn edit(schema_path: &Path, data_path: &Path, assignments: &[String]) -> CliResult<bool> {
    let schema = session::schema(schema_path)?;
    let mut store = session::load_store(data_path)?;
    let data: &mut FeederData = store.entry(&schema.feeder_type);

    for assignment in assignments {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("Expected KEY=VALUE, got '{}'", assignment))?;
        let key = key.trim();

        if schema.dimensions.contains(key) {
            data.edit_dimension(&schema.dimensions, key, value)?;
        } else {
            data.edit_machine_info(&schema.machine_info, key, value)?;
        }
    }

    session::save_store(data_path, &store)?;
    Ok(true)
}

pub fn validate(schema_path: &Path, data_path: &Path, gate: Gate, json: bool) -> CliResult<bool> {
    let schema = session::schema(schema_path)?;
    let store = session::load_store(data_path)?;

    if gate == Gate::Report {
        let report = CompletenessReport::build(store.get(&schema.feeder_type), &schema);
        if json {
            print_json(&report)?;
        } else if report.is_complete() {
            println!("[OK] {} complete", schema.feeder_type);
        } else {
            println!("Missing dimensions: {}", report.missing_dimensions.join(", "));
            println!("Missing fields: {}", report.missing_fields.join(", "));
        }
        return Ok(report.is_complete());
    }

    let outcome = match gate {
        Gate::Next => gate_next(&store, &schema),
        _ => gate_ok(&store, &schema),
    };

    if json {
        print_json(&outcome)?;
    } else {
        match outcome.message() {
            Some(message) => println!("{}", message),
            None => println!("[OK] {} complete", schema.feeder_type),
        }
    }
    Ok(outcome.is_complete())
}

pub fn render(schema_path: &Path, data_path: &Path, html: bool) -> CliResult<bool> {
    let schema = session::schema(schema_path)?;
    let store = session::load_store(data_path)?;
    let data = store.get(&schema.feeder_type);
    let now = Local::now().naive_local();

    if html {
        print!("{}", render_configuration_html(data, &schema, &now));
    } else {
        print!("{}", render_configuration_text(data, &schema, &now));
    }
    Ok(true)
}

pub fn clear(schema_path: &Path, data_path: &Path) -> CliResult<bool> {
    let schema = session::schema(schema_path)?;
    let mut store = session::load_store(data_path)?;

    println!("{}", clear_page(&mut store, &schema.feeder_type));
    session::save_store(data_path, &store)?;
    Ok(true)
}

pub fn submit(
    schema_path: &Path,
    data_path: &Path,
    contact: &ContactForm,
    attachment_paths: &[PathBuf],
    outbox: &Path,
    json: bool,
) -> CliResult<bool> {
    let schema = session::schema(schema_path)?;
    let store = session::load_store(data_path)?;

    let mut attachments = AttachmentSet::new();
    let files = attachment_paths
        .iter()
        .map(|path| Attachment::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;
    attachments.add(files)?;

    let transport = OutboxTransport::new(outbox);
    let result = wizard_submit(&transport, &store, &schema, contact, &attachments);

    if let (true, Ok(receipt)) = (json, &result) {
        print_json(receipt)?;
    }

    let outcome = SubmissionOutcome::from(result);
    match &outcome {
        SubmissionOutcome::Sent(receipt) => {
            if !json {
                println!("{} ({})", outcome.message(), receipt.submission_id);
            }
            Ok(true)
        }
        SubmissionOutcome::Failed { message, .. } => {
            eprintln!("{}", message);
            Ok(false)
        }
    }
}
