//! Outbound email payload and its text / HTML renderings

use crate::attachments::AttachmentSet;
use crate::contact::ContactForm;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use feeder_core::data::FeederData;
use feeder_core::schema::FeederSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rendered for any field or dimension that is not set
pub const NOT_SPECIFIED: &str = "Not specified";

const SECTION_RULE: &str = "---------------------------------------------------------------";

/// `dd/mm/yyyy at HH:MM`
pub fn format_generated_on(at: &NaiveDateTime) -> String {
    at.format("%d/%m/%Y at %H:%M").to_string()
}

/// One rendered line: label (or code) and display value
#[derive(Debug, Clone, PartialEq, Eq)]
struct Row<'a> {
    label: &'a str,
    value: String,
}

fn machine_info_rows<'a>(data: &FeederData, schema: &'a FeederSchema) -> Vec<Row<'a>> {
    schema
        .machine_info
        .iter()
        .map(|field| Row {
            label: &field.label,
            value: match data.machine_info_value(&field.id) {
                Some(value) if !value.trim().is_empty() => value.trim().to_string(),
                _ => NOT_SPECIFIED.to_string(),
            },
        })
        .collect()
}

fn dimension_rows<'a>(data: &FeederData, schema: &'a FeederSchema) -> Vec<Row<'a>> {
    schema
        .dimensions
        .iter()
        .map(|spec| Row {
            label: &spec.code,
            value: match data.dimension(&spec.code) {
                Some(value) if !value.trim().is_empty() => format!("{} mm", value.trim()),
                _ => NOT_SPECIFIED.to_string(),
            },
        })
        .collect()
}

/// Plain-text configuration summary in schema declaration order
pub fn render_configuration_text(
    data: &FeederData,
    schema: &FeederSchema,
    generated_at: &NaiveDateTime,
) -> String {
    let mut out = String::new();
    out.push_str(schema.display_title());
    out.push('\n');
    out.push_str(&format!("Generated on: {}\n\n", format_generated_on(generated_at)));

    out.push_str("MACHINE INFORMATION\n");
    out.push_str(SECTION_RULE);
    out.push('\n');
    for row in machine_info_rows(data, schema) {
        out.push_str(&format!("{}: {}\n", row.label, row.value));
    }

    out.push_str("\nDIMENSIONS\n");
    out.push_str(SECTION_RULE);
    out.push('\n');
    for row in dimension_rows(data, schema) {
        out.push_str(&format!("{}: {}\n", row.label, row.value));
    }

    out
}

/// HTML version of [`render_configuration_text`]; every value is escaped
pub fn render_configuration_html(
    data: &FeederData,
    schema: &FeederSchema,
    generated_at: &NaiveDateTime,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("<h2>{}</h2>\n", escape_html(schema.display_title())));
    out.push_str(&format!(
        "<p>Generated on: {}</p>\n",
        format_generated_on(generated_at)
    ));

    let sections = [
        ("Machine Information", machine_info_rows(data, schema)),
        ("Dimensions", dimension_rows(data, schema)),
    ];
    for (heading, rows) in sections {
        out.push_str(&format!("<h3>{}</h3>\n<table>\n", heading));
        for row in rows {
            out.push_str(&format!(
                "<tr><th>{}</th><td>{}</td></tr>\n",
                escape_html(row.label),
                escape_html(&row.value)
            ));
        }
        out.push_str("</table>\n");
    }

    out
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedAttachment {
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
    /// Standard base64 of the file bytes
    pub content: String,
}

/// Everything the delivery service needs to send one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPayload {
    pub submission_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub subject: String,
    pub company_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub feeder_type: String,
    pub title: String,
    pub form_data: String,
    pub form_data_html: String,
    pub attachments: Vec<EncodedAttachment>,
}

impl EmailPayload {
    pub fn build(
        contact: &ContactForm,
        data: &FeederData,
        schema: &FeederSchema,
        attachments: &AttachmentSet,
    ) -> Self {
        let created_at = Utc::now();
        Self::build_at(contact, data, schema, attachments, created_at)
    }

    /// Build with a fixed creation time; the rendered text uses local wall-clock time
    pub fn build_at(
        contact: &ContactForm,
        data: &FeederData,
        schema: &FeederSchema,
        attachments: &AttachmentSet,
        created_at: DateTime<Utc>,
    ) -> Self {
        let local = created_at.with_timezone(&Local).naive_local();

        Self {
            submission_id: Uuid::new_v4(),
            created_at,
            subject: format!("Feeder Configuration from {}", contact.name.trim()),
            company_name: contact.company_name.trim().to_string(),
            name: contact.name.trim().to_string(),
            email: contact.email.trim().to_string(),
            phone: contact.phone_or_placeholder().to_string(),
            message: contact.message_or_placeholder().to_string(),
            feeder_type: schema.feeder_type.clone(),
            title: schema.display_title().to_string(),
            form_data: render_configuration_text(data, schema, &local),
            form_data_html: render_configuration_html(data, schema, &local),
            attachments: attachments
                .iter()
                .map(|file| EncodedAttachment {
                    file_name: file.file_name.clone(),
                    content_type: file
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string(),
                    size: file.size(),
                    content: STANDARD.encode(&file.content),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::Attachment;
    use chrono::NaiveDate;
    use feeder_core::schema::DimensionSchema;

    fn schema() -> FeederSchema {
        FeederSchema::new(
            "bowl",
            DimensionSchema::from_pairs(&[("B", "Height"), ("A", "Bowl Diameter")]),
        )
        .with_title("Bowl Feeder")
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 7, 0)
            .unwrap()
    }

    #[test]
    fn test_generated_on_format() {
        assert_eq!(format_generated_on(&at()), "05/03/2024 at 09:07");
    }

    #[test]
    fn test_text_rendering_order_and_sentinel() {
        let mut data = FeederData::new();
        data.set_dimension("A", "300");
        data.set_machine_info("machineNo", "M-42").unwrap();
        data.set_machine_info("rotation", " ").unwrap();

        let text = render_configuration_text(&data, &schema(), &at());
        let expected = "Bowl Feeder\n\
            Generated on: 05/03/2024 at 09:07\n\
            \n\
            MACHINE INFORMATION\n\
            ---------------------------------------------------------------\n\
            Machine no.: M-42\n\
            Rotation: Not specified\n\
            UPH: Not specified\n\
            Remark: Not specified\n\
            \n\
            DIMENSIONS\n\
            ---------------------------------------------------------------\n\
            B: Not specified\n\
            A: 300 mm\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_html_escapes_values() {
        let mut data = FeederData::new();
        data.set_machine_info("remark", "<b>fragile</b> & \"light\"").unwrap();

        let html = render_configuration_html(&data, &schema(), &at());
        assert!(html.contains("<h2>Bowl Feeder</h2>"));
        assert!(html.contains("&lt;b&gt;fragile&lt;/b&gt; &amp; &quot;light&quot;"));
        assert!(!html.contains("<b>fragile"));
        assert!(html.contains("<tr><th>A</th><td>Not specified</td></tr>"));
    }

    #[test]
    fn test_payload_fields() {
        let contact = ContactForm {
            company_name: " Acme ".to_string(),
            name: "Sam".to_string(),
            email: "sam@acme.example".to_string(),
            ..ContactForm::default()
        };
        let mut attachments = AttachmentSet::new();
        attachments
            .add(vec![Attachment::new("notes.txt", b"hello".to_vec())])
            .unwrap();

        let payload =
            EmailPayload::build(&contact, &FeederData::new(), &schema(), &attachments);

        assert_eq!(payload.subject, "Feeder Configuration from Sam");
        assert_eq!(payload.company_name, "Acme");
        assert_eq!(payload.phone, "Not provided");
        assert_eq!(payload.message, "No message provided");
        assert_eq!(payload.title, "Bowl Feeder");
        assert_eq!(payload.attachments[0].content, "aGVsbG8=");
        assert_eq!(payload.attachments[0].content_type, "text/plain");
        assert!(payload.form_data.starts_with("Bowl Feeder\nGenerated on: "));

        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(json["feederType"], "bowl");
        assert_eq!(json["submissionId"], payload.submission_id.to_string());
    }

    #[test]
    fn test_each_payload_gets_new_id() {
        let contact = ContactForm::default();
        let data = FeederData::new();
        let attachments = AttachmentSet::new();

        let first = EmailPayload::build(&contact, &data, &schema(), &attachments);
        let second = EmailPayload::build(&contact, &data, &schema(), &attachments);
        assert_ne!(first.submission_id, second.submission_id);
    }
}
