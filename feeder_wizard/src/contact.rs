//! Contact details collected before sending a configuration

use feeder_core::logging::codes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PHONE_PLACEHOLDER: &str = "Not provided";
pub const MESSAGE_PLACEHOLDER: &str = "No message provided";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub company_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Required fields are checked in declaration order; the first gap is reported
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill in your company name")]
    MissingCompanyName,

    #[error("Please fill in your name")]
    MissingName,

    #[error("Please fill in your email")]
    MissingEmail,

    #[error("'{email}' is not a valid email address")]
    InvalidEmail { email: String },
}

impl ContactError {
    pub fn error_code(&self) -> codes::Code {
        codes::submission::MISSING_CONTACT_FIELD
    }
}

impl ContactForm {
    pub fn check(&self) -> Result<(), ContactError> {
        if is_blank(&self.company_name) {
            return Err(ContactError::MissingCompanyName);
        }
        if is_blank(&self.name) {
            return Err(ContactError::MissingName);
        }
        if is_blank(&self.email) {
            return Err(ContactError::MissingEmail);
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail {
                email: self.email.trim().to_string(),
            });
        }
        Ok(())
    }

    pub fn phone_or_placeholder(&self) -> &str {
        non_blank_or(&self.phone, PHONE_PLACEHOLDER)
    }

    pub fn message_or_placeholder(&self) -> &str {
        non_blank_or(&self.message, MESSAGE_PLACEHOLDER)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if is_blank(value) {
        placeholder
    } else {
        value.trim()
    }
}

/// `local@domain` with both parts present and no whitespace
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn complete() -> ContactForm {
        ContactForm {
            company_name: "Acme Automation".to_string(),
            name: "Sam Lee".to_string(),
            email: "sam@acme.example".to_string(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn test_required_fields_in_order() {
        assert_eq!(ContactForm::default().check(), Err(ContactError::MissingCompanyName));

        let form = ContactForm {
            company_name: "Acme".to_string(),
            ..ContactForm::default()
        };
        assert_eq!(form.check(), Err(ContactError::MissingName));

        let form = ContactForm {
            email: String::new(),
            ..complete()
        };
        assert_eq!(form.check().unwrap_err().to_string(), "Please fill in your email");

        assert!(complete().check().is_ok());
    }

    #[test]
    fn test_email_shape() {
        for email in ["sam", "@acme", "sam@", "sam lee@acme", "a@b@c"] {
            let form = ContactForm {
                email: email.to_string(),
                ..complete()
            };
            assert_matches!(form.check(), Err(ContactError::InvalidEmail { .. }), "{}", email);
        }
    }

    #[test]
    fn test_placeholders() {
        let mut form = complete();
        assert_eq!(form.phone_or_placeholder(), "Not provided");
        assert_eq!(form.message_or_placeholder(), "No message provided");

        form.phone = " +44 1234 ".to_string();
        form.message = "Call after 5".to_string();
        assert_eq!(form.phone_or_placeholder(), "+44 1234");
        assert_eq!(form.message_or_placeholder(), "Call after 5");
    }
}
