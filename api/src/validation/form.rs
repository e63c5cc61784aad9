//! The raw contact form payload and its conversion into a typed draft.

use std::str::FromStr;

use serde::Deserialize;
use shared::{BudgetRange, ContactDraft, ServiceType};

use super::{sanitizers, validators, FieldError, ValidationBuilder};

/// Flat text mapping as submitted by the website form. Every field arrives
/// as text; missing fields default to empty so that validation can report
/// them instead of the JSON layer rejecting the payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(rename = "type", default)]
    pub service_type: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub budget: String,
    /// Honeypot field, invisible to humans. Checked before validation.
    #[serde(rename = "_honey", default)]
    pub honey: String,
}

impl ContactForm {
    /// Validate every field, collecting all violations. Returns the typed
    /// draft only when no field is in violation.
    pub fn validate(&self) -> Result<ContactDraft, Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();

        let service_type = match ServiceType::from_str(self.service_type.trim()) {
            Ok(ty) => Some(ty),
            Err(_) => {
                builder.add_error("type", "Type de service invalide");
                None
            }
        };

        let budget = match BudgetRange::from_str(self.budget.trim()) {
            Ok(budget) => Some(budget),
            Err(_) => {
                builder.add_error("budget", "Budget invalide");
                None
            }
        };

        builder.check("designation", || {
            validators::validate_length(
                self.designation.trim(),
                5,
                200,
                "La désignation doit contenir au moins 5 caractères",
                "La désignation ne peut pas dépasser 200 caractères",
            )
        });

        builder.check("name", || {
            validators::validate_length(
                self.name.trim(),
                2,
                100,
                "Le nom doit contenir au moins 2 caractères",
                "Le nom ne peut pas dépasser 100 caractères",
            )
        });

        builder.check("email", || validators::validate_email(&self.email, 100));

        let phone = non_empty(&self.phone);
        builder.check("phone", || {
            validators::validate_french_phone_optional(&phone)
        });

        let company = non_empty(&self.company);
        builder.check("company", || {
            validators::validate_max_length_optional(
                &company,
                100,
                "Le nom de l'entreprise ne peut pas dépasser 100 caractères",
            )
        });

        builder.check("message", || {
            validators::validate_length(
                self.message.trim(),
                20,
                2000,
                "Le message doit contenir au moins 20 caractères",
                "Le message ne peut pas dépasser 2000 caractères",
            )
        });

        builder.build()?;

        // Both parses succeeded if we got here.
        Ok(ContactDraft {
            service_type: service_type.expect("validated"),
            designation: self.designation.trim().to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone,
            company,
            message: self.message.trim().to_string(),
            budget: budget.expect("validated"),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Strip markup from the free-text fields of a validated draft. Name and
/// email are bounded and escaped at render time; designation, message and
/// company carry arbitrary prose and must be tag-free before persistence.
pub fn sanitize_draft(draft: &mut ContactDraft) {
    draft.designation = sanitizers::sanitize_free_text(&draft.designation);
    draft.message = sanitizers::sanitize_free_text(&draft.message);
    sanitizers::sanitize_free_text_optional(&mut draft.company);
}
