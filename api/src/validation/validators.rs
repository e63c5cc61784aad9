//! Field validators for the contact form
//!
//! Violation messages are in French; they are surfaced verbatim to the
//! form on the website.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Pragmatic email shape check; the definitive check is the provider
    /// bouncing the reply.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();

    /// French phone numbers: +33/0033/0 prefix, then 9 digits with optional
    /// separators (spaces, dots, dashes).
    static ref FRENCH_PHONE_REGEX: Regex =
        Regex::new(r"^(?:(?:\+|00)33|0)\s*[1-9](?:[\s.-]*\d{2}){4}$").unwrap();
}

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(message.to_string());
    }
    Ok(())
}

/// Validate string length within bounds, counting characters, not bytes
pub fn validate_length(
    value: &str,
    min: usize,
    max: usize,
    too_short: &str,
    too_long: &str,
) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        return Err(too_short.to_string());
    }
    if len > max {
        return Err(too_long.to_string());
    }
    Ok(())
}

/// Validate email shape and length
pub fn validate_email(value: &str, max: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !EMAIL_REGEX.is_match(trimmed) {
        return Err("Email invalide".to_string());
    }
    if trimmed.chars().count() > max {
        return Err(format!("L'email ne peut pas dépasser {} caractères", max));
    }
    Ok(())
}

/// Validate an optional French phone number (empty counts as absent)
pub fn validate_french_phone_optional(value: &Option<String>) -> Result<(), String> {
    match value {
        Some(phone) if !phone.trim().is_empty() => {
            if FRENCH_PHONE_REGEX.is_match(phone.trim()) {
                Ok(())
            } else {
                Err("Format de téléphone invalide".to_string())
            }
        }
        _ => Ok(()),
    }
}

/// Validate an optional bounded field (empty counts as absent)
pub fn validate_max_length_optional(
    value: &Option<String>,
    max: usize,
    too_long: &str,
) -> Result<(), String> {
    match value {
        Some(v) if v.chars().count() > max => Err(too_long.to_string()),
        _ => Ok(()),
    }
}
