// src/models.rs
// Shared data types for the contact/quote-request pipeline

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ─────────────────────────────────────────────────────────
// Domain enums (stored as TEXT, wire format SCREAMING_SNAKE)
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    HardwareRepair,
    SoftwareDev,
    DevsecopsConsulting,
    Other,
}

impl ServiceType {
    /// Stable wire/storage name, also used in the notification subject.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ServiceType::HardwareRepair => "HARDWARE_REPAIR",
            ServiceType::SoftwareDev => "SOFTWARE_DEV",
            ServiceType::DevsecopsConsulting => "DEVSECOPS_CONSULTING",
            ServiceType::Other => "OTHER",
        }
    }

    /// Human-readable French label for notifications.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::HardwareRepair => "Réparation Électronique",
            ServiceType::SoftwareDev => "Développement Logiciel",
            ServiceType::DevsecopsConsulting => "Audit & DevOps",
            ServiceType::Other => "Autre demande",
        }
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HARDWARE_REPAIR" => Ok(ServiceType::HardwareRepair),
            "SOFTWARE_DEV" => Ok(ServiceType::SoftwareDev),
            "DEVSECOPS_CONSULTING" => Ok(ServiceType::DevsecopsConsulting),
            "OTHER" => Ok(ServiceType::Other),
            other => Err(format!("unknown service type: {}", other)),
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetRange {
    Unknown,
    #[serde(rename = "LESS_THAN_500")]
    #[sqlx(rename = "LESS_THAN_500")]
    LessThan500,
    #[serde(rename = "FROM_500_TO_2K")]
    #[sqlx(rename = "FROM_500_TO_2K")]
    From500To2k,
    #[serde(rename = "FROM_2K_TO_10K")]
    #[sqlx(rename = "FROM_2K_TO_10K")]
    From2kTo10k,
    #[serde(rename = "MORE_THAN_10K")]
    #[sqlx(rename = "MORE_THAN_10K")]
    MoreThan10k,
}

impl BudgetRange {
    pub fn wire_name(&self) -> &'static str {
        match self {
            BudgetRange::Unknown => "UNKNOWN",
            BudgetRange::LessThan500 => "LESS_THAN_500",
            BudgetRange::From500To2k => "FROM_500_TO_2K",
            BudgetRange::From2kTo10k => "FROM_2K_TO_10K",
            BudgetRange::MoreThan10k => "MORE_THAN_10K",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetRange::Unknown => "Non précisé",
            BudgetRange::LessThan500 => "< 500 €",
            BudgetRange::From500To2k => "500 € - 2 000 €",
            BudgetRange::From2kTo10k => "2 000 € - 10 000 €",
            BudgetRange::MoreThan10k => "> 10 000 €",
        }
    }
}

impl FromStr for BudgetRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNKNOWN" => Ok(BudgetRange::Unknown),
            "LESS_THAN_500" => Ok(BudgetRange::LessThan500),
            "FROM_500_TO_2K" => Ok(BudgetRange::From500To2k),
            "FROM_2K_TO_10K" => Ok(BudgetRange::From2kTo10k),
            "MORE_THAN_10K" => Ok(BudgetRange::MoreThan10k),
            other => Err(format!("unknown budget range: {}", other)),
        }
    }
}

impl std::fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Lifecycle state of a request. Submissions are always created as `New`;
/// the remaining transitions belong to the back office, not this service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    New,
    InReview,
    Answered,
    Closed,
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::New
    }
}

// ─────────────────────────────────────────────────────────
// Runtime / database types
// ─────────────────────────────────────────────────────────

/// One row in `contact_requests`: a persisted, immutable submission.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactRequest {
    pub id: Uuid,
    pub service_type: ServiceType,
    pub designation: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
    pub budget: BudgetRange,
    pub ip_address: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// A submission that passed validation, before sanitization/persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactDraft {
    pub service_type: ServiceType,
    pub designation: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
    pub budget: BudgetRange,
}

/// Result surfaced to the form caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ContactResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    pub fn invalid(message: impl Into<String>, errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_wire_round_trip() {
        for ty in [
            ServiceType::HardwareRepair,
            ServiceType::SoftwareDev,
            ServiceType::DevsecopsConsulting,
            ServiceType::Other,
        ] {
            let parsed: ServiceType = ty.wire_name().parse().unwrap();
            assert_eq!(parsed, ty);
        }
        assert!("REPAIR".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_budget_range_wire_round_trip() {
        for budget in [
            BudgetRange::Unknown,
            BudgetRange::LessThan500,
            BudgetRange::From500To2k,
            BudgetRange::From2kTo10k,
            BudgetRange::MoreThan10k,
        ] {
            let parsed: BudgetRange = budget.wire_name().parse().unwrap();
            assert_eq!(parsed, budget);
        }
    }

    #[test]
    fn test_serde_names_match_wire_names() {
        let json = serde_json::to_string(&ServiceType::HardwareRepair).unwrap();
        assert_eq!(json, "\"HARDWARE_REPAIR\"");

        let json = serde_json::to_string(&BudgetRange::From2kTo10k).unwrap();
        assert_eq!(json, "\"FROM_2K_TO_10K\"");

        let budget: BudgetRange = serde_json::from_str("\"LESS_THAN_500\"").unwrap();
        assert_eq!(budget, BudgetRange::LessThan500);
    }

    #[test]
    fn test_labels_are_non_empty() {
        assert_eq!(ServiceType::SoftwareDev.label(), "Développement Logiciel");
        assert_eq!(BudgetRange::Unknown.label(), "Non précisé");
    }

    #[test]
    fn test_default_status_is_new() {
        assert_eq!(RequestStatus::default(), RequestStatus::New);
    }

    #[test]
    fn test_contact_response_shapes() {
        let ok = ContactResponse::ok("merci");
        assert!(ok.success);
        assert!(ok.errors.is_none());

        let mut errors = BTreeMap::new();
        errors.insert("email".to_string(), vec!["Email invalide".to_string()]);
        let invalid = ContactResponse::invalid("corrigez le formulaire", errors);
        assert!(!invalid.success);
        let serialized = serde_json::to_string(&invalid).unwrap();
        assert!(serialized.contains("\"errors\""));

        let rejected = ContactResponse::rejected("trop de demandes");
        let serialized = serde_json::to_string(&rejected).unwrap();
        assert!(!serialized.contains("\"errors\""));
    }
}
