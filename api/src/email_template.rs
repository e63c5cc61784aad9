//! Notification rendering: a persisted submission becomes the HTML body of
//! the operator email. Pure functions, deterministic for a given record;
//! the timestamp shown is the record's own `created_at`.

use shared::ContactRequest;

use crate::validation::sanitizers::escape_html;

/// Subject line: wire-format service type plus the request designation.
pub fn subject(request: &ContactRequest) -> String {
    format!("[{}] {}", request.service_type.wire_name(), request.designation)
}

/// Render the operator notification body. Free-text fields were sanitized
/// before persistence; every interpolated value is escaped anyway since
/// name/email/phone are only validated, not tag-stripped.
pub fn render_contact_email(request: &ContactRequest) -> String {
    let mut sections = String::new();

    sections.push_str(&section(
        "01. Type de Service",
        &[("Catégorie", request.service_type.label().to_string())],
    ));

    sections.push_str(&section(
        "02. Définition du Besoin",
        &[
            ("Désignation / Sujet", request.designation.clone()),
            ("Budget estimé", request.budget.label().to_string()),
        ],
    ));

    sections.push_str(&section(
        "03. Description Technique",
        &[("Message", request.message.clone())],
    ));

    let mut contact_fields = vec![
        ("Nom", request.name.clone()),
        ("Email", request.email.clone()),
    ];
    if let Some(ref phone) = request.phone {
        contact_fields.push(("Téléphone", phone.clone()));
    }
    if let Some(ref company) = request.company {
        contact_fields.push(("Entreprise", company.clone()));
    }
    sections.push_str(&section("04. Coordonnées Client", &contact_fields));

    format!(
        r#"<html lang="fr">
<body style="font-family: sans-serif; color: #1f2328; margin: 0; padding: 0;">
<div style="max-width: 650px; margin: 0 auto; border: 1px solid #d0d7de;">
<div style="padding: 24px; border-bottom: 2px solid #0969da; text-align: center;">
<h1 style="margin: 0; font-size: 22px;">Nouvelle Demande - Flux Electrique</h1>
</div>
{sections}<div style="padding: 20px 24px; font-size: 11px; color: #57606a; text-align: center;">
<p>Demande reçue le {received_at}</p>
<p>IP Address: {ip}</p>
</div>
</div>
</body>
</html>
"#,
        sections = sections,
        received_at = request.created_at.format("%d/%m/%Y %H:%M UTC"),
        ip = escape_html(&request.ip_address),
    )
}

fn section(title: &str, fields: &[(&str, String)]) -> String {
    let mut body = format!(
        "<div style=\"padding: 24px; border-bottom: 1px solid #d0d7de;\">\n<h2 style=\"font-size: 13px; text-transform: uppercase; color: #0969da;\">{}</h2>\n",
        escape_html(title)
    );
    for (label, value) in fields {
        // White-space preservation keeps message line breaks readable.
        body.push_str(&format!(
            "<div style=\"margin-bottom: 12px;\">\n<div style=\"font-size: 11px; color: #57606a;\">{}</div>\n<div style=\"white-space: pre-wrap;\">{}</div>\n</div>\n",
            escape_html(label),
            escape_html(value)
        ));
    }
    body.push_str("</div>\n");
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::{BudgetRange, RequestStatus, ServiceType};
    use uuid::Uuid;

    fn request() -> ContactRequest {
        ContactRequest {
            id: Uuid::nil(),
            service_type: ServiceType::HardwareRepair,
            designation: "Carte mère HS".to_string(),
            name: "Jean Dupont".to_string(),
            email: "jean@ex.com".to_string(),
            phone: None,
            company: None,
            message: "Mon ordinateur ne démarre plus depuis hier,\nl'écran reste noir.".to_string(),
            budget: BudgetRange::LessThan500,
            ip_address: "203.0.113.10".to_string(),
            status: RequestStatus::New,
            created_at: Utc.with_ymd_and_hms(2026, 8, 20, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_subject_combines_type_and_designation() {
        assert_eq!(subject(&request()), "[HARDWARE_REPAIR] Carte mère HS");
    }

    #[test]
    fn test_render_contains_all_sections() {
        let html = render_contact_email(&request());
        assert!(html.contains("01. Type de Service"));
        assert!(html.contains("02. Définition du Besoin"));
        assert!(html.contains("03. Description Technique"));
        assert!(html.contains("04. Coordonnées Client"));
        assert!(html.contains("Réparation Électronique"));
        assert!(html.contains("&lt; 500 €"));
        assert!(html.contains("Jean Dupont"));
        assert!(html.contains("203.0.113.10"));
        assert!(html.contains("20/08/2026 14:30 UTC"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let req = request();
        assert_eq!(render_contact_email(&req), render_contact_email(&req));
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let html = render_contact_email(&request());
        assert!(!html.contains("Téléphone"));
        assert!(!html.contains("Entreprise"));

        let mut with_extras = request();
        with_extras.phone = Some("06 12 34 56 78".to_string());
        with_extras.company = Some("ACME SARL".to_string());
        let html = render_contact_email(&with_extras);
        assert!(html.contains("Téléphone"));
        assert!(html.contains("ACME SARL"));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut req = request();
        req.name = "Jean <Dupont>".to_string();
        let html = render_contact_email(&req);
        assert!(html.contains("Jean &lt;Dupont&gt;"));
        assert!(!html.contains("Jean <Dupont>"));
    }
}
