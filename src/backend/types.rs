//! Wire types for the prediction backend's JSON API.
//!
//! Field names follow the backend's dataset columns (`drugname`,
//! `risk_level`, ...) rather than Riskdesk's own model names; handlers
//! convert at the boundary where the shapes differ.

use serde::{Deserialize, Serialize};

use crate::models::{ReportingContact, UserProfile};

/// Response of the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Plain acknowledgement body used by most backend mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendMessage {
    pub message: String,
}

/// Error body shape (`{"detail": "..."}`).
#[derive(Debug, Clone, Deserialize)]
pub struct BackendDetail {
    pub detail: String,
}

/// One hit of the backend's predictive drug search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSearchHit {
    pub drugname: String,
    pub risk_level: String,
}

/// Model-recommended alternatives for a drug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPrediction {
    pub risk_level: String,
    pub alternatives: Vec<String>,
}

/// Risk level assigned when an admin registers a new drug.
#[derive(Debug, Clone, Deserialize)]
pub struct DrugAdded {
    pub message: String,
    pub risk_level: String,
}

/// Appointment row as the backend serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendAppointment {
    pub username: String,
    pub appointment_date: String,
    #[serde(default)]
    pub is_handled: Option<bool>,
    #[serde(default)]
    pub doctor_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientAppointments {
    pub appointments: Vec<PatientAppointmentRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientAppointmentRow {
    pub appointment_date: Option<String>,
}

/// Patient profile as the backend serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendPatientProfile {
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub address: Option<String>,
    pub is_profile_complete: bool,
}

/// Role-aware profile with the reporting chain in the backend's
/// camelCase keys (`adminName`/`managerName`).
#[derive(Debug, Clone, Deserialize)]
pub struct BackendProfile {
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub reporting: Option<BackendReporting>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendReporting {
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub manager_email: Option<String>,
}

impl BackendProfile {
    /// Fold the backend's role-specific reporting keys into one shape.
    pub fn into_profile(self) -> Result<UserProfile, crate::models::ModelError> {
        let role = self.role.parse()?;
        let reporting = self.reporting.and_then(|r| {
            let (name, email) = match (r.admin_name, r.manager_name) {
                (Some(name), _) => (name, r.admin_email),
                (None, Some(name)) => (name, r.manager_email),
                (None, None) => return None,
            };
            Some(ReportingContact {
                name,
                email: email.unwrap_or_else(|| "N/A".to_string()),
            })
        });
        Ok(UserProfile {
            username: self.username,
            name: self.name,
            email: self.email,
            role,
            phone: self.phone,
            reporting,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn profile_folds_admin_reporting() {
        let raw: BackendProfile = serde_json::from_str(
            r#"{
                "username": "doc", "name": "Dr. A", "email": "a@h.example",
                "role": "doctor",
                "reporting": {"adminName": "Head Admin", "adminEmail": "admin@h.example"}
            }"#,
        )
        .unwrap();
        let profile = raw.into_profile().unwrap();
        assert_eq!(profile.role, Role::Doctor);
        let reporting = profile.reporting.unwrap();
        assert_eq!(reporting.name, "Head Admin");
        assert_eq!(reporting.email, "admin@h.example");
    }

    #[test]
    fn profile_folds_manager_reporting() {
        let raw: BackendProfile = serde_json::from_str(
            r#"{
                "username": "op", "name": "Operator", "email": "op@h.example",
                "role": "production",
                "reporting": {"managerName": "Line Manager"}
            }"#,
        )
        .unwrap();
        let profile = raw.into_profile().unwrap();
        let reporting = profile.reporting.unwrap();
        assert_eq!(reporting.name, "Line Manager");
        assert_eq!(reporting.email, "N/A");
    }

    #[test]
    fn profile_without_reporting() {
        let raw: BackendProfile = serde_json::from_str(
            r#"{"username": "adm", "name": "Admin", "email": "adm@h.example", "role": "admin"}"#,
        )
        .unwrap();
        let profile = raw.into_profile().unwrap();
        assert!(profile.reporting.is_none());
    }

    #[test]
    fn profile_rejects_unknown_role() {
        let raw: BackendProfile = serde_json::from_str(
            r#"{"username": "x", "name": "X", "email": "x@h.example", "role": "intern"}"#,
        )
        .unwrap();
        assert!(raw.into_profile().is_err());
    }
}
