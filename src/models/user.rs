use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::enums::Role;

/// Role-aware profile returned by the backend, including the
/// reporting chain for doctors (their admin) and operators (their
/// manager).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub reporting: Option<ReportingContact>,
}

/// Who a user reports to (admin for doctors, manager for operators).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingContact {
    pub name: String,
    pub email: String,
}

/// Patient self-signup request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSignup {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Patient profile completion (age + address unlock appointment booking).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfileUpdate {
    pub age: u32,
    pub address: String,
}

/// Staff member created by an admin (doctor or nurse).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStaffMember {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub designation: String,
    pub hospital: String,
    pub city: String,
    pub role: Role,
}

/// Production operator created by a manager, or manager created by an
/// admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles"))
}

/// Shallow shape check for email addresses on signup forms.
/// Deliverability is the backend's problem.
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && email_regex().is_match(email)
}

/// Username rules shared by every signup path: 3-32 chars,
/// alphanumeric plus `._-`.
pub fn is_valid_username(username: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{2,31}$").expect("username regex compiles")
    });
    re.is_match(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_emails() {
        assert!(is_valid_email("nurse@hospital.example"));
        assert!(is_valid_email("a.b-c@clinic.co.in"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@signs.example"));
        assert!(!is_valid_email("spaces in@mail.example"));
        assert!(!is_valid_email("nodot@host"));
    }

    #[test]
    fn username_rules() {
        assert!(is_valid_username("doc"));
        assert!(is_valid_username("ward.nurse-7"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username(".leading"));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username(&"x".repeat(40)));
    }
}
