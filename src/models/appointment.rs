use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Patient booking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointment {
    pub appointment_date: DateTime<Utc>,
}

/// Nurse shift profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NurseProfile {
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub shift_start: Option<String>,
    #[serde(default)]
    pub shift_end: Option<String>,
}
