use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{
    BookAppointment, NewAccount, NewDrugInput, NewStaffMember, NurseProfile, PatientProfileUpdate,
    PatientSignup, UserProfile,
};

use super::types::{
    BackendAppointment, BackendDetail, BackendMessage, BackendPatientProfile, BackendProfile,
    BackendSearchHit, DrugAdded, PatientAppointments, RiskPrediction, TokenResponse,
};
use super::BackendError;

/// HTTP client for the prediction backend.
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client for the configured backend address.
    pub fn from_config() -> Self {
        Self::new(
            &crate::config::backend_url(),
            crate::config::BACKEND_TIMEOUT_SECS,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Auth ──────────────────────────────────────────────────────────

    /// Exchange credentials for a bearer token (form-encoded, the
    /// backend speaks the OAuth2 password flow).
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, BackendError> {
        let url = format!("{}/admin/token", self.base_url);
        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| self.map_send_err(e))?;
        self.read_json(response).await
    }

    // ── Patient ───────────────────────────────────────────────────────

    pub async fn signup_patient(&self, signup: &PatientSignup) -> Result<BackendMessage, BackendError> {
        self.post_json("/patient/signup", None, signup).await
    }

    pub async fn patient_profile(
        &self,
        token: &str,
        username: Option<&str>,
    ) -> Result<BackendPatientProfile, BackendError> {
        let path = match username {
            Some(u) => format!("/patient/profile?username={u}"),
            None => "/patient/profile".to_string(),
        };
        self.get(&path, Some(token)).await
    }

    pub async fn update_patient_profile(
        &self,
        token: &str,
        update: &PatientProfileUpdate,
    ) -> Result<BackendMessage, BackendError> {
        let url = format!("{}/patient/profile", self.base_url);
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .json(update)
            .send()
            .await
            .map_err(|e| self.map_send_err(e))?;
        self.read_json(response).await
    }

    pub async fn book_appointment(
        &self,
        token: &str,
        booking: &BookAppointment,
    ) -> Result<BackendMessage, BackendError> {
        self.post_json("/patient/book-appointment", Some(token), booking)
            .await
    }

    pub async fn patient_appointments(
        &self,
        token: &str,
    ) -> Result<PatientAppointments, BackendError> {
        self.get("/patient/appointments", Some(token)).await
    }

    // ── Doctor ────────────────────────────────────────────────────────

    /// Predictive drug search (≤ 15 hits, backend-ranked).
    pub async fn doctor_search(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Vec<BackendSearchHit>, BackendError> {
        self.post_json("/doctor/search", Some(token), &serde_json::json!({ "query": query }))
            .await
    }

    /// Model-recommended alternatives for a drug.
    pub async fn doctor_alternatives(
        &self,
        token: &str,
        drugname: &str,
    ) -> Result<RiskPrediction, BackendError> {
        self.post_json(
            "/doctor/alternatives",
            Some(token),
            &serde_json::json!({ "drugname": drugname }),
        )
        .await
    }

    pub async fn doctor_appointments(
        &self,
        token: &str,
    ) -> Result<Vec<BackendAppointment>, BackendError> {
        self.get("/doctor/appointments", Some(token)).await
    }

    pub async fn mark_handled(
        &self,
        token: &str,
        patient_username: &str,
    ) -> Result<BackendMessage, BackendError> {
        self.post_json(
            "/doctor/mark-handled",
            Some(token),
            &serde_json::json!({ "patient_username": patient_username }),
        )
        .await
    }

    // ── Nurse ─────────────────────────────────────────────────────────

    pub async fn nurse_profile(&self, token: &str) -> Result<NurseProfile, BackendError> {
        self.get("/nurse/profile", Some(token)).await
    }

    pub async fn nurse_appointments(
        &self,
        token: &str,
    ) -> Result<Vec<BackendAppointment>, BackendError> {
        self.get("/nurse/appointments", Some(token)).await
    }

    pub async fn forward_to_doctor(
        &self,
        token: &str,
        patient_username: &str,
    ) -> Result<BackendMessage, BackendError> {
        self.post_json(
            &format!("/nurse/forward-to-doctor/{patient_username}"),
            Some(token),
            &serde_json::json!({}),
        )
        .await
    }

    // ── Admin / manager user administration ───────────────────────────

    pub async fn add_staff(
        &self,
        token: &str,
        staff: &NewStaffMember,
    ) -> Result<BackendMessage, BackendError> {
        let url = format!("{}/admin/add-staff", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .form(&[
                ("username", staff.username.as_str()),
                ("password", staff.password.as_str()),
                ("name", staff.name.as_str()),
                ("email", staff.email.as_str()),
                ("phone", staff.phone.as_str()),
                ("department", staff.department.as_str()),
                ("designation", staff.designation.as_str()),
                ("hospital", staff.hospital.as_str()),
                ("city", staff.city.as_str()),
                ("role", staff.role.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.map_send_err(e))?;
        self.read_json(response).await
    }

    pub async fn delete_doctor(
        &self,
        token: &str,
        username: &str,
    ) -> Result<BackendMessage, BackendError> {
        let url = format!("{}/admin/delete-doctor", self.base_url);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "username": username }))
            .send()
            .await
            .map_err(|e| self.map_send_err(e))?;
        self.read_json(response).await
    }

    pub async fn add_manager(
        &self,
        token: &str,
        account: &NewAccount,
    ) -> Result<BackendMessage, BackendError> {
        self.post_json("/production/add-manager", Some(token), account)
            .await
    }

    pub async fn add_operator(
        &self,
        token: &str,
        account: &NewAccount,
    ) -> Result<BackendMessage, BackendError> {
        self.post_json("/production/add-operator", Some(token), account)
            .await
    }

    pub async fn delete_operator(
        &self,
        token: &str,
        username: &str,
    ) -> Result<BackendMessage, BackendError> {
        let url = format!("{}/production/delete-operator", self.base_url);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "username": username }))
            .send()
            .await
            .map_err(|e| self.map_send_err(e))?;
        self.read_json(response).await
    }

    // ── Admin drug administration ─────────────────────────────────────

    /// Register a new drug; the backend classifies it and returns the
    /// predicted risk level.
    pub async fn add_drug(&self, token: &str, drug: &NewDrugInput) -> Result<DrugAdded, BackendError> {
        self.post_json("/admin/add-drug", Some(token), drug).await
    }

    // ── Reporting profile ─────────────────────────────────────────────

    /// Role-aware profile with the reporting chain folded in.
    pub async fn whoami(&self, token: &str) -> Result<UserProfile, BackendError> {
        let raw: BackendProfile = self.get("/profile", Some(token)).await?;
        raw.into_profile()
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))
    }

    // ── Plumbing ──────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(|e| self.map_send_err(e))?;
        self.read_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(|e| self.map_send_err(e))?;
        self.read_json(response).await
    }

    fn map_send_err(&self, e: reqwest::Error) -> BackendError {
        if e.is_connect() {
            BackendError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            BackendError::Timeout(self.timeout_secs)
        } else {
            BackendError::Transport(e.to_string())
        }
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // FastAPI-style error bodies carry {"detail": "..."}
            let detail = serde_json::from_str::<BackendDetail>(&body)
                .map(|d| d.detail)
                .unwrap_or(body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))
    }
}
