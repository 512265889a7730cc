//! HTTP client for the external prediction backend.
//!
//! The backend owns risk classification, user storage, appointments,
//! and token issuance. Riskdesk treats it as an opaque collaborator:
//! every call forwards the dashboard caller's bearer token, and the
//! backend's own status codes are preserved for the caller.

pub mod client;
pub mod session;
pub mod types;

pub use client::BackendClient;
pub use session::{decode_claims, Claims, SessionError};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Cannot reach prediction backend at {0}")]
    Connection(String),

    #[error("Prediction backend timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("Prediction backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Cannot parse backend response: {0}")]
    ResponseParsing(String),
}
