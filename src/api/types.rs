//! Shared types for the dashboard API layer.

use std::sync::Arc;

use crate::api::error::ApiError;
use crate::backend::BackendClient;
use crate::models::Role;
use crate::registry::RiskRegistry;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub registry: Arc<RiskRegistry>,
    pub backend: Arc<BackendClient>,
}

impl ApiContext {
    pub fn new(registry: Arc<RiskRegistry>, backend: Arc<BackendClient>) -> Self {
        Self { registry, backend }
    }
}

/// Authenticated caller context, injected into request extensions by
/// the auth middleware after decoding the token's claims.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub username: String,
    pub role: Role,
    /// Raw bearer token, forwarded verbatim on proxied backend calls.
    pub token: String,
}

impl AuthContext {
    /// Gate a handler on the roles it serves.
    pub fn require(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            let roles = allowed
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Err(ApiError::Forbidden(format!(
                "Endpoint requires role: {roles}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role) -> AuthContext {
        AuthContext {
            username: "u".into(),
            role,
            token: "t".into(),
        }
    }

    #[test]
    fn require_accepts_listed_roles() {
        assert!(ctx(Role::Manager).require(&[Role::Manager]).is_ok());
        assert!(ctx(Role::Production)
            .require(&[Role::Production, Role::Manager])
            .is_ok());
    }

    #[test]
    fn require_rejects_other_roles() {
        let err = ctx(Role::Patient).require(&[Role::Doctor]).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
