use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request-scoped authenticated user, extracted from the session token.
///
/// The identity service owns the session lifecycle; this API treats
/// `user_id` and `role` as opaque inputs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub role: String,
    /// Session id, present for interactive sessions only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role("super_admin")
    }

    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }

    pub fn is_operator(&self) -> bool {
        self.has_role("operator")
    }

    /// Admin-level access (super_admin or admin): report review, permit decisions
    pub fn has_admin_access(&self) -> bool {
        self.is_super_admin() || self.is_admin()
    }

    /// Operator-level access: road updates, signals, transport data
    pub fn has_operator_access(&self) -> bool {
        self.has_admin_access() || self.is_operator()
    }
}

/// Claims carried by the externally issued session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    pub iss: String,
    pub exp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "u1".to_string(),
            role: role.to_string(),
            session_id: None,
        }
    }

    #[test]
    fn role_hierarchy() {
        assert!(user("super_admin").has_admin_access());
        assert!(user("admin").has_admin_access());
        assert!(!user("operator").has_admin_access());
        assert!(user("operator").has_operator_access());
        assert!(user("admin").has_operator_access());
        assert!(!user("reporter").has_operator_access());
    }
}
