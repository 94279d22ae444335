//! Role-based authorization guards.
//!
//! Role hierarchy (highest to lowest):
//! - super_admin: global admin
//! - admin: reviews reports, decides permits
//! - operator: manages road updates, signals and transport data
//! - reporter: submits reports and permit requests
//!
//! Each higher role includes all permissions of lower roles. Any
//! authenticated user has reporter-level access, so reporter-level
//! handlers take the plain `AuthenticatedUser` extractor.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-level access (super_admin or admin).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.has_admin_access() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

/// Guard for operator-level access (super_admin, admin or operator).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireOperator(user): RequireOperator) { ... }
/// ```
pub struct RequireOperator(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireOperator
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.has_operator_access() {
            return Err(AppError::Forbidden("Operator access required".to_string()));
        }

        Ok(RequireOperator(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_reporter_user, with_admin_auth};
    use axum::extract::Request;
    use axum::http::StatusCode;
    use axum::middleware::Next;
    use axum::response::Response;
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    async fn admin_only(RequireAdmin(user): RequireAdmin) -> String {
        user.user_id
    }

    async fn operator_only(RequireOperator(user): RequireOperator) -> String {
        user.user_id
    }

    fn router() -> Router {
        Router::new()
            .route("/admin", get(admin_only))
            .route("/operator", get(operator_only))
    }

    async fn inject_reporter(mut request: Request, next: Next) -> Response {
        request.extensions_mut().insert(create_reporter_user());
        next.run(request).await
    }

    #[tokio::test]
    async fn missing_identity_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();
        let response = server.get("/operator").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_passes_both_guards() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        server.get("/admin").await.assert_status_ok();
        server.get("/operator").await.assert_status_ok();
    }

    #[tokio::test]
    async fn reporter_is_forbidden() {
        let router = router().layer(axum::middleware::from_fn(inject_reporter));
        let server = TestServer::new(router).unwrap();
        let response = server.get("/operator").await;
        response.assert_status(StatusCode::FORBIDDEN);
    }
}
