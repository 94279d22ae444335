use axum::{routing::get, Router};

use crate::features::auth::handlers;

/// Routes for the auth feature (mounted behind the session gate)
pub fn routes() -> Router {
    Router::new().route("/api/auth/me", get(handlers::get_me))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use crate::core::middleware;
    use crate::features::auth::guards::RequireAdmin;
    use crate::features::auth::model::SessionClaims;
    use crate::features::auth::SessionVerifier;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::sync::Arc;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    const SECRET: &str = "unit-test-secret";

    fn issue(role: &str) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600;
        let claims = SessionClaims {
            sub: "user-7".to_string(),
            role: role.to_string(),
            sid: None,
            iss: "city-identity".to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn admin_only(RequireAdmin(user): RequireAdmin) -> String {
        user.user_id
    }

    fn server() -> TestServer {
        let verifier = Arc::new(SessionVerifier::new(&AuthConfig {
            token_secret: SECRET.to_string(),
            issuer: "city-identity".to_string(),
            leeway: Duration::from_secs(60),
        }));

        let router = routes()
            .route("/api/admin-only", get(admin_only))
            .route_layer(axum::middleware::from_fn_with_state(
                verifier,
                middleware::auth_middleware,
            ));

        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let server = server();
        let response = server.get("/api/auth/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let server = server();
        let response = server
            .get("/api/auth/me")
            .authorization_bearer("not-a-token")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let server = server();
        let response = server
            .get("/api/auth/me")
            .authorization_bearer(issue("reporter"))
            .await;
        response.assert_status_ok();
        assert!(response.text().contains("user-7"));
    }

    #[tokio::test]
    async fn reporter_is_forbidden_from_admin_route() {
        let server = server();
        let response = server
            .get("/api/admin-only")
            .authorization_bearer(issue("reporter"))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_passes_guard() {
        let server = server();
        let response = server
            .get("/api/admin-only")
            .authorization_bearer(issue("admin"))
            .await;
        response.assert_status_ok();
    }
}
