#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: "test-admin-id".to_string(),
        role: "admin".to_string(),
        session_id: Some("test-session-id".to_string()),
    }
}

#[cfg(test)]
pub fn create_reporter_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: "test-reporter-id".to_string(),
        role: "reporter".to_string(),
        session_id: None,
    }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
