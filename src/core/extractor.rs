//! Request extractors shared by the feature handlers.
//!
//! `AppJson` replaces axum's plain-text JSON rejection with the standard
//! `ApiResponse` error envelope. The `AuthenticatedUser` extractor reads
//! the identity the session gate (`core::middleware::auth_middleware`)
//! stored in the request extensions; any authenticated user has
//! reporter-level access, so reporter-level handlers take it directly
//! while higher roles go through the guards in `features::auth::guards`.

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON body extractor producing envelope-shaped 400s on parse failures
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            // Unknown enum values (status, category, mode, ...) land here
            JsonRejection::JsonDataError(err) => {
                format!("Request body does not match the expected shape: {}", err)
            }
            JsonRejection::JsonSyntaxError(err) => format!("Request body is not valid JSON: {}", err),
            JsonRejection::MissingJsonContentType(err) => {
                format!("Expected a JSON request body: {}", err)
            }
            _ => "Failed to read JSON request body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("No session identity on request".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::with_admin_auth;
    use axum::http::StatusCode;
    use axum::{routing::get, routing::post, Router};
    use axum_test::TestServer;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct SampleBody {
        road_name: String,
    }

    async fn receive(AppJson(_body): AppJson<SampleBody>) -> StatusCode {
        StatusCode::CREATED
    }

    async fn whoami(user: AuthenticatedUser) -> String {
        user.user_id
    }

    #[tokio::test]
    async fn malformed_json_gets_envelope_400() {
        let server = TestServer::new(Router::new().route("/", post(receive))).unwrap();

        let response = server
            .post("/")
            .text("{not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("\"success\":false"));
    }

    #[tokio::test]
    async fn wrong_shape_gets_envelope_400() {
        let server = TestServer::new(Router::new().route("/", post(receive))).unwrap();

        let response = server
            .post("/")
            .json(&serde_json::json!({ "roadName": 7 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("\"success\":false"));
    }

    #[tokio::test]
    async fn identity_extractor_requires_session_gate() {
        let router = Router::new().route("/me", get(whoami));
        let server = TestServer::new(router.clone()).unwrap();
        let response = server.get("/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let gated = TestServer::new(with_admin_auth(router)).unwrap();
        gated.get("/me").await.assert_status_ok();
    }
}
