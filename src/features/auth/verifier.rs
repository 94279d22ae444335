use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use crate::features::auth::model::{AuthenticatedUser, SessionClaims};

/// Verifies HS256 session tokens issued by the city's identity service.
pub struct SessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.token_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway.as_secs();
        validation.set_issuer(&[config.issuer.clone()]);

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid session token: {}", e)))?;

        let claims = data.claims;
        Ok(AuthenticatedUser {
            user_id: claims.sub,
            role: claims.role,
            session_id: claims.sid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            token_secret: secret.to_string(),
            issuer: "city-identity".to_string(),
            leeway: Duration::from_secs(60),
        }
    }

    fn issue(secret: &str, issuer: &str, role: &str) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600;
        let claims = SessionClaims {
            sub: "user-42".to_string(),
            role: role.to_string(),
            sid: Some("sess-1".to_string()),
            iss: issuer.to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_valid_token() {
        let verifier = SessionVerifier::new(&config("top-secret"));
        let token = issue("top-secret", "city-identity", "admin");

        let user = verifier.verify(&token).unwrap();
        assert_eq!(user.user_id, "user-42");
        assert_eq!(user.role, "admin");
        assert_eq!(user.session_id.as_deref(), Some("sess-1"));
    }

    #[test]
    fn rejects_wrong_secret() {
        let verifier = SessionVerifier::new(&config("top-secret"));
        let token = issue("other-secret", "city-identity", "admin");

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_wrong_issuer() {
        let verifier = SessionVerifier::new(&config("top-secret"));
        let token = issue("top-secret", "someone-else", "admin");

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
