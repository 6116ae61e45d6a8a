//! Verification of identity-provider access tokens.
//!
//! Tokens are HS256-signed JWTs issued by the external identity provider
//! with the user's UUID as `sub`. Any role carried in the token is ignored:
//! authorization is decided by [`super::roles::RoleDirectory`].

use academy_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Audience the identity provider stamps on signed-in user tokens.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// The subset of token claims the server reads.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id at the identity provider.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Configuration for token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HMAC-SHA256 secret of the identity provider.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var      | Required |
    /// |--------------|----------|
    /// | `JWT_SECRET` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self { secret }
    }
}

/// Issue an HS256 token the way the identity provider does.
///
/// The server never hands these out itself; this exists for local tooling
/// and tests.
pub fn generate_access_token(
    user_id: DbId,
    expires_in_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + expires_in_secs,
        iat: now,
        aud: Some(AUTHENTICATED_AUDIENCE.to_string()),
        email: None,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature and expiration. The audience is not pinned.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, 3600, &config).expect("token generation");

        let claims = validate_token(&token, &config).expect("token validation");
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.aud.as_deref(), Some(AUTHENTICATED_AUDIENCE));
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        // Well beyond the default 60-second leeway.
        let token = generate_access_token(Uuid::new_v4(), -600, &config).unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
        };
        let token = generate_access_token(Uuid::new_v4(), 3600, &test_config()).unwrap();

        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_role_claim_is_ignored() {
        #[derive(Serialize)]
        struct ForeignClaims {
            sub: String,
            exp: i64,
            role: &'static str,
        }

        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &ForeignClaims {
                sub: user_id.to_string(),
                exp: chrono::Utc::now().timestamp() + 600,
                role: "admin",
            },
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        #[derive(Serialize)]
        struct BadClaims {
            sub: &'static str,
            exp: i64,
        }

        let config = test_config();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &BadClaims {
                sub: "42",
                exp: chrono::Utc::now().timestamp() + 600,
            },
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }
}
