use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,    // user_id
    pub sid: String, // personal_access_tokens.token_id
    pub iat: i64,
    pub exp: i64,    // expiration timestamp
}

/// HS256 signing keys derived from `JWT_SECRET`.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs a token for the given session.
    pub fn generate_token(
        &self,
        user_id: i32,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<String, String> {
        let claims = Claims {
            sub: user_id,
            sid: session_id.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| format!("Failed to generate token: {}", e))
    }

    /// Verifies signature and expiry, then returns the claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| format!("Invalid token: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_generate_and_verify_token() {
        let keys = JwtKeys::from_secret("test-secret");
        let expires_at = Utc::now() + Duration::hours(24);

        let token = keys.generate_token(123, "session-1", expires_at).unwrap();
        let claims = keys.verify_token(&token).unwrap();

        assert_eq!(claims.sub, 123);
        assert_eq!(claims.sid, "session-1");
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_invalid_token() {
        let keys = JwtKeys::from_secret("test-secret");
        assert!(keys.verify_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret() {
        let token = JwtKeys::from_secret("other-secret")
            .generate_token(1, "s", Utc::now() + Duration::hours(1))
            .unwrap();

        assert!(JwtKeys::from_secret("test-secret").verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let keys = JwtKeys::from_secret("test-secret");
        let token = keys
            .generate_token(1, "s", Utc::now() - Duration::minutes(5))
            .unwrap();

        assert!(keys.verify_token(&token).is_err());
    }
}
