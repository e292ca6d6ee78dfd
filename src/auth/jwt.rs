use crate::types::{AppError, Claims, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Lifetime of every issued token.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Issues and verifies HS256 bearer tokens that bind a student id.
///
/// The signing secret is fixed for the life of the process.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Creates a service issuing one-day tokens.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing JWTs (should be at least 32 chars)
    pub fn new(jwt_secret: &str) -> Self {
        Self::with_ttl(jwt_secret, Duration::seconds(TOKEN_TTL_SECS))
    }

    /// Creates a service with a custom token lifetime. A negative `ttl`
    /// mints tokens that are already expired.
    pub fn with_ttl(jwt_secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            ttl,
        }
    }

    /// Signs a token for `student_id`.
    pub fn issue(&self, student_id: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            student_id: student_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry, returning the full claims.
    ///
    /// Every failure is reported as [`AppError::InvalidToken`].
    pub fn verify_claims(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AppError::InvalidToken
            })
    }

    /// Verifies a token and returns the student id it was issued for.
    pub fn verify(&self, token: &str) -> Result<String> {
        self.verify_claims(token).map(|claims| claims.student_id)
    }
}
