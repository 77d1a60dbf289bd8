use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// How long a session token stays valid after issuance
pub const TOKEN_TTL_HOURS: i64 = 8;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // Subject (admin email)
    pub email: String, // Admin email
    pub exp: i64,      // Expiration timestamp
    pub iat: i64,      // Issued at timestamp
    pub iss: String,   // Issuer
}

/// JWT Service - creates and verifies session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a session token for `email`, valid for 8 hours from now
    pub fn create_token(&self, email: &str) -> Result<String> {
        self.create_token_at(email, Utc::now())
    }

    pub fn create_token_at(&self, email: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let exp = issued_at + Duration::hours(TOKEN_TTL_HOURS);

        let claims = Claims {
            sub: email.to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a token
    ///
    /// Returns claims if the signature and issuer check out and the token has not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.verify_token_at(token, Utc::now())
    }

    /// Verify against an explicit clock. Valid only while `now < exp`, with no leeway.
    ///
    /// JWT timestamps have whole-second resolution: `iat` and `exp` drop the
    /// fractional part of the issue time, and `now` is truncated the same way.
    /// A token issued at T.9s therefore stops verifying at T+8h, up to one
    /// second before 8 hours have fully elapsed.
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        // Expiry is checked below against `now`, with no leeway
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;

        if now.timestamp() >= claims.exp {
            bail!("Token expired");
        }

        Ok(claims)
    }
}
