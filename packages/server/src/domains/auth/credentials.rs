use anyhow::{Context, Result};
use subtle::ConstantTimeEq;

/// The single administrator account allowed to log in.
///
/// Only a bcrypt hash of the password is kept. Verification always runs the
/// hash comparison, so an unknown email and a wrong password cost the same.
#[derive(Clone)]
pub struct AdminCredentials {
    email: String,
    password_hash: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl AdminCredentials {
    pub fn new(email: &str, password: &str) -> Result<Self> {
        Self::with_cost(email, password, bcrypt::DEFAULT_COST)
    }

    /// Lower costs are only useful in tests.
    pub fn with_cost(email: &str, password: &str, cost: u32) -> Result<Self> {
        let password_hash =
            bcrypt::hash(password, cost).context("Failed to hash admin password")?;

        Ok(Self {
            email: email.to_string(),
            password_hash,
        })
    }

    /// True only for the exact configured email and password
    pub fn verify(&self, email: &str, password: &str) -> bool {
        let email_matches: bool = self.email.as_bytes().ct_eq(email.as_bytes()).into();
        let password_matches = bcrypt::verify(password, &self.password_hash).unwrap_or(false);

        email_matches & password_matches
    }
}
