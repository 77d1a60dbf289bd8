use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub admin_email: String,
    pub admin_password: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub transcript_dir: PathBuf,
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            admin_email: env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?,
            admin_password: env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "callboard".to_string()),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID")
                .context("TWILIO_ACCOUNT_SID must be set")?,
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN")
                .context("TWILIO_AUTH_TOKEN must be set")?,
            transcript_dir: env::var("TRANSCRIPT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./transcripts")),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
