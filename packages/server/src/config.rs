use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub gemini_api_key: String,
    /// Shared secret for admin mutations. None means admin endpoints
    /// reject every request (fail closed).
    pub admin_secret: Option<String>,
    pub session_secret: String,
    pub session_issuer: String,
    /// Public base URL of the web app, used to build share links.
    pub app_base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key: env::var("GEMINI_API_KEY")
                .context("GEMINI_API_KEY must be set")?,
            admin_secret: env::var("ADMIN_SECRET").ok().filter(|s| !s.is_empty()),
            session_secret: env::var("SESSION_SECRET")
                .context("SESSION_SECRET must be set")?,
            session_issuer: env::var("SESSION_ISSUER")
                .unwrap_or_else(|_| "trakin-ai".to_string()),
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }
}
