use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the PocketBase backend.
    pub pocketbase_url: String,
    /// Service token for privileged record writes (status transitions run
    /// with elevated store access; row rules still apply to end users).
    pub pocketbase_token: Option<String>,
    /// Auth collection resolved against for request credentials.
    pub auth_collection: String,
    /// On-demand revalidation endpoint of the site; derived views are
    /// busted in-process when unset.
    pub revalidate_url: Option<String>,
    pub revalidate_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            pocketbase_url: env::var("POCKETBASE_URL").context("POCKETBASE_URL must be set")?,
            pocketbase_token: env::var("POCKETBASE_TOKEN").ok(),
            auth_collection: env::var("POCKETBASE_AUTH_COLLECTION")
                .unwrap_or_else(|_| "users".to_string()),
            revalidate_url: env::var("REVALIDATE_URL").ok(),
            revalidate_secret: env::var("REVALIDATE_SECRET").ok(),
        })
    }
}
