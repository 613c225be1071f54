use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub browser_headless: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            browser_headless: env::var("BROWSER_HEADLESS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("BROWSER_HEADLESS must be true or false")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only meaningful when the vars are unset, as in CI
        if env::var("PORT").is_err() && env::var("BROWSER_HEADLESS").is_err() {
            let config = Config::from_env().unwrap();
            assert_eq!(config.port, 8080);
            assert!(config.browser_headless);
        }
    }
}
