use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub demo_seed: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("CRM_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("CRM_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("CRM_PORT must be a valid u16")?;

        let demo_seed = env::var("CRM_DEMO_SEED")
            .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            demo_seed,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_joins_host_and_port() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            demo_seed: false,
        };
        assert_eq!(config.address(), "127.0.0.1:3000");
    }
}
