use anyhow::{Context as _, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_WELCOME_CHANNEL: &str = "general";
pub const DEFAULT_DATA_FILE: &str = "user_data.json";
pub const DEFAULT_PORT: u16 = 10000;

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub welcome_channel_name: String,
    pub data_file: PathBuf,
    pub port: u16,
}

impl Config {
    /// Reads configuration from the environment. Only `DISCORD_TOKEN` is
    /// required; everything else falls back to a default.
    pub fn from_env() -> Result<Self> {
        let token = env::var("DISCORD_TOKEN")
            .context("DISCORD_TOKEN not found. Add it to .env or environment variables")?;

        let welcome_channel_name = env::var("WELCOME_CHANNEL_NAME")
            .unwrap_or_else(|_| DEFAULT_WELCOME_CHANNEL.to_string());

        let data_file = env::var("DATA_FILE")
            .unwrap_or_else(|_| DEFAULT_DATA_FILE.to_string())
            .into();

        let port = match env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            token,
            welcome_channel_name,
            data_file,
            port,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.parse()
        .with_context(|| format!("PORT is not a valid port number: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_port() {
        assert_eq!(parse_port("10000").unwrap(), 10000);
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(parse_port("web").is_err());
        assert!(parse_port("70000").is_err());
    }
}
