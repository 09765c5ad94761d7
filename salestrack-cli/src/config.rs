//! Store connection configuration
//!
//! Resolution order: explicit `--url` flag, then `SALESTRACK_URL` /
//! `SALESTRACK_TOKEN` environment variables, then the user config file,
//! then the local default.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_URL: &str = "http://127.0.0.1:8090";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub token: Option<String>,
}

/// Resolved connection settings
#[derive(Debug, Clone)]
pub struct Connection {
    pub url: String,
    pub token: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("salestrack").join("config.toml"))
}

fn load_file() -> Result<ConfigFile> {
    let Some(path) = config_path() else {
        return Ok(ConfigFile::default());
    };
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

/// Resolve the connection from flag, environment, and config file
pub fn resolve(url_flag: Option<String>) -> Result<Connection> {
    let file = load_file()?;
    let url = url_flag
        .or_else(|| std::env::var("SALESTRACK_URL").ok())
        .or(file.url)
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let token = std::env::var("SALESTRACK_TOKEN").ok().or(file.token);
    Ok(Connection { url, token })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_parses_partial_keys() {
        let config: ConfigFile = toml::from_str("url = \"http://store.local\"").unwrap();
        assert_eq!(config.url.as_deref(), Some("http://store.local"));
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_flag_wins_over_everything() {
        let connection = resolve(Some("http://flag.local".into())).unwrap();
        assert_eq!(connection.url, "http://flag.local");
    }
}
