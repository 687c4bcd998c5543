//! Environment-based configuration.

use std::env;
use std::path::PathBuf;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_LOGS_PATH: &str = "logs";

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base of links sent to users, eg `https://quest.example`.
    pub public_url: String,
    pub logs_path: PathBuf,
    /// Catalog seed file replacing the built-in data.
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_url: format!("http://localhost:{DEFAULT_PORT}"),
            logs_path: PathBuf::from(DEFAULT_LOGS_PATH),
            seed_path: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides defaults from the process environment.
    pub fn load(&mut self) -> Result<(), AppError> {
        self.load_from(|key| env::var(key).ok())
    }

    /// Overrides defaults from `lookup`. Unset and blank keys keep their
    /// default.
    pub fn load_from<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.host = host;
        }
        if let Some(port) = get("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| AppError::ConfigurationError {
                    msg: format!("Invalid PORT \"{port}\": {e}"),
                })?;
        }
        self.public_url = match get("PUBLIC_URL") {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port),
        };
        if let Some(path) = get("LOGS_PATH") {
            self.logs_path = PathBuf::from(path);
        }
        self.seed_path = get("SEED_PATH").map(PathBuf::from);

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = Config::new();
        config.load_from(|key| vars.get(key).cloned())?;
        Ok(config)
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.public_url, "http://localhost:5000");
        assert_eq!(config.logs_path, PathBuf::from("logs"));
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_public_url_follows_port() {
        let config = load(&[("PORT", "8080")]).unwrap();
        assert_eq!(config.public_url, "http://localhost:8080");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PUBLIC_URL", "https://quest.example/"),
            ("SEED_PATH", "/etc/quest/catalog.json"),
            ("LOGS_PATH", "  "),
        ])
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.public_url, "https://quest.example");
        assert_eq!(config.seed_path, Some(PathBuf::from("/etc/quest/catalog.json")));
        assert_eq!(config.logs_path, PathBuf::from("logs"));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationError { .. }));
    }
}
