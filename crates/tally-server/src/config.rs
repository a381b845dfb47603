use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug)]
pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = get("TALLY_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("TALLY_JWT_SECRET is unset or still a placeholder");
        }

        let db_path = get("TALLY_DB_PATH").unwrap_or_else(|| "tally.db".into()).into();
        let host = get("TALLY_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("TALLY_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("TALLY_PORT is not a valid port")?;

        let addr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

        Ok(Self { jwt_secret, db_path, addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[("TALLY_JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("tally.db"));
        assert_eq!(config.addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn placeholder_secret_rejected() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("TALLY_JWT_SECRET", "dev-secret-change-me")])).is_err());
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("TALLY_JWT_SECRET", "s3cret"),
            ("TALLY_HOST", "127.0.0.1"),
            ("TALLY_PORT", "8080"),
            ("TALLY_DB_PATH", "/tmp/blog.db"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.db_path, PathBuf::from("/tmp/blog.db"));
    }

    #[test]
    fn bad_port() {
        let res = Config::from_lookup(lookup(&[("TALLY_JWT_SECRET", "s3cret"), ("TALLY_PORT", "http")]));
        assert!(res.is_err());
    }
}
