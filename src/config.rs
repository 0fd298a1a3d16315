use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

/// Connection and namespace settings for one inspection run.
///
/// Precedence, highest first: the override file (default `./.env`), then the
/// process environment, then built-in defaults. The precedence is applied
/// once in [`InspectorConfig::load`]; nothing else in the crate reads the
/// environment.
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub namespace: String,
    pub connect_timeout: Duration,
}

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 6379;
const DEFAULT_NAMESPACE: &str = "litellm";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

impl InspectorConfig {
    /// Resolve configuration from an optional override file and the process
    /// environment. A missing override file is not an error.
    pub fn load(env_file: &Path) -> Result<Self> {
        let overrides = if env_file.exists() {
            parse_env_file(env_file)?
        } else {
            HashMap::new()
        };
        Self::resolve(&overrides, |name| std::env::var(name).ok())
    }

    /// Apply the documented precedence: `overrides` wins over `env`, which
    /// wins over defaults. Split out from [`load`] so tests control both
    /// sources. A malformed `REDIS_PORT` is a startup error, not a silent
    /// fallback.
    fn resolve(
        overrides: &HashMap<String, String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let lookup = |name: &str| overrides.get(name).cloned().or_else(|| env(name));

        let host = lookup("REDIS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("REDIS_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid REDIS_PORT value '{}'", raw))?,
            None => DEFAULT_PORT,
        };
        let password = lookup("REDIS_PASSWORD").filter(|p| !p.is_empty());
        let namespace = lookup("REDIS_NAMESPACE").unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        Ok(Self {
            host,
            port,
            password,
            namespace,
            connect_timeout: CONNECT_TIMEOUT,
        })
    }

    /// The scan pattern covering every key this run reports on.
    pub fn key_pattern(&self) -> String {
        format!("{}:*", self.namespace)
    }
}

/// Parse a `key=value` override file. Blank lines and `#` comments are
/// skipped; keys and values are trimmed. Lines without `=` are ignored.
fn parse_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read env file {}", path.display()))?;

    let mut vars = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            vars.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    Ok(vars)
}
