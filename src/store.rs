use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::config::InspectorConfig;

/// Errors surfaced by the store adapter. A connect failure is fatal for the
/// whole run; any mid-run command failure propagates unmodified and
/// terminates the run (every operation here is read-only and idempotent).
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("cannot connect to Redis at {host}:{port}: {message}")]
    ConnectFailed {
        host: String,
        port: u16,
        message: String,
    },

    #[error("connect to {host}:{port} timed out after {timeout_ms}ms")]
    ConnectTimeout {
        host: String,
        port: u16,
        timeout_ms: u64,
    },

    #[error("{command} failed for '{key}': {message}")]
    CommandFailed {
        command: &'static str,
        key: String,
        message: String,
    },

    #[error("INFO {section} failed: {message}")]
    InfoFailed { section: String, message: String },

    #[error("SCAN failed for pattern '{pattern}': {message}")]
    ScanFailed { pattern: String, message: String },
}

/// Closed tag for the store-reported type of a key, produced once right
/// after the existence check so every downstream branch is exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyType {
    String,
    Hash,
    List,
    Set,
    Absent,
    Other(String),
}

impl KeyType {
    fn from_type_reply(reply: &str) -> Self {
        match reply {
            "string" => KeyType::String,
            "hash" => KeyType::Hash,
            "list" => KeyType::List,
            "set" => KeyType::Set,
            "none" => KeyType::Absent,
            other => KeyType::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            KeyType::String => "string",
            KeyType::Hash => "hash",
            KeyType::List => "list",
            KeyType::Set => "set",
            KeyType::Absent => "none",
            KeyType::Other(name) => name,
        }
    }
}

/// Read operations the inspector needs from the store. The Redis adapter is
/// the only production implementation; tests drive the driver and inspector
/// through an in-memory one.
#[async_trait]
pub trait Store {
    async fn exists(&mut self, key: &str) -> Result<bool, StoreError>;
    async fn type_of(&mut self, key: &str) -> Result<KeyType, StoreError>;
    async fn ttl(&mut self, key: &str) -> Result<i64, StoreError>;
    async fn get(&mut self, key: &str) -> Result<Option<String>, StoreError>;
    /// Field/value pairs in store iteration order (unordered, not stable).
    async fn hash_get_all(&mut self, key: &str) -> Result<Vec<(String, String)>, StoreError>;
    async fn list_len(&mut self, key: &str) -> Result<u64, StoreError>;
    async fn list_range(&mut self, key: &str, start: i64, stop: i64)
        -> Result<Vec<String>, StoreError>;
    /// Members in store iteration order (unordered, not stable).
    async fn set_members(&mut self, key: &str) -> Result<Vec<String>, StoreError>;
    /// Full cursor scan; returns every key matching the glob pattern.
    async fn scan_keys(&mut self, pattern: &str) -> Result<Vec<String>, StoreError>;
    async fn memory_usage(&mut self, key: &str) -> Result<Option<u64>, StoreError>;
    async fn info(&mut self, section: &str) -> Result<HashMap<String, String>, StoreError>;
}

/// Redis-backed [`Store`] holding one connection for the run's duration.
pub struct RedisStore {
    conn: redis::aio::ConnectionManager,
}

impl RedisStore {
    /// Open a connection and verify it with PING. Bounded by the configured
    /// connect timeout; no retry, inspection is a point-in-time operation.
    pub async fn connect(config: &InspectorConfig) -> Result<Self, StoreError> {
        let connect_failed = |message: String| StoreError::ConnectFailed {
            host: config.host.clone(),
            port: config.port,
            message,
        };

        let auth = match &config.password {
            Some(password) => format!(":{}@", password),
            None => String::new(),
        };
        let url = format!("redis://{}{}:{}/", auth, config.host, config.port);
        let client = redis::Client::open(url).map_err(|e| connect_failed(e.to_string()))?;

        let attempt = client.get_connection_manager();
        let mut conn = tokio::time::timeout(config.connect_timeout, attempt)
            .await
            .map_err(|_| StoreError::ConnectTimeout {
                host: config.host.clone(),
                port: config.port,
                timeout_ms: config.connect_timeout.as_millis() as u64,
            })?
            .map_err(|e| connect_failed(e.to_string()))?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| connect_failed(e.to_string()))?;

        Ok(Self { conn })
    }

    fn command_failed(command: &'static str, key: &str, e: redis::RedisError) -> StoreError {
        StoreError::CommandFailed {
            command,
            key: key.to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn exists(&mut self, key: &str) -> Result<bool, StoreError> {
        self.conn
            .exists(key)
            .await
            .map_err(|e| Self::command_failed("EXISTS", key, e))
    }

    async fn type_of(&mut self, key: &str) -> Result<KeyType, StoreError> {
        let reply: String = redis::cmd("TYPE")
            .arg(key)
            .query_async(&mut self.conn)
            .await
            .map_err(|e| Self::command_failed("TYPE", key, e))?;
        Ok(KeyType::from_type_reply(&reply))
    }

    async fn ttl(&mut self, key: &str) -> Result<i64, StoreError> {
        self.conn
            .ttl(key)
            .await
            .map_err(|e| Self::command_failed("TTL", key, e))
    }

    async fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        self.conn
            .get(key)
            .await
            .map_err(|e| Self::command_failed("GET", key, e))
    }

    async fn hash_get_all(&mut self, key: &str) -> Result<Vec<(String, String)>, StoreError> {
        self.conn
            .hgetall(key)
            .await
            .map_err(|e| Self::command_failed("HGETALL", key, e))
    }

    async fn list_len(&mut self, key: &str) -> Result<u64, StoreError> {
        self.conn
            .llen(key)
            .await
            .map_err(|e| Self::command_failed("LLEN", key, e))
    }

    async fn list_range(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<String>, StoreError> {
        self.conn
            .lrange(key, start as isize, stop as isize)
            .await
            .map_err(|e| Self::command_failed("LRANGE", key, e))
    }

    async fn set_members(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        self.conn
            .smembers(key)
            .await
            .map_err(|e| Self::command_failed("SMEMBERS", key, e))
    }

    async fn scan_keys(&mut self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let scan_failed = |e: redis::RedisError| StoreError::ScanFailed {
            pattern: pattern.to_string(),
            message: e.to_string(),
        };

        let mut keys = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, mut batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(500)
                .query_async(&mut self.conn)
                .await
                .map_err(scan_failed)?;
            keys.append(&mut batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }
        Ok(keys)
    }

    async fn memory_usage(&mut self, key: &str) -> Result<Option<u64>, StoreError> {
        redis::cmd("MEMORY")
            .arg("USAGE")
            .arg(key)
            .query_async(&mut self.conn)
            .await
            .map_err(|e| Self::command_failed("MEMORY USAGE", key, e))
    }

    async fn info(&mut self, section: &str) -> Result<HashMap<String, String>, StoreError> {
        let blob: String = redis::cmd("INFO")
            .arg(section)
            .query_async(&mut self.conn)
            .await
            .map_err(|e| StoreError::InfoFailed {
                section: section.to_string(),
                message: e.to_string(),
            })?;
        Ok(parse_info(&blob))
    }
}

/// Parse an INFO reply blob into a field map. Section headers (`# Memory`)
/// and blank lines are skipped.
fn parse_info(blob: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for line in blob.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.to_string(), value.to_string());
        }
    }
    fields
}
