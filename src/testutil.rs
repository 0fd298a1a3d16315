//! In-memory [`Store`] used by unit tests; behaves like a tiny slice of
//! Redis with deterministic scan order (insertion order).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::store::{KeyType, Store, StoreError};

#[derive(Debug, Clone)]
pub enum Entry {
    Str(String),
    Hash(Vec<(String, String)>),
    List(Vec<String>),
    Set(Vec<String>),
    Other(String),
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Vec<(String, Entry)>,
    ttls: HashMap<String, i64>,
    sizes: HashMap<String, u64>,
    pub memory_info: HashMap<String, String>,
    pub stats_info: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn put(&mut self, key: &str, entry: Entry) {
        self.entries.push((key.to_string(), entry));
    }

    pub fn put_string(&mut self, key: &str, value: impl Into<String>) {
        self.put(key, Entry::Str(value.into()));
    }

    pub fn put_hash(&mut self, key: &str, fields: Vec<(String, String)>) {
        self.put(key, Entry::Hash(fields));
    }

    pub fn put_list(&mut self, key: &str, items: Vec<String>) {
        self.put(key, Entry::List(items));
    }

    pub fn put_set(&mut self, key: &str, members: Vec<String>) {
        self.put(key, Entry::Set(members));
    }

    pub fn put_other(&mut self, key: &str, type_name: &str) {
        self.put(key, Entry::Other(type_name.to_string()));
    }

    pub fn set_ttl(&mut self, key: &str, ttl: i64) {
        self.ttls.insert(key.to_string(), ttl);
    }

    pub fn set_size(&mut self, key: &str, bytes: u64) {
        self.sizes.insert(key.to_string(), bytes);
    }

    fn lookup(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn exists(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.lookup(key).is_some())
    }

    async fn type_of(&mut self, key: &str) -> Result<KeyType, StoreError> {
        Ok(match self.lookup(key) {
            None => KeyType::Absent,
            Some(Entry::Str(_)) => KeyType::String,
            Some(Entry::Hash(_)) => KeyType::Hash,
            Some(Entry::List(_)) => KeyType::List,
            Some(Entry::Set(_)) => KeyType::Set,
            Some(Entry::Other(name)) => KeyType::Other(name.clone()),
        })
    }

    async fn ttl(&mut self, key: &str) -> Result<i64, StoreError> {
        if self.lookup(key).is_none() {
            return Ok(-2);
        }
        Ok(self.ttls.get(key).copied().unwrap_or(-1))
    }

    async fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(match self.lookup(key) {
            Some(Entry::Str(value)) => Some(value.clone()),
            _ => None,
        })
    }

    async fn hash_get_all(&mut self, key: &str) -> Result<Vec<(String, String)>, StoreError> {
        Ok(match self.lookup(key) {
            Some(Entry::Hash(fields)) => fields.clone(),
            _ => Vec::new(),
        })
    }

    async fn list_len(&mut self, key: &str) -> Result<u64, StoreError> {
        Ok(match self.lookup(key) {
            Some(Entry::List(items)) => items.len() as u64,
            _ => 0,
        })
    }

    async fn list_range(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<String>, StoreError> {
        Ok(match self.lookup(key) {
            Some(Entry::List(items)) => {
                let start = start.max(0) as usize;
                let stop = (stop.max(-1) as usize).min(items.len().saturating_sub(1));
                if start > stop || items.is_empty() {
                    Vec::new()
                } else {
                    items[start..=stop].to_vec()
                }
            }
            _ => Vec::new(),
        })
    }

    async fn set_members(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(match self.lookup(key) {
            Some(Entry::Set(members)) => members.clone(),
            _ => Vec::new(),
        })
    }

    async fn scan_keys(&mut self, pattern: &str) -> Result<Vec<String>, StoreError> {
        // Only prefix globs, which is all the inspector issues.
        let prefix = pattern.strip_suffix('*').unwrap_or(pattern);
        Ok(self
            .entries
            .iter()
            .map(|(k, _)| k.clone())
            .filter(|k| k.starts_with(prefix))
            .collect())
    }

    async fn memory_usage(&mut self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.sizes.get(key).copied())
    }

    async fn info(&mut self, section: &str) -> Result<HashMap<String, String>, StoreError> {
        Ok(match section {
            "memory" => self.memory_info.clone(),
            "stats" => self.stats_info.clone(),
            _ => HashMap::new(),
        })
    }
}
