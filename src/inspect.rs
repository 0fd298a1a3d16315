//! Single-key deep dive: type-tagged dispatch with bounded previews of
//! arbitrarily large values.

use serde_json::Value;

use crate::format::{format_bytes, format_ttl};
use crate::report::{Report, Section};
use crate::store::{KeyType, Store, StoreError};

/// Preview bounds. Scalar string values get the generous limit; hash
/// fields and list elements the tighter one.
pub const STRING_PREVIEW_CHARS: usize = 500;
pub const ELEMENT_PREVIEW_CHARS: usize = 200;
pub const HASH_PREVIEW_FIELDS: usize = 10;
pub const LIST_PREVIEW_ITEMS: usize = 5;
pub const SET_PREVIEW_MEMBERS: usize = 10;

/// The JSON-or-raw outcome shared by every value render path. Most cache
/// payloads are JSON but none are guaranteed to be; a failed parse is an
/// expected case, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Structured(Value),
    Raw { text: String, omitted: usize },
}

impl Preview {
    /// Try JSON first; fall back to the raw text truncated to `limit`
    /// characters with a count of what was cut.
    pub fn parse(raw: &str, limit: usize) -> Self {
        if let Ok(value) = serde_json::from_str(raw) {
            return Preview::Structured(value);
        }
        let total = raw.chars().count();
        if total <= limit {
            Preview::Raw {
                text: raw.to_string(),
                omitted: 0,
            }
        } else {
            Preview::Raw {
                text: raw.chars().take(limit).collect(),
                omitted: total - limit,
            }
        }
    }
}

/// Inspect one key and build its report. An absent key is a normal
/// terminal outcome, not an error.
pub async fn inspect_key<S: Store + ?Sized>(
    store: &mut S,
    namespace: &str,
    key: &str,
) -> Result<Report, StoreError> {
    let full_key = if key.starts_with(namespace) {
        key.to_string()
    } else {
        format!("{}:{}", namespace, key)
    };

    let mut report = Report::new();

    if !store.exists(&full_key).await? {
        report
            .plain()
            .line(format!("Key '{}' does not exist", full_key));
        return Ok(report);
    }

    let key_type = store.type_of(&full_key).await?;
    let ttl = store.ttl(&full_key).await?;

    let header = report.plain();
    header.line("=".repeat(60));
    header.field("Key", &full_key);
    header.field("Type", key_type.name());
    header.field("TTL", format_ttl(ttl));

    match key_type {
        KeyType::String => {
            let value = store.get(&full_key).await?.unwrap_or_default();
            render_string(&mut report, &value);
        }
        KeyType::Hash => {
            let fields = store.hash_get_all(&full_key).await?;
            render_hash(&mut report, &fields);
        }
        KeyType::List => {
            let length = store.list_len(&full_key).await?;
            let items = store
                .list_range(&full_key, 0, LIST_PREVIEW_ITEMS as i64 - 1)
                .await?;
            render_list(&mut report, length, &items);
        }
        KeyType::Set => {
            let members = store.set_members(&full_key).await?;
            render_set(&mut report, &members);
        }
        // Gone between the existence check and TYPE; same terminal
        // outcome as never existing.
        KeyType::Absent => {}
        // Unrecognized type (zset, stream, ...): header only.
        KeyType::Other(_) => {}
    }

    Ok(report)
}

fn render_string(report: &mut Report, value: &str) {
    let section = report.plain();
    match Preview::parse(value, STRING_PREVIEW_CHARS) {
        Preview::Structured(parsed) => {
            section.line("Value (JSON):");
            section.line(pretty(&parsed));
        }
        Preview::Raw { text, omitted } => {
            section.line(format!("Value (raw, first {} chars):", STRING_PREVIEW_CHARS));
            section.line(text);
            if omitted > 0 {
                section.line(format!("... ({} more characters)", omitted));
            }
        }
    }
    section.field("Size", format_bytes(value.len() as u64));
}

fn render_hash(report: &mut Report, fields: &[(String, String)]) {
    let section = report.section(format!("Hash fields ({}):", fields.len()));
    for (field, value) in fields.iter().take(HASH_PREVIEW_FIELDS) {
        push_labeled(section, field, value);
    }
    if fields.len() > HASH_PREVIEW_FIELDS {
        section.line(format!(
            "  ... and {} more fields",
            fields.len() - HASH_PREVIEW_FIELDS
        ));
    }
}

fn render_list(report: &mut Report, length: u64, items: &[String]) {
    let section = report.plain();
    section.field("List length", length);
    section.line(format!("First {} items:", LIST_PREVIEW_ITEMS.min(items.len())));
    for (i, item) in items.iter().enumerate() {
        push_labeled(section, &format!("[{}]", i), item);
    }
    if length as usize > LIST_PREVIEW_ITEMS {
        section.line(format!(
            "  ... and {} more items",
            length as usize - LIST_PREVIEW_ITEMS
        ));
    }
}

fn render_set(report: &mut Report, members: &[String]) {
    let section = report.section(format!("Set members ({}):", members.len()));
    for member in members.iter().take(SET_PREVIEW_MEMBERS) {
        section.line(format!("  - {}", member));
    }
    if members.len() > SET_PREVIEW_MEMBERS {
        section.line(format!(
            "  ... and {} more members",
            members.len() - SET_PREVIEW_MEMBERS
        ));
    }
}

/// Render one labeled element (hash field or list slot) through the shared
/// JSON-or-raw path. Fields use the tighter truncation and no remainder
/// note.
fn push_labeled(section: &mut Section, label: &str, value: &str) {
    match Preview::parse(value, ELEMENT_PREVIEW_CHARS) {
        Preview::Structured(parsed) => {
            section.line(format!("  {}: {}", label, pretty(&parsed)));
        }
        Preview::Raw { text, .. } => {
            section.line(format!("  {}: {}", label, text));
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
