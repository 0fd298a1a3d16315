//! Proxy event logging glue, the Rust rendition of the proxy's custom
//! callback hook. The inspector core does not depend on this; it exists
//! because the cache entries the inspector reads originate from requests
//! these events describe.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One lifecycle notification from the request proxy. Success carries
/// token usage; failure carries the upstream error text.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProxyEvent {
    PreCall {
        model: String,
    },
    PostCall {
        duration_seconds: f64,
    },
    Success {
        model: String,
        user_id: String,
        team_id: String,
        duration_seconds: f64,
        total_tokens: u64,
    },
    Failure {
        model: String,
        user_id: String,
        error: String,
    },
}

#[derive(Debug, Serialize)]
struct EventLine<'a> {
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    event: &'a ProxyEvent,
}

/// Writes proxy events as one JSON object per line.
pub struct EventLogger<W: Write> {
    out: W,
}

impl<W: Write> EventLogger<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn log(&mut self, event: &ProxyEvent) -> io::Result<()> {
        self.log_at(Utc::now(), event)
    }

    fn log_at(&mut self, timestamp: DateTime<Utc>, event: &ProxyEvent) -> io::Result<()> {
        let line = EventLine { timestamp, event };
        let text = serde_json::to_string(&line)?;
        writeln!(self.out, "{}", text)
    }
}

/// Caller identity fields default to "unknown" when the proxy's request
/// metadata omits them.
pub fn identity_or_unknown(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "unknown".to_string(),
    }
}
