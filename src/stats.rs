use std::collections::HashMap;

use crate::format::{format_bytes, group_digits};
use crate::report::Report;

/// Point-in-time snapshot of the store's memory counters (INFO memory).
/// Missing or unparsable fields count as 0; this is a diagnostic read of
/// server-maintained counters, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStats {
    pub used_memory: u64,
    pub used_memory_peak: u64,
    /// 0 means no configured limit.
    pub max_memory: u64,
}

/// Snapshot of the store's cumulative hit/miss counters (INFO stats).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
    pub total_commands_processed: u64,
}

fn counter(info: &HashMap<String, String>, field: &str) -> u64 {
    info.get(field).and_then(|v| v.parse().ok()).unwrap_or(0)
}

impl MemoryStats {
    pub fn from_info(info: &HashMap<String, String>) -> Self {
        Self {
            used_memory: counter(info, "used_memory"),
            used_memory_peak: counter(info, "used_memory_peak"),
            max_memory: counter(info, "maxmemory"),
        }
    }

    /// Used memory as a percentage of the configured limit; None when no
    /// limit is set.
    pub fn usage_percent(&self) -> Option<f64> {
        if self.max_memory == 0 {
            return None;
        }
        Some(self.used_memory as f64 / self.max_memory as f64 * 100.0)
    }

    pub fn append_to(&self, report: &mut Report) {
        let section = report.section("Memory Statistics");
        section.field("  Used memory", format_bytes(self.used_memory));
        section.field("  Peak memory", format_bytes(self.used_memory_peak));
        if let Some(percent) = self.usage_percent() {
            section.field("  Max memory", format_bytes(self.max_memory));
            section.field("  Usage", format!("{:.2}%", percent));
        }
    }
}

impl CacheStats {
    pub fn from_info(info: &HashMap<String, String>) -> Self {
        Self {
            keyspace_hits: counter(info, "keyspace_hits"),
            keyspace_misses: counter(info, "keyspace_misses"),
            total_commands_processed: counter(info, "total_commands_processed"),
        }
    }

    /// Percentage of lookups served from cache; 0 when there have been no
    /// lookups at all (guards the divide).
    pub fn hit_rate(&self) -> f64 {
        let total = self.keyspace_hits + self.keyspace_misses;
        if total == 0 {
            return 0.0;
        }
        self.keyspace_hits as f64 / total as f64 * 100.0
    }

    pub fn append_to(&self, report: &mut Report) {
        let section = report.section("Cache Statistics");
        section.field("  Cache hits", group_digits(self.keyspace_hits));
        section.field("  Cache misses", group_digits(self.keyspace_misses));
        section.field("  Hit rate", format!("{:.2}%", self.hit_rate()));
        section.field(
            "  Total commands",
            group_digits(self.total_commands_processed),
        );
    }
}
