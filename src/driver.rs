//! Orchestration of the two invocation modes: the store-wide overview and
//! the single-key deep dive.

use crate::classify::classify;
use crate::config::InspectorConfig;
use crate::format::{format_bytes, format_ttl};
use crate::inspect::inspect_key;
use crate::report::Report;
use crate::stats::{CacheStats, MemoryStats};
use crate::store::{Store, StoreError};

const SAMPLE_KEYS: usize = 10;

/// Overview mode: namespace summary, category breakdown, sample keys,
/// memory and cache statistics, usage hints. Read-only throughout.
pub async fn overview<S: Store + ?Sized>(
    store: &mut S,
    config: &InspectorConfig,
) -> Result<Report, StoreError> {
    let mut report = Report::new();

    let banner = report.banner("Redis Cache Inspection");
    banner.field("Host", &config.host);
    banner.field("Port", config.port);
    banner.field("Namespace", &config.namespace);

    let keys = store.scan_keys(&config.key_pattern()).await?;
    report.plain().line(format!(
        "Found {} keys with namespace '{}'",
        keys.len(),
        config.namespace
    ));

    if keys.is_empty() {
        report.plain().line("No cached data found.");
        return Ok(report);
    }

    let groups = classify(&config.namespace, &keys);
    let breakdown = report.section("Keys by category:");
    for (category, members) in &groups {
        breakdown.line(format!("  {}: {} keys", category, members.len()));
    }

    let samples = report.section(format!("Sample keys (first {}):", SAMPLE_KEYS));
    for (i, key) in keys.iter().take(SAMPLE_KEYS).enumerate() {
        let key_type = store.type_of(key).await?;
        let ttl = store.ttl(key).await?;
        samples.line(format!("  {}. {}", i + 1, key));
        samples.line(format!(
            "     Type: {}, TTL: {}",
            key_type.name(),
            format_ttl(ttl)
        ));
        if let Some(bytes) = store.memory_usage(key).await? {
            samples.line(format!("     Size: {}", format_bytes(bytes)));
        }
    }
    if keys.len() > SAMPLE_KEYS {
        samples.line(format!("  ... and {} more keys", keys.len() - SAMPLE_KEYS));
    }

    let memory = MemoryStats::from_info(&store.info("memory").await?);
    memory.append_to(&mut report);

    let stats = CacheStats::from_info(&store.info("stats").await?);
    stats.append_to(&mut report);

    usage_hints(&mut report, config);
    Ok(report)
}

/// Inspect mode: the single-key report, nothing else.
pub async fn inspect<S: Store + ?Sized>(
    store: &mut S,
    config: &InspectorConfig,
    key: &str,
) -> Result<Report, StoreError> {
    inspect_key(store, &config.namespace, key).await
}

/// The name this run was invoked as, for the usage block.
fn program_name() -> String {
    std::env::args()
        .next()
        .and_then(|arg| {
            std::path::Path::new(&arg)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "cache-inspect".to_string())
}

fn usage_hints(report: &mut Report, config: &InspectorConfig) {
    let program = program_name();
    let hints = report.section("Usage:");
    hints.line(format!("  {}                     # Show overview", program));
    hints.line(format!("  {} <key_name>          # Inspect specific key", program));
    hints.line("");
    hints.line("Examples:");
    hints.line(format!(
        "  {} completion:abc123    # Inspect a completion cache key",
        program
    ));
    hints.line(format!(
        "  {} embedding:xyz789     # Inspect an embedding cache key",
        program
    ));
    hints.line("");
    hints.line("To see all keys, use:");
    hints.line(format!(
        "  redis-cli -h {} -p {} KEYS '{}'",
        config.host,
        config.port,
        config.key_pattern()
    ));
}
