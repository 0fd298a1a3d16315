//! Human-readable formatting for byte counts, TTLs, and counters.
//!
//! These are total functions with no failure states; every report path in
//! the crate funnels through them so sizes and durations render the same
//! way everywhere.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024-based units, capping at TB.
pub fn format_bytes(size: u64) -> String {
    let mut value = size as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} TB", value)
}

/// Format a Redis TTL reply. -1 and -2 are the protocol's sentinel codes
/// for "no expiry" and "no such key".
pub fn format_ttl(ttl: i64) -> String {
    match ttl {
        -1 => "No expiration".to_string(),
        -2 => "Key does not exist".to_string(),
        seconds => {
            let hours = seconds as f64 / 3600.0;
            format!("{} seconds ({:.2} hours)", seconds, hours)
        }
    }
}

/// Render a counter with comma thousands separators.
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_zero() {
        assert_eq!(format_bytes(0), "0.00 B");
    }

    #[test]
    fn bytes_unit_boundaries() {
        assert_eq!(format_bytes(1023), "1023.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn bytes_caps_at_tb() {
        let two_pb = 2u64 * 1024 * 1024 * 1024 * 1024 * 1024;
        assert_eq!(format_bytes(two_pb), "2048.00 TB");
    }

    #[test]
    fn ttl_sentinels() {
        assert_eq!(format_ttl(-1), "No expiration");
        assert_eq!(format_ttl(-2), "Key does not exist");
    }

    #[test]
    fn ttl_seconds_and_hours() {
        let rendered = format_ttl(90);
        assert!(rendered.contains("90 seconds"));
        assert!(rendered.contains("0.03 hours"));
        assert_eq!(format_ttl(3600), "3600 seconds (1.00 hours)");
    }

    #[test]
    fn digit_grouping() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(1234567), "1,234,567");
    }
}
