use std::collections::BTreeMap;

/// Bucket used when a key carries no category segment (a key that is
/// exactly `<namespace>:`, or an empty key). Deliberate policy, see tests.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// The logical category of a key: the first colon-delimited segment after
/// the namespace prefix. Exactly one `<namespace>:` prefix occurrence is
/// stripped; keys from outside the namespace classify on their own first
/// segment.
pub fn category_of(namespace: &str, key: &str) -> String {
    let prefix = format!("{}:", namespace);
    let rest = key.strip_prefix(&prefix).unwrap_or(key);
    let category = match rest.split_once(':') {
        Some((first, _)) => first,
        None => rest,
    };
    if category.is_empty() {
        UNKNOWN_CATEGORY.to_string()
    } else {
        category.to_string()
    }
}

/// Group keys by category. Categories iterate lexicographically; keys
/// within a category keep the caller's scan order, which is not stable
/// across runs.
pub fn classify(namespace: &str, keys: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for key in keys {
        groups
            .entry(category_of(namespace, key))
            .or_default()
            .push(key.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn groups_by_first_segment() {
        let groups = classify(
            "ns",
            &keys(&["ns:completion:a", "ns:completion:b", "ns:embedding:c"]),
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["completion"].len(), 2);
        assert_eq!(groups["embedding"].len(), 1);
    }

    #[test]
    fn empty_key_list() {
        let groups = classify("ns", &[]);
        assert!(groups.is_empty());
    }

    #[test]
    fn categories_sort_lexicographically() {
        let groups = classify("ns", &keys(&["ns:zeta:1", "ns:alpha:1", "ns:mid:1"]));
        let order: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn scan_order_preserved_within_category() {
        let groups = classify("ns", &keys(&["ns:c:2", "ns:c:1", "ns:c:3"]));
        assert_eq!(groups["c"], keys(&["ns:c:2", "ns:c:1", "ns:c:3"]));
    }

    #[test]
    fn bare_namespace_key_is_unknown() {
        assert_eq!(category_of("ns", "ns:"), UNKNOWN_CATEGORY);
        assert_eq!(category_of("ns", ""), UNKNOWN_CATEGORY);
    }

    #[test]
    fn strips_exactly_one_prefix() {
        // Doubled prefix: only the first occurrence is stripped, so the
        // category is the namespace text itself.
        assert_eq!(category_of("ns", "ns:ns:completion:a"), "ns");
    }

    #[test]
    fn key_without_namespace_uses_own_first_segment() {
        assert_eq!(category_of("ns", "other:thing"), "other");
        assert_eq!(category_of("ns", "plain"), "plain");
    }

    #[test]
    fn category_without_rest() {
        assert_eq!(category_of("ns", "ns:completion"), "completion");
    }
}
