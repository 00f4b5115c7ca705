//! Cache key normalization
//!
//! Queries that differ only in casing or spacing must share a cache entry,
//! so keys are normalized before every read and write.

/// Normalize a free-text query into its canonical cache key: lowercase,
/// trimmed, internal whitespace collapsed to single spaces.
pub fn normalize_query(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_query("Goa Beach"), "goa beach");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_query("  Goa   Beach "), "goa beach");
        assert_eq!(normalize_query("goa\t\nbeach"), "goa beach");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize_query("  Lake Palace in Udaipur ");
        assert_eq!(normalize_query(&once), once);
    }

    #[test]
    fn test_equivalent_queries_share_key() {
        assert_eq!(
            normalize_query("  Goa   Beach "),
            normalize_query("goa beach")
        );
    }
}
