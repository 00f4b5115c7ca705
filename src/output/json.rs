//! JSON output formatting

use serde::Serialize;

use crate::error::Result;

/// Serialize data as pretty-printed JSON
pub fn format_json<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_json() {
        let data = serde_json::json!({"query": "goa beach", "url": "https://img.test/a.jpg"});
        let out = format_json(&data).unwrap();
        assert!(out.contains("\"query\""));
        assert!(out.contains("goa beach"));
    }
}
