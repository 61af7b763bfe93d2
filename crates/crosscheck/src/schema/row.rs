//! Rows as ordered column-name to value mappings.

use indexmap::IndexMap;

/// A single record: column name to cell value, in header order.
///
/// Known columns are read by name; anything else passes through untouched.
pub type Row = IndexMap<String, String>;

/// Named-field access used by the validators.
pub trait RowFields {
    /// Value of `column` with surrounding whitespace removed, or `""` when absent.
    fn trimmed(&self, column: &str) -> &str;

    /// Whether `column` is absent or blank after trimming.
    fn is_blank(&self, column: &str) -> bool {
        self.trimmed(column).is_empty()
    }

    /// Whether every cell in the row is blank.
    fn is_empty_row(&self) -> bool;
}

impl RowFields for Row {
    fn trimmed(&self, column: &str) -> &str {
        self.get(column).map(|v| v.trim()).unwrap_or("")
    }

    fn is_empty_row(&self) -> bool {
        self.values().all(|v| v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_trimmed_and_blank() {
        let r = row(&[("Topic", "  Compliance "), ("Industry", "   ")]);
        assert_eq!(r.trimmed("Topic"), "Compliance");
        assert!(r.is_blank("Industry"));
        assert!(r.is_blank("Subtopic"));
        assert!(!r.is_blank("Topic"));
    }

    #[test]
    fn test_empty_row() {
        assert!(row(&[("a", ""), ("b", "  ")]).is_empty_row());
        assert!(!row(&[("a", ""), ("b", "x")]).is_empty_row());
        assert!(Row::new().is_empty_row());
    }

    #[test]
    fn test_column_order_preserved() {
        let r = row(&[("Tier", "1"), ("Industry", "General"), ("Topic", "Finance")]);
        let keys: Vec<&str> = r.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["Tier", "Industry", "Topic"]);
    }
}
