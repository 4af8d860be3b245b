//! Query and label derivation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Leading catalog-id token on dataset directory names: `n`, 8 digits, `-`.
static DIR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^n\d{8}-").expect("Failed to compile prefix regex"));

/// A search query paired with the label naming its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Search text sent to the engine.
    pub text: String,
    /// Filesystem-safe name for the query's image directory and CSV file.
    pub label: String,
}

impl Query {
    /// Creates a query whose label is the text with spaces turned into underscores.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let label = text.replace(' ', "_");
        Self { text, label }
    }

    /// Creates a query with an explicit label.
    pub fn with_label(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }

    /// Creates a query from a dataset directory name.
    ///
    /// The directory name itself is the label. The search text is the name
    /// with any leading catalog-id token stripped and underscores turned
    /// into spaces.
    pub fn from_dir_name(name: impl Into<String>) -> Self {
        let label = name.into();
        let text = DIR_PREFIX.replace(&label, "").replace('_', " ");
        Self { text, label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_simple() {
        let query = Query::from_text("corgi");
        assert_eq!(query.text, "corgi");
        assert_eq!(query.label, "corgi");
    }

    #[test]
    fn test_from_text_replaces_spaces() {
        let query = Query::from_text("shiba inu dog");
        assert_eq!(query.text, "shiba inu dog");
        assert_eq!(query.label, "shiba_inu_dog");
    }

    #[test]
    fn test_with_label() {
        let query = Query::with_label("shiba inu dog", "shiba");
        assert_eq!(query.text, "shiba inu dog");
        assert_eq!(query.label, "shiba");
    }

    #[test]
    fn test_from_dir_name_strips_catalog_prefix() {
        let query = Query::from_dir_name("n02098105-soft-coated_wheaten_terrier");
        assert_eq!(query.text, "soft-coated wheaten terrier");
        assert_eq!(query.label, "n02098105-soft-coated_wheaten_terrier");
    }

    #[test]
    fn test_from_dir_name_without_prefix() {
        let query = Query::from_dir_name("wild_cats");
        assert_eq!(query.text, "wild cats");
        assert_eq!(query.label, "wild_cats");
    }

    #[test]
    fn test_from_dir_name_short_digit_run_is_kept() {
        let query = Query::from_dir_name("n1234-cats");
        assert_eq!(query.text, "n1234-cats");
    }

    #[test]
    fn test_from_dir_name_prefix_must_lead() {
        let query = Query::from_dir_name("cats-n02098105-old");
        assert_eq!(query.text, "cats-n02098105-old");
    }

    #[test]
    fn test_query_serialization() {
        let query = Query::from_text("shiba inu");
        let json = serde_json::to_string(&query).unwrap();
        assert!(json.contains("\"text\":\"shiba inu\""));
        assert!(json.contains("\"label\":\"shiba_inu\""));
    }

    #[test]
    fn test_query_deserialization() {
        let json = r#"{"text":"shiba inu","label":"shiba_inu"}"#;
        let query: Query = serde_json::from_str(json).unwrap();
        assert_eq!(query, Query::from_text("shiba inu"));
    }
}
