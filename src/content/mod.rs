use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::site_config::scalar_to_string;

pub mod content_file;
pub mod content_type;
pub mod dump;
pub mod front_matter;
pub mod loader;
pub mod markdown_renderer;

pub use content_type::{ContentType, SortKey, SortOrder};

/// One parsed content file with every derived field resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub date: String,
    pub image: String,
    pub text: String,
    pub excerpt: String,
    pub content: String,
    pub metadata: Map<String, Value>,
}

impl ContentItem {
    /// Copy with the date replaced by its display form, for detail pages.
    pub fn with_display_date(&self, display_date: String) -> ContentItem {
        ContentItem {
            date: display_date,
            ..self.clone()
        }
    }

    pub fn meta_str(&self, key: &str) -> Option<String> {
        self.metadata.get(key).and_then(scalar_to_string)
    }

    /// Loose truthiness for front matter flags:
    /// `highlight: yes`, `highlight: true` and `highlight: 1` all count.
    pub fn meta_flag(&self, key: &str) -> bool {
        match self.metadata.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }

    pub fn meta_list(&self, key: &str) -> Vec<String> {
        match self.metadata.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(other) => scalar_to_string(other).into_iter().collect(),
            None => vec![],
        }
    }
}

/// Intro block at the top of a page.
#[derive(Debug, Clone, Default, PartialEq, ramhorns::Content)]
pub struct Hero {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_content: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn item_with(metadata: Value) -> ContentItem {
        ContentItem {
            id: "id".to_string(),
            title: "title".to_string(),
            date: "2024-01-01".to_string(),
            image: "".to_string(),
            text: "".to_string(),
            excerpt: "".to_string(),
            content: "".to_string(),
            metadata: metadata.as_object().unwrap().clone(),
        }
    }

    #[test]
    fn test_meta_flag() {
        let item = item_with(json!({
            "a": true, "b": false, "c": "yes", "d": "", "e": 1, "f": 0, "g": null, "h": ["x"]
        }));
        assert!(item.meta_flag("a"));
        assert!(!item.meta_flag("b"));
        assert!(item.meta_flag("c"));
        assert!(!item.meta_flag("d"));
        assert!(item.meta_flag("e"));
        assert!(!item.meta_flag("f"));
        assert!(!item.meta_flag("g"));
        assert!(item.meta_flag("h"));
        assert!(!item.meta_flag("missing"));
    }

    #[test]
    fn test_meta_list() {
        let item = item_with(json!({"skills": ["ROS", "CAD", 3], "lead": "Ada"}));
        assert_eq!(item.meta_list("skills"), ["ROS", "CAD", "3"]);
        assert_eq!(item.meta_list("lead"), ["Ada"]);
        assert!(item.meta_list("missing").is_empty());
    }

    #[test]
    fn test_with_display_date() {
        let item = item_with(json!({}));
        let display = item.with_display_date("January 01, 2024".to_string());
        assert_eq!(display.date, "January 01, 2024");
        assert_eq!(display.id, item.id);
        assert_eq!(item.date, "2024-01-01");
    }
}
