use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use spdlog::{info, warn};

/// Site-wide values from `config/site.json`, flattened to strings so that
/// templates can address them as `{{#site}}{{name}}{{/site}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteConfig {
    pub values: HashMap<String, String>,
}

impl SiteConfig {
    pub fn load(config_file: &Path) -> SiteConfig {
        if !config_file.exists() {
            info!("No site configuration at {}, using empty configuration", config_file.display());
            return SiteConfig::default();
        }

        let parsed = fs::read_to_string(config_file)
            .map_err(|e| e.to_string())
            .and_then(|raw| serde_json::from_str::<Map<String, Value>>(&raw).map_err(|e| e.to_string()));

        match parsed {
            Ok(map) => SiteConfig::from_map(&map),
            Err(e) => {
                warn!("Error reading site configuration {}: {}. Using empty configuration", config_file.display(), e);
                SiteConfig::default()
            }
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> SiteConfig {
        SiteConfig {
            values: flatten_values(map),
        }
    }
}

/// Scalars become strings, nested objects are joined with `_`
/// (`{"social": {"github": ..}}` -> `social_github`), arrays of scalars are
/// joined with `, `. Keys with `-` are exposed with `_` as well.
pub fn flatten_values(map: &Map<String, Value>) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for (key, value) in map {
        flatten_into(&mut values, &template_key(key), value);
    }
    values
}

fn flatten_into(values: &mut HashMap<String, String>, key: &str, value: &Value) {
    match value {
        Value::Object(inner) => {
            for (inner_key, inner_value) in inner {
                let key = format!("{}_{}", key, template_key(inner_key));
                flatten_into(values, &key, inner_value);
            }
        }
        Value::Array(items) => {
            let joined: Vec<String> = items.iter().filter_map(scalar_to_string).collect();
            values.insert(key.to_string(), joined.join(", "));
        }
        other => {
            if let Some(s) = scalar_to_string(other) {
                values.insert(key.to_string(), s);
            }
        }
    }
}

fn template_key(key: &str) -> String {
    key.replace('-', "_")
}

/// String form of a JSON scalar. `null`, arrays and objects have none.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
