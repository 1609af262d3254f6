use std::collections::HashMap;

use crate::content::ContentItem;
use crate::site_config::flatten_values;
use crate::text_utils::format_long_date;

#[derive(ramhorns::Content)]
pub struct ListEntry {
    pub value: String,
}

/// Values added to every item of a collection, next to the item's own
/// fields. Templates read them from the `extra` section.
#[derive(Debug, Clone, Default)]
pub struct ExtraContext {
    pub values: HashMap<String, String>,
    /// Fallbacks for metadata keys the author left out, e.g. `status`.
    pub meta_defaults: &'static [(&'static str, &'static str)],
}

impl ExtraContext {
    pub fn new() -> ExtraContext {
        ExtraContext::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> ExtraContext {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_meta_defaults(mut self, defaults: &'static [(&'static str, &'static str)]) -> ExtraContext {
        self.meta_defaults = defaults;
        self
    }
}

/// What a card or detail template sees for one item.
/// `{{title}}`, `{{formatted_date}}`, `{{{content}}}`, `{{#meta}}{{status}}{{/meta}}`,
/// `{{#skills}}{{value}}{{/skills}}`, `{{#extra}}{{image_classes}}{{/extra}}`.
#[derive(ramhorns::Content)]
pub struct ItemView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub name: &'a str,
    pub date: &'a str,
    pub formatted_date: String,
    pub image: &'a str,
    pub text: &'a str,
    pub excerpt: &'a str,
    pub content: &'a str,
    pub meta: HashMap<String, String>,
    pub skills: Vec<ListEntry>,
    pub extra: &'a HashMap<String, String>,
}

impl<'a> ItemView<'a> {
    pub fn new(item: &'a ContentItem, extra: &'a ExtraContext) -> ItemView<'a> {
        let mut meta = flatten_values(&item.metadata);
        for (key, value) in extra.meta_defaults {
            meta.entry(key.replace('-', "_")).or_insert_with(|| value.to_string());
        }

        let skills = item.meta_list("skills")
            .into_iter()
            .map(|value| ListEntry { value })
            .collect();

        ItemView {
            id: &item.id,
            title: &item.title,
            name: &item.title,
            date: &item.date,
            formatted_date: format_long_date(&item.date),
            image: &item.image,
            text: &item.text,
            excerpt: &item.excerpt,
            content: &item.content,
            meta,
            skills,
            extra: &extra.values,
        }
    }
}
