use std::cmp::Ordering;

use crate::content::ContentItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Describes one collection of the site: where its files live, how they are
/// ordered and which templates render them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub name: &'static str,
    pub directory: &'static str,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub detail_template: &'static str,
    pub listing_template: &'static str,
    pub page_template: &'static str,
    pub output_filename: &'static str,
    pub hero_page: &'static str,
    /// Metadata values shown on cards when the author left them out.
    pub meta_defaults: &'static [(&'static str, &'static str)],
}

pub const NEWS: ContentType = ContentType {
    name: "news",
    directory: "news",
    sort_key: SortKey::Date,
    sort_order: SortOrder::Descending,
    detail_template: "details/news-detail.html",
    listing_template: "cards/compact-news-card.html",
    page_template: "pages/whatsnew.html",
    output_filename: "whatsnew.html",
    hero_page: "whatsnew",
    meta_defaults: &[],
};

pub const PROJECTS: ContentType = ContentType {
    name: "projects",
    directory: "projects",
    sort_key: SortKey::Date,
    sort_order: SortOrder::Descending,
    detail_template: "details/project-detail.html",
    listing_template: "cards/project-listing-item.html",
    page_template: "pages/projects.html",
    output_filename: "projects.html",
    hero_page: "projects",
    meta_defaults: &[("status", "Unknown"), ("lead", "N/A"), ("members", "N/A")],
};

pub const MEMBERS: ContentType = ContentType {
    name: "members",
    directory: "members",
    sort_key: SortKey::Title,
    sort_order: SortOrder::Ascending,
    detail_template: "details/member-detail.html",
    listing_template: "cards/member-card.html",
    page_template: "pages/members.html",
    output_filename: "members.html",
    hero_page: "members",
    meta_defaults: &[("role", "Member"), ("card-text", "MEMBER")],
};

pub const ALL: [&ContentType; 3] = [&NEWS, &PROJECTS, &MEMBERS];

impl ContentType {
    /// Stable: items comparing equal keep the order they were discovered in.
    pub fn sort(&self, items: &mut [ContentItem]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(&self, a: &ContentItem, b: &ContentItem) -> Ordering {
        let (ka, kb) = match self.sort_key {
            SortKey::Date => (&a.date, &b.date),
            SortKey::Title => (&a.title, &b.title),
        };
        match self.sort_order {
            SortOrder::Ascending => ka.cmp(kb),
            SortOrder::Descending => kb.cmp(ka),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;

    fn item(id: &str, title: &str, date: &str) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            image: "".to_string(),
            text: "".to_string(),
            excerpt: "".to_string(),
            content: "".to_string(),
            metadata: Map::new(),
        }
    }

    fn ids(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date_descending() {
        let mut items = vec![
            item("a", "A", "2024-01-01"),
            item("b", "B", "2024-06-15"),
            item("c", "C", "2023-12-25"),
        ];
        NEWS.sort(&mut items);
        let dates: Vec<&str> = items.iter().map(|i| i.date.as_str()).collect();
        assert_eq!(dates, ["2024-06-15", "2024-01-01", "2023-12-25"]);
    }

    #[test]
    fn test_sort_ties_keep_discovery_order() {
        let mut items = vec![
            item("first", "A", "2024-01-01"),
            item("newest", "B", "2024-02-01"),
            item("second", "C", "2024-01-01"),
            item("third", "D", "2024-01-01"),
        ];
        PROJECTS.sort(&mut items);
        assert_eq!(ids(&items), ["newest", "first", "second", "third"]);
    }

    #[test]
    fn test_sort_members_by_title() {
        let mut items = vec![
            item("zed", "Zed Shaw", "2024-01-01"),
            item("ada", "Ada Lovelace", "2020-01-01"),
            item("ada-2", "Ada Lovelace", "2030-01-01"),
            item("grace", "Grace Hopper", "2022-01-01"),
        ];
        MEMBERS.sort(&mut items);
        assert_eq!(ids(&items), ["ada", "ada-2", "grace", "zed"]);
    }
}
