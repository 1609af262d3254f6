use std::collections::HashMap;

use crate::content::Hero;
use crate::view::item_view::ItemView;

/// Wraps any page context so the site values are always reachable as
/// `{{#site}}{{name}}{{/site}}`. Fields of `page` resolve at the top level.
#[derive(ramhorns::Content)]
pub struct SitePage<'a, Pg> {
    pub site: &'a HashMap<String, String>,
    #[ramhorns(flatten)]
    pub page: &'a Pg,
}

#[derive(ramhorns::Content)]
pub struct IndexPage<'a> {
    pub hero: &'a Hero,
    pub news_content: &'a str,
    pub projects_content: &'a str,
}

/// Listing page of one content type, e.g. `whatsnew.html`.
#[derive(ramhorns::Content)]
pub struct ListingPage<'a> {
    pub hero: &'a Hero,
    pub content: &'a str,
    pub item_count: i64,
}

/// Page made of a single markdown body, e.g. `about.html`.
#[derive(ramhorns::Content)]
pub struct ArticlePage<'a> {
    pub hero: &'a Hero,
    pub content: &'a str,
}

#[derive(ramhorns::Content)]
pub struct DetailPage<'a> {
    pub item: ItemView<'a>,
}
