use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use ramhorns::Content;
use spdlog::info;

use crate::content::{ContentItem, ContentType};
use crate::site_config::SiteConfig;
use crate::text_utils::format_long_date;
use crate::view::item_view::{ExtraContext, ItemView};
use crate::view::pages::{DetailPage, SitePage};
use crate::view::templates::TemplateEngine;

/// Turns content into HTML through a [`TemplateEngine`] and writes the
/// resulting pages below the output directory.
pub struct PageRenderer<'a, E: TemplateEngine> {
    engine: &'a E,
    site: &'a SiteConfig,
    output_dir: PathBuf,
}

impl<'a, E: TemplateEngine> PageRenderer<'a, E> {
    pub fn new(engine: &'a E, site: &'a SiteConfig, output_dir: &Path) -> PageRenderer<'a, E> {
        PageRenderer {
            engine,
            site,
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn site(&self) -> &'a HashMap<String, String> {
        &self.site.values
    }

    /// One template instance per item, joined by newlines. An empty slice
    /// gives an empty string without resolving the template.
    pub fn render_collection(&self, items: &[ContentItem], template_id: &str, extra: &ExtraContext) -> io::Result<String> {
        let mut rendered = Vec::with_capacity(items.len());
        for item in items {
            let view = ItemView::new(item, extra);
            rendered.push(self.engine.render(template_id, &view)?);
        }
        Ok(rendered.join("\n"))
    }

    /// Whole pages always see the site values next to their own fields.
    fn render_page<C: Content>(&self, template_id: &str, context: &C) -> io::Result<String> {
        let page = SitePage {
            site: self.site(),
            page: context,
        };
        self.engine.render(template_id, &page)
    }

    /// Renders a whole page and writes it to `output_filename`, relative to
    /// the output directory. Returns the written path.
    pub fn render_single_page<C: Content>(&self, template_id: &str, output_filename: &str, context: &C) -> io::Result<PathBuf> {
        let html = self.render_page(template_id, context)?;
        let output_file = self.output_dir.join(output_filename);
        write_file(&output_file, &html)?;
        Ok(output_file)
    }

    /// Writes `<output>/<type dir>/<id>.html` for every item, with the date in
    /// its long display form.
    pub fn build_detail_pages(&self, items: &[ContentItem], content_type: &ContentType) -> io::Result<usize> {
        if items.is_empty() {
            return Ok(0);
        }

        let detail_dir = self.output_dir.join(content_type.directory);
        fs::create_dir_all(&detail_dir)?;

        let extra = ExtraContext::new().with_meta_defaults(content_type.meta_defaults);
        for item in items {
            let display_item = item.with_display_date(format_long_date(&item.date));
            let page = DetailPage {
                item: ItemView::new(&display_item, &extra),
            };
            let html = self.render_page(content_type.detail_template, &page)?;
            write_file(&detail_dir.join(format!("{}.html", item.id)), &html)?;
        }

        info!("Built {} {} detail pages", items.len(), content_type.name);
        Ok(items.len())
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use serde_json::Map;
    use tempfile::TempDir;

    use crate::content::content_type::{MEMBERS, NEWS, PROJECTS};
    use crate::content::Hero;
    use crate::view::pages::ArticlePage;
    use crate::view::templates::tests::InlineTemplates;

    use super::*;

    fn item(id: &str, title: &str, date: &str) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            image: "".to_string(),
            text: "".to_string(),
            excerpt: format!("about {}", title),
            content: format!("<p>{}</p>", title),
            metadata: Map::new(),
        }
    }

    fn site() -> SiteConfig {
        let mut site = SiteConfig::default();
        site.values.insert("name".to_string(), "Robot Hackers".to_string());
        site
    }

    #[test]
    fn test_render_collection() {
        let templates = InlineTemplates::new(&[
            ("cards/card.html", "[{{id}}|{{title}}|{{formatted_date}}|{{#extra}}{{image_classes}}{{/extra}}|{{#meta}}{{status}}{{/meta}}]"),
        ]);
        let site = site();
        let out = TempDir::new().unwrap();
        let renderer = PageRenderer::new(&templates, &site, out.path());

        let items = vec![item("b", "Beta", "2024-06-15"), item("a", "Alpha", "not a date")];
        let extra = ExtraContext::new()
            .with("image_classes", "square")
            .with_meta_defaults(PROJECTS.meta_defaults);
        let html = renderer.render_collection(&items, "cards/card.html", &extra).unwrap();
        assert_eq!(html, "[b|Beta|June 15, 2024|square|Unknown]\n[a|Alpha|not a date|square|Unknown]");
    }

    #[test]
    fn test_render_empty_collection() {
        let templates = InlineTemplates::new(&[]);
        let site = site();
        let out = TempDir::new().unwrap();
        let renderer = PageRenderer::new(&templates, &site, out.path());

        // The template does not exist, but it is never looked up
        let html = renderer.render_collection(&[], "cards/missing.html", &ExtraContext::new()).unwrap();
        assert_eq!(html, "");
    }

    #[test]
    fn test_render_single_page() {
        let templates = InlineTemplates::new(&[
            ("pages/about.html", "<title>{{#site}}{{name}}{{/site}}</title>{{#hero}}<h1>{{hero_title}}</h1>{{/hero}}{{{content}}}"),
        ]);
        let site = site();
        let out = TempDir::new().unwrap();
        let renderer = PageRenderer::new(&templates, &site, out.path());

        let hero = Hero { hero_title: "About".to_string(), ..Hero::default() };
        let page = ArticlePage { hero: &hero, content: "<p>We build.</p>" };
        let written = renderer.render_single_page("pages/about.html", "nested/about.html", &page).unwrap();

        assert_eq!(written, out.path().join("nested/about.html"));
        let html = fs::read_to_string(&written).unwrap();
        assert_eq!(html, "<title>Robot Hackers</title><h1>About</h1><p>We build.</p>");

        // Overwrites instead of appending
        renderer.render_single_page("pages/about.html", "nested/about.html", &page).unwrap();
        assert_eq!(fs::read_to_string(&written).unwrap(), html);
    }

    #[derive(ramhorns::Content)]
    struct Bare<'a> {
        content: &'a str,
    }

    #[test]
    fn test_single_page_always_sees_site() {
        let templates = InlineTemplates::new(&[
            ("pages/plain.html", "<title>{{#site}}{{name}}{{/site}}</title>{{content}}"),
        ]);
        let site = site();
        let out = TempDir::new().unwrap();
        let renderer = PageRenderer::new(&templates, &site, out.path());

        let written = renderer.render_single_page("pages/plain.html", "plain.html", &Bare { content: "x" }).unwrap();
        assert_eq!(fs::read_to_string(written).unwrap(), "<title>Robot Hackers</title>x");
    }

    #[test]
    fn test_missing_page_template_is_an_error() {
        let templates = InlineTemplates::new(&[]);
        let site = site();
        let out = TempDir::new().unwrap();
        let renderer = PageRenderer::new(&templates, &site, out.path());

        let hero = Hero::default();
        let page = ArticlePage { hero: &hero, content: "" };
        let err = renderer.render_single_page("pages/about.html", "about.html", &page).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!out.path().join("about.html").exists());
    }

    #[test]
    fn test_build_detail_pages() {
        let templates = InlineTemplates::new(&[
            ("details/news-detail.html", "{{#site}}{{name}}{{/site}}: {{#item}}{{title}} on {{date}}{{/item}}"),
        ]);
        let site = site();
        let out = TempDir::new().unwrap();
        let renderer = PageRenderer::new(&templates, &site, out.path());

        let items = vec![item("2024-03-10-arm", "Arm", "2024-03-10"), item("kickoff", "Kickoff", "2024-01-05T10:00:00Z")];
        let count = renderer.build_detail_pages(&items, &NEWS).unwrap();
        assert_eq!(count, 2);

        let arm = fs::read_to_string(out.path().join("news/2024-03-10-arm.html")).unwrap();
        assert_eq!(arm, "Robot Hackers: Arm on March 10, 2024");
        let kickoff = fs::read_to_string(out.path().join("news/kickoff.html")).unwrap();
        assert_eq!(kickoff, "Robot Hackers: Kickoff on January 05, 2024");
    }

    #[test]
    fn test_build_detail_pages_empty() {
        let templates = InlineTemplates::new(&[]);
        let site = site();
        let out = TempDir::new().unwrap();
        let renderer = PageRenderer::new(&templates, &site, out.path());

        assert_eq!(renderer.build_detail_pages(&[], &MEMBERS).unwrap(), 0);
        assert!(!out.path().join("members").exists());
    }
}
