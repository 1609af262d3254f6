use anyhow::{Context, Result};
use spdlog::{error, info};

use crate::assets::AssetMover;
use crate::config::{BuildOptions, Config, SitePaths};
use crate::content::content_type::{ALL, NEWS, PROJECTS};
use crate::content::dump::write_content_dump;
use crate::content::loader::ContentLoader;
use crate::content::{ContentItem, ContentType, Hero};
use crate::site_config::SiteConfig;
use crate::view::item_view::ExtraContext;
use crate::view::pages::{ArticlePage, IndexPage, ListingPage};
use crate::view::{PageRenderer, TemplateDir};

pub const IMAGE_CLASSES: &str = "image-base image-square d-flex align-items-center justify-content-center text-white fw-bold";

const NEXT_MEETING_FILE: &str = "nextmeeting.md";
const NEXT_MEETING_TITLE: &str = "Next Meeting";

/// Runs every build stage, in order, for one site.
pub struct SiteBuilder {
    paths: SitePaths,
    options: BuildOptions,
    site: SiteConfig,
    loader: ContentLoader,
    templates: TemplateDir,
    assets: AssetMover,
}

impl SiteBuilder {
    pub fn new(config: &Config) -> SiteBuilder {
        Self::from_paths(config.site_paths(), config.build.clone())
    }

    pub fn from_paths(paths: SitePaths, options: BuildOptions) -> SiteBuilder {
        SiteBuilder {
            site: SiteConfig::load(&paths.site_config),
            loader: ContentLoader::new(&paths.content_dir),
            templates: TemplateDir::new(&paths.templates_dir),
            assets: AssetMover::new(&paths.root_dir, &paths.output_dir),
            options,
            paths,
        }
    }

    /// Swaps the loader, e.g. for one with a fixed fallback date.
    pub fn with_loader(mut self, loader: ContentLoader) -> SiteBuilder {
        self.loader = loader;
        self
    }

    pub fn build(&self) -> Result<()> {
        info!("Building site from {} into {}", self.paths.root_dir.display(), self.paths.output_dir.display());

        self.assets.clean_output_directory()
            .with_context(|| format!("Cannot prepare output directory {}", self.paths.output_dir.display()))?;
        self.copy_static_files();

        let collections: Vec<(&ContentType, Vec<ContentItem>)> = ALL.iter()
            .map(|content_type| (*content_type, self.loader.get_all_content(content_type)))
            .collect();

        self.build_index(items_of(&collections, &NEWS), items_of(&collections, &PROJECTS))?;
        for (content_type, items) in &collections {
            self.build_collection_page(content_type, items)?;
        }
        self.build_about()?;
        self.build_nextmeeting()?;

        if self.options.dump_content_json {
            self.dump_content(&collections)?;
        }

        info!("Build complete");
        Ok(())
    }

    fn renderer(&self) -> PageRenderer<'_, TemplateDir> {
        PageRenderer::new(&self.templates, &self.site, &self.paths.output_dir)
    }

    /// Missing assets never stop the build.
    fn copy_static_files(&self) {
        if let Err(e) = self.assets.copy_assets() {
            error!("Error copying assets: {}", e);
        }
        if let Err(e) = self.assets.copy_css_files(&self.options.css_files) {
            error!("Error copying stylesheets: {}", e);
        }
        if let Err(e) = self.assets.generate_syntax_css(&self.options.syntax_theme) {
            error!("Error generating syntax stylesheet: {}", e);
        }
    }

    /// Home page: highlighted news cards plus every project.
    pub fn build_index(&self, news: &[ContentItem], projects: &[ContentItem]) -> Result<()> {
        let renderer = self.renderer();

        let highlighted: Vec<ContentItem> = news.iter()
            .filter(|item| item.meta_flag("highlight"))
            .cloned()
            .collect();
        let news_extra = ExtraContext::new().with("image_classes", IMAGE_CLASSES);
        let news_content = renderer.render_collection(&highlighted, "cards/news-card.html", &news_extra)
            .context("Cannot render highlighted news")?;
        info!("Rendered {} highlighted news out of {}", highlighted.len(), news.len());

        let projects_extra = ExtraContext::new().with_meta_defaults(PROJECTS.meta_defaults);
        let projects_content = renderer.render_collection(projects, "cards/project-card.html", &projects_extra)
            .context("Cannot render project cards")?;

        let hero = self.loader.load_hero("index");
        let page = IndexPage {
            hero: &hero,
            news_content: &news_content,
            projects_content: &projects_content,
        };
        let written = renderer.render_single_page("pages/index.html", "index.html", &page)
            .context("Cannot build index.html")?;
        info!("Generated {}", written.display());
        Ok(())
    }

    /// Detail pages, listing and hero for one collection.
    pub fn build_collection_page(&self, content_type: &ContentType, items: &[ContentItem]) -> Result<()> {
        let renderer = self.renderer();

        renderer.build_detail_pages(items, content_type)
            .with_context(|| format!("Cannot build {} detail pages", content_type.name))?;

        let extra = ExtraContext::new()
            .with("image_classes", IMAGE_CLASSES)
            .with_meta_defaults(content_type.meta_defaults);
        let content = renderer.render_collection(items, content_type.listing_template, &extra)
            .with_context(|| format!("Cannot render {} listing", content_type.name))?;

        let hero = self.loader.load_hero(content_type.hero_page);
        let page = ListingPage {
            hero: &hero,
            content: &content,
            item_count: items.len() as i64,
        };
        renderer.render_single_page(content_type.page_template, content_type.output_filename, &page)
            .with_context(|| format!("Cannot build {}", content_type.output_filename))?;

        info!("Built {} with {} {}", content_type.output_filename, items.len(), content_type.name);
        Ok(())
    }

    pub fn build_about(&self) -> Result<()> {
        let renderer = self.renderer();
        let content = self.loader.load_page_body("about.md");
        let hero = self.loader.load_hero("about");

        let page = ArticlePage { hero: &hero, content: &content };
        renderer.render_single_page("pages/about.html", "about.html", &page)
            .context("Cannot build about.html")?;
        info!("Built about.html");
        Ok(())
    }

    /// The hero comes from the page's own front matter rather than from
    /// `heroes/`.
    pub fn build_nextmeeting(&self) -> Result<()> {
        let renderer = self.renderer();
        let meeting_file = self.paths.content_dir.join(NEXT_MEETING_FILE);

        let (hero, content) = if !meeting_file.exists() {
            (next_meeting_hero(None), "<p>Next meeting content not found.</p>".to_string())
        } else {
            match self.loader.load_item(NEXT_MEETING_FILE) {
                Some(item) => (next_meeting_hero(Some(&item)), item.content),
                None => (next_meeting_hero(None), "<p>Error processing next meeting content.</p>".to_string()),
            }
        };

        let page = ArticlePage { hero: &hero, content: &content };
        renderer.render_single_page("pages/nextmeeting.html", "nextmeeting/index.html", &page)
            .context("Cannot build nextmeeting/index.html")?;
        info!("Built nextmeeting/index.html");
        Ok(())
    }

    fn dump_content(&self, collections: &[(&ContentType, Vec<ContentItem>)]) -> Result<()> {
        for (content_type, items) in collections {
            let dump_file = self.paths.output_dir.join("data").join(format!("{}.json", content_type.name));
            write_content_dump(&dump_file, items)
                .with_context(|| format!("Cannot write {}", dump_file.display()))?;
            info!("Wrote {} {} to {}", items.len(), content_type.name, dump_file.display());
        }
        Ok(())
    }
}

fn items_of<'c>(collections: &'c [(&ContentType, Vec<ContentItem>)], content_type: &ContentType) -> &'c [ContentItem] {
    collections.iter()
        .find(|(candidate, _)| candidate.name == content_type.name)
        .map(|(_, items)| items.as_slice())
        .unwrap_or(&[])
}

/// False when the loader fell back to its default title.
fn has_own_title(item: &ContentItem) -> bool {
    item.meta_str("title").or_else(|| item.meta_str("name")).is_some()
}

fn next_meeting_hero(item: Option<&ContentItem>) -> Hero {
    match item {
        Some(item) => Hero {
            hero_title: if has_own_title(item) { item.title.clone() } else { NEXT_MEETING_TITLE.to_string() },
            hero_subtitle: item.meta_str("subtitle").unwrap_or_default(),
            hero_content: "".to_string(),
        },
        None => Hero {
            hero_title: NEXT_MEETING_TITLE.to_string(),
            ..Hero::default()
        },
    }
}
