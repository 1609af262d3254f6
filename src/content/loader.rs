use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde_json::{Map, Value};
use spdlog::{debug, error, info, warn};

use crate::content::content_file::{list_markdown_files, ContentFile};
use crate::content::front_matter::parse_front_matter;
use crate::content::markdown_renderer::MarkdownRenderer;
use crate::content::{ContentItem, ContentType, Hero};
use crate::site_config::scalar_to_string;
use crate::text_utils::{date_from_file_name, parse_iso_date};

const UNTITLED: &str = "Untitled";

/// Reads content files below a content root and turns them into
/// [`ContentItem`]s. Failures are logged and isolated to the file that caused
/// them.
pub struct ContentLoader {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
    today: NaiveDate,
}

impl ContentLoader {
    pub fn new(content_dir: &Path) -> ContentLoader {
        Self::with_today(content_dir, Local::now().date_naive())
    }

    /// `today` is the fallback date for files that carry none, fixed for the
    /// lifetime of the loader.
    pub fn with_today(content_dir: &Path, today: NaiveDate) -> ContentLoader {
        ContentLoader {
            content_dir: content_dir.to_path_buf(),
            renderer: MarkdownRenderer::new(),
            today,
        }
    }

    pub fn get_all_content(&self, content_type: &ContentType) -> Vec<ContentItem> {
        let dir = self.content_dir.join(content_type.directory);
        if !dir.is_dir() {
            warn!("{} directory not found", dir.display());
            return vec![];
        }

        let files = match list_markdown_files(&dir) {
            Ok(files) => files,
            Err(e) => {
                error!("Error listing {}: {}", dir.display(), e);
                return vec![];
            }
        };

        let mut items: Vec<ContentItem> = files.iter()
            .filter_map(|file| self.load_file(file))
            .collect();

        content_type.sort(&mut items);
        debug!("Loaded {} {} items from {}", items.len(), content_type.name, dir.display());
        items
    }

    /// Parses one file, logging and swallowing any error.
    pub fn load_file(&self, file_path: &Path) -> Option<ContentItem> {
        match self.process_file(file_path) {
            Ok(item) => Some(item),
            Err(e) => {
                error!("Error processing {}: {}", file_path.display(), e);
                None
            }
        }
    }

    pub fn process_file(&self, file_path: &Path) -> io::Result<ContentItem> {
        let content_file = ContentFile::from_file(file_path)?;
        let front_matter = parse_front_matter(&content_file.raw_content)?;
        let content = self.renderer.render(front_matter.body)?;
        Ok(self.build_item(content_file.id, front_matter.metadata, content))
    }

    fn build_item(&self, id: String, mut metadata: Map<String, Value>, content: String) -> ContentItem {
        let date = self.resolve_date(&id, &metadata);
        metadata.insert("date".to_string(), Value::String(date.clone()));

        let title = first_present(&metadata, &["title", "name"]).unwrap_or_else(|| UNTITLED.to_string());
        let text = first_present(&metadata, &["text", "emoji"]).unwrap_or_default();
        let excerpt = first_present(&metadata, &["excerpt"]).unwrap_or_default();
        let image = first_present(&metadata, &["image"]).unwrap_or_default();

        ContentItem {
            id,
            title,
            date,
            image,
            text,
            excerpt,
            content,
            metadata,
        }
    }

    fn resolve_date(&self, id: &str, metadata: &Map<String, Value>) -> String {
        if let Some(raw) = metadata.get("date").and_then(scalar_to_string) {
            if let Some(date) = parse_iso_date(&raw) {
                return date.to_iso_string();
            }
            debug!("Could not parse date '{}' of {}, inferring it", raw, id);
        }

        let date = date_from_file_name(id).unwrap_or(self.today);
        date.format("%Y-%m-%d").to_string()
    }

    /// Hero block for `page` from `heroes/<page>.md`, blank when missing.
    pub fn load_hero(&self, page: &str) -> Hero {
        let hero_file = self.content_dir.join("heroes").join(format!("{}.md", page));
        if !hero_file.exists() {
            warn!("{} not found, leaving hero section blank", hero_file.display());
            return Hero::default();
        }

        match self.load_file(&hero_file) {
            Some(item) => Hero {
                hero_subtitle: item.meta_str("subtitle").unwrap_or_default(),
                hero_title: item.title,
                hero_content: item.content,
            },
            None => {
                warn!("Failed to process {}, leaving hero section blank", hero_file.display());
                Hero::default()
            }
        }
    }

    /// Rendered body of a single content file such as `about.md`, or a
    /// placeholder paragraph when it is missing or broken.
    pub fn load_page_body(&self, file_name: &str) -> String {
        let content_file = self.content_dir.join(file_name);
        if !content_file.exists() {
            warn!("{} not found", content_file.display());
            return format!("<p>{} content not found.</p>", file_name);
        }

        match self.load_file(&content_file) {
            Some(item) => item.content,
            None => format!("<p>Error processing {} content.</p>", file_name),
        }
    }

    /// Single file below the content root. `None` when missing or broken.
    pub fn load_item(&self, file_name: &str) -> Option<ContentItem> {
        let content_file = self.content_dir.join(file_name);
        if !content_file.exists() {
            warn!("{} not found", content_file.display());
            return None;
        }
        let item = self.load_file(&content_file);
        if item.is_some() {
            info!("Loaded {}", content_file.display());
        }
        item
    }
}

fn first_present(metadata: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| metadata.get(*key).and_then(scalar_to_string))
}
