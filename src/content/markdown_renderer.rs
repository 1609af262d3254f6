use std::collections::HashMap;
use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use markdown::Options;
use regex::{Captures, Regex};

/// CSS class shared with the generated syntax stylesheet.
pub const HIGHLIGHT_CLASS: &str = "highlight";

pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> MarkdownRenderer {
        // Content is written by site maintainers, inline HTML is allowed.
        let mut options = Options::gfm();
        options.compile.allow_dangerous_html = true;
        MarkdownRenderer { options }
    }

    pub fn render(&self, md_text: &str) -> io::Result<String> {
        let html = match markdown::to_html_with_options(md_text, &self.options) {
            Ok(x) => x,
            Err(e) => return Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
        };
        let html = wrap_code_blocks(&html);
        Ok(add_heading_ids(&html))
    }
}

/// Only fenced and indented code, i.e. `<pre><code ...>...</code></pre>`.
/// Raw `<pre>` blocks written by authors are left alone.
fn wrap_code_blocks(html: &str) -> String {
    lazy_static! {
        static ref CODE_BLOCK_REGEX: Regex = Regex::new(r"(?s)<pre><code(?P<attrs>[^>]*)>(?P<code>.*?)</code></pre>").unwrap();
    }

    CODE_BLOCK_REGEX.replace_all(html, |caps: &Captures| {
        format!(r#"<div class="{}"><pre><code{}>{}</code></pre></div>"#, HIGHLIGHT_CLASS, &caps["attrs"], &caps["code"])
    }).to_string()
}

/// Gives every heading without attributes an anchor id derived from its text.
/// Repeated headings get `_1`, `_2`, ... suffixes.
fn add_heading_ids(html: &str) -> String {
    lazy_static! {
        static ref HEADING_REGEX: Regex = Regex::new(r"<h(?P<level>[1-6])>(?P<inner>.*?)</h[1-6]>").unwrap();
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    let result = HEADING_REGEX.replace_all(html, |caps: &Captures| {
        let level = &caps["level"];
        let inner = &caps["inner"];
        let slug = slugify(inner);
        if slug.is_empty() {
            return caps[0].to_string();
        }

        let count = seen.entry(slug.clone()).or_insert(0);
        let id = if *count == 0 { slug } else { format!("{}_{}", slug, count) };
        *count += 1;

        format!(r#"<h{} id="{}">{}</h{}>"#, level, id, inner, level)
    });

    result.to_string()
}

pub fn slugify(html_text: &str) -> String {
    lazy_static! {
        static ref TAG_REGEX: Regex = Regex::new(r"<[^>]+>|&[^;\s]+;").unwrap();
        static ref DASH_REGEX: Regex = Regex::new(r"[-\s]+").unwrap();
    }

    let text = TAG_REGEX.replace_all(html_text, "");
    let kept: String = text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_lowercase();

    DASH_REGEX.replace_all(&kept, "-").to_string()
}
