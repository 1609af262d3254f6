use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use spdlog::{debug, info, warn};
use walkdir::WalkDir;

use crate::content::markdown_renderer::HIGHLIGHT_CLASS;

const DEFAULT_SYNTAX_THEME: &str = "default";
const ASSET_DIRS: [&str; 2] = ["images", "scripts"];

fn syntax_stylesheet(theme: &str) -> &'static str {
    match theme {
        DEFAULT_SYNTAX_THEME => include_str!("../res/syntax/default.css"),
        _ => {
            warn!("Unknown syntax theme {}, using {}", theme, DEFAULT_SYNTAX_THEME);
            include_str!("../res/syntax/default.css")
        }
    }
}

/// Moves static files from the project root into the output directory.
pub struct AssetMover {
    root_dir: PathBuf,
    output_dir: PathBuf,
}

impl AssetMover {
    pub fn new(root_dir: &Path, output_dir: &Path) -> AssetMover {
        AssetMover {
            root_dir: root_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn clean_output_directory(&self) -> io::Result<()> {
        if self.output_dir.exists() {
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        info!("Cleaned output directory {}", self.output_dir.display());
        Ok(())
    }

    /// Copies `src` (relative to the root) to `dest` (relative to the output
    /// directory), replacing whatever was there. Returns false when the
    /// source does not exist.
    pub fn copy_directory(&self, src: &str, dest: &str) -> io::Result<bool> {
        let src_dir = self.root_dir.join(src);
        if !src_dir.is_dir() {
            warn!("{} not found, skipping", src_dir.display());
            return Ok(false);
        }

        let dest_dir = self.output_dir.join(dest);
        if dest_dir.exists() {
            fs::remove_dir_all(&dest_dir)?;
        }

        let mut copied = 0;
        for entry in WalkDir::new(&src_dir) {
            let entry = entry?;
            let relative = match entry.path().strip_prefix(&src_dir) {
                Ok(relative) => relative,
                Err(e) => return Err(io::Error::new(ErrorKind::Other, e.to_string())),
            };
            let target = dest_dir.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                fs::copy(entry.path(), &target)?;
                copied += 1;
            }
        }

        info!("Copied {} files from {} to {}", copied, src_dir.display(), dest_dir.display());
        Ok(true)
    }

    /// `images/` and `scripts/`, each optional.
    pub fn copy_assets(&self) -> io::Result<()> {
        for dir in ASSET_DIRS {
            self.copy_directory(dir, dir)?;
        }
        Ok(())
    }

    /// Copies the named stylesheets from `css/` into `<output>/css/`.
    /// Returns how many were found.
    pub fn copy_css_files(&self, css_files: &[String]) -> io::Result<usize> {
        let css_out = self.output_dir.join("css");
        fs::create_dir_all(&css_out)?;

        let mut copied = 0;
        for name in css_files {
            let src = self.root_dir.join("css").join(name);
            if !src.is_file() {
                warn!("{} not found, skipping", src.display());
                continue;
            }
            fs::copy(&src, css_out.join(name))?;
            debug!("Copied {}", src.display());
            copied += 1;
        }

        info!("Copied {} stylesheets", copied);
        Ok(copied)
    }

    /// Writes `<output>/css/syntax.css` with the rules for code block
    /// containers. Code inside them is not tokenized.
    pub fn generate_syntax_css(&self, theme: &str) -> io::Result<PathBuf> {
        let css_out = self.output_dir.join("css");
        fs::create_dir_all(&css_out)?;

        let syntax_file = css_out.join("syntax.css");
        fs::write(&syntax_file, syntax_stylesheet(theme))?;
        info!("Generated {} for .{}", syntax_file.display(), HIGHLIGHT_CLASS);
        Ok(syntax_file)
    }
}
