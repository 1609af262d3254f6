use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

const ROOT_DIR_VAR: &str = "${root_dir}";

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct Paths {
    pub root_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub content_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub site_config: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BuildOptions {
    pub syntax_theme: String,
    pub css_files: Vec<String>,
    pub dump_content_json: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            syntax_theme: "default".to_string(),
            css_files: vec!["shared.css".to_string(), "main.css".to_string()],
            dump_content_json: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default = "default_log_to_console")]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

fn default_log_to_console() -> bool {
    true
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub build: BuildOptions,
    pub log: Option<Log>,
}

/// Fully resolved locations used by a build. Every path is absolute or
/// relative to the process working directory, never to the root.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePaths {
    pub root_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub site_config: PathBuf,
}

impl SitePaths {
    pub fn from_root(root_dir: &Path) -> SitePaths {
        SitePaths {
            root_dir: root_dir.to_path_buf(),
            templates_dir: root_dir.join("templates"),
            content_dir: root_dir.join("content"),
            output_dir: root_dir.join("output"),
            site_config: root_dir.join("config").join("site.json"),
        }
    }
}

impl Config {
    pub fn site_paths(&self) -> SitePaths {
        let root_dir = self.paths.root_dir.clone().unwrap_or_else(default_root_dir);
        let defaults = SitePaths::from_root(&root_dir);
        let resolve = |path: &Option<PathBuf>, default: PathBuf| match path {
            Some(path) => resolve_path(&root_dir, path),
            None => default,
        };

        SitePaths {
            templates_dir: resolve(&self.paths.templates_dir, defaults.templates_dir),
            content_dir: resolve(&self.paths.content_dir, defaults.content_dir),
            output_dir: resolve(&self.paths.output_dir, defaults.output_dir),
            site_config: resolve(&self.paths.site_config, defaults.site_config),
            root_dir,
        }
    }
}

/// The build scripts historically lived in a `build/` directory next to the
/// content, so running from there means the site root is the parent.
fn default_root_dir() -> PathBuf {
    let in_build_dir = env::current_dir()
        .ok()
        .and_then(|cur_dir| cur_dir.file_name().map(|name| name == "build"))
        .unwrap_or(false);

    if in_build_dir {
        PathBuf::from("..")
    } else {
        PathBuf::from(".")
    }
}

fn resolve_path(root_dir: &Path, path: &Path) -> PathBuf {
    let str_path = path.to_string_lossy();
    if str_path.contains(ROOT_DIR_VAR) {
        let root = root_dir.to_string_lossy();
        return PathBuf::from(str_path.replace(ROOT_DIR_VAR, &root));
    }

    if path.is_relative() {
        root_dir.join(path)
    } else {
        path.to_path_buf()
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert!(cfg.log.is_none());
        assert_eq!(cfg.build.syntax_theme, "default");
        assert_eq!(cfg.build.css_files, ["shared.css", "main.css"]);
        assert!(cfg.build.dump_content_json);
    }

    #[test]
    fn test_paths_resolve_against_root() {
        let cfg = parse_config(r##"
[paths]
root_dir = "/srv/site"
templates_dir = "theme/templates"
output_dir = "/tmp/public"
site_config = "${root_dir}/settings/site.json"

[build]
dump_content_json = false

[log]
level = "Debug"
"##).unwrap();

        let paths = cfg.site_paths();
        assert_eq!(paths.root_dir, PathBuf::from("/srv/site"));
        assert_eq!(paths.templates_dir, PathBuf::from("/srv/site/theme/templates"));
        assert_eq!(paths.content_dir, PathBuf::from("/srv/site/content"));
        assert_eq!(paths.output_dir, PathBuf::from("/tmp/public"));
        assert_eq!(paths.site_config, PathBuf::from("/srv/site/settings/site.json"));
        assert!(!cfg.build.dump_content_json);

        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(log.log_to_console);
        assert!(log.location.is_none());
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[build]\ndump_content_json = \"yes\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
