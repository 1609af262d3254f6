use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Raw markdown source of one content file.
pub struct ContentFile {
    pub id: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: &Path) -> io::Result<ContentFile> {
        let id = match Self::file_id(file_path) {
            None => return Err(io::Error::new(ErrorKind::InvalidInput, format!("Could not derive an id from {}", file_path.display()))),
            Some(id) => id,
        };

        let raw_content = fs::read_to_string(file_path)?;

        Ok(ContentFile {
            id,
            file_path: file_path.to_path_buf(),
            raw_content,
        })
    }

    fn file_id(file_path: &Path) -> Option<String> {
        file_path.file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(|stem| stem.to_string())
    }
}

/// Markdown files directly inside `dir`, ordered by file name.
pub fn list_markdown_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = vec![];
    let entries = fs::read_dir(dir)?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().map(|ext| ext == "md").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
