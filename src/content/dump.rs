use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use crate::content::ContentItem;

/// Writes the processed items as pretty printed JSON so other tools can reuse
/// them without parsing markdown again.
pub fn write_content_dump(path: &Path, items: &[ContentItem]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = match serde_json::to_string_pretty(items) {
        Ok(json) => json,
        Err(e) => return Err(io::Error::new(ErrorKind::InvalidData, format!("Error serializing content: {}", e))),
    };
    fs::write(path, json)
}

pub fn read_content_dump(path: &Path) -> io::Result<Vec<ContentItem>> {
    let raw = fs::read_to_string(path)?;
    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidData, format!("Error parsing {}: {}", path.display(), e))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::content::content_type::NEWS;
    use crate::content::loader::ContentLoader;
    use crate::test_data::{NEWS_DATA, UNDATED_DATA};

    use super::*;

    #[test]
    fn test_dump_and_read_back() {
        let root = TempDir::new().unwrap();
        let news_dir = root.path().join("news");
        fs::create_dir_all(&news_dir).unwrap();
        fs::write(news_dir.join("2024-03-10-arm.md"), NEWS_DATA).unwrap();
        fs::write(news_dir.join("untimed.md"), UNDATED_DATA).unwrap();

        let loader = ContentLoader::with_today(root.path(), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        let items = loader.get_all_content(&NEWS);
        assert_eq!(items.len(), 2);

        let dump_path = root.path().join("out/data/news.json");
        write_content_dump(&dump_path, &items).unwrap();
        let read_back = read_content_dump(&dump_path).unwrap();

        assert_eq!(read_back.len(), items.len());
        for (original, reread) in items.iter().zip(read_back.iter()) {
            assert_eq!(original.id, reread.id);
            assert_eq!(original.title, reread.title);
            assert_eq!(original.date, reread.date);
            assert_eq!(original.excerpt, reread.excerpt);
        }
    }

    #[test]
    fn test_read_garbage() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("news.json");
        fs::write(&path, "[{\"id\": 1}]").unwrap();
        assert_eq!(read_content_dump(&path).unwrap_err().kind(), ErrorKind::InvalidData);
    }
}
