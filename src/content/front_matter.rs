use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

/// Example of a content file
/// ---
/// title: Robot arm workshop
/// date: 2024-03-10
/// highlight: true
/// ---
///
/// We are building a **robot arm**.
pub struct FrontMatter<'a> {
    pub metadata: Map<String, Value>,
    pub body: &'a str,
}

fn is_boundary(line: &str) -> bool {
    lazy_static! {
        static ref BOUNDARY: Regex = Regex::new(r"^-{3,}\s*$").unwrap();
    }
    BOUNDARY.is_match(line)
}

/// Splits the leading `---` delimited YAML block from the markdown body.
/// Files without a block have empty metadata and the whole text as body.
pub fn parse_front_matter(raw: &str) -> io::Result<FrontMatter<'_>> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let (yaml, body) = match split_block(raw)? {
        Some((yaml, body)) => (yaml, body),
        None => return Ok(FrontMatter { metadata: Map::new(), body: raw }),
    };

    let metadata = parse_metadata(yaml)?;
    Ok(FrontMatter { metadata, body })
}

fn split_block(raw: &str) -> io::Result<Option<(&str, &str)>> {
    let mut lines = raw.split_inclusive('\n');
    let first = match lines.next() {
        Some(line) if is_boundary(line.trim_end_matches(['\r', '\n'])) => line,
        _ => return Ok(None),
    };

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_boundary(line.trim_end_matches(['\r', '\n'])) {
            let yaml = &raw[yaml_start..offset];
            let body = &raw[offset + line.len()..];
            return Ok(Some((yaml, body)));
        }
        offset += line.len();
    }

    Err(io::Error::new(ErrorKind::InvalidData, "End of the front matter block is missing"))
}

fn parse_metadata(yaml: &str) -> io::Result<Map<String, Value>> {
    if yaml.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = match serde_yaml_ng::from_str(yaml) {
        Ok(value) => value,
        Err(e) => return Err(io::Error::new(ErrorKind::InvalidData, format!("Invalid front matter: {}", e))),
    };

    match value {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        other => Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("Front matter must be a mapping, found: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::{MEMBER_DATA, NEWS_DATA};

    use super::*;

    #[test]
    fn test_parse_news() {
        let fm = parse_front_matter(NEWS_DATA).unwrap();
        assert_eq!(fm.metadata["title"], "Robot arm workshop");
        assert_eq!(fm.metadata["date"], "2024-03-10");
        assert_eq!(fm.metadata["highlight"], true);
        assert!(fm.body.starts_with("\nWe are building"));
    }

    #[test]
    fn test_parse_lists() {
        let fm = parse_front_matter(MEMBER_DATA).unwrap();
        assert_eq!(fm.metadata["name"], "Ada Lovelace");
        assert_eq!(fm.metadata["skills"], serde_json::json!(["ROS", "Embedded C"]));
    }

    #[test]
    fn test_no_front_matter() {
        let fm = parse_front_matter("# Just markdown\n\n---\nnot: yaml\n").unwrap();
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "# Just markdown\n\n---\nnot: yaml\n");
    }

    #[test]
    fn test_empty_block() {
        let fm = parse_front_matter("---\n---\nbody").unwrap();
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_crlf_and_bom() {
        let fm = parse_front_matter("\u{feff}---\r\ntitle: Hi\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(fm.metadata["title"], "Hi");
        assert_eq!(fm.body, "body\r\n");
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse_front_matter("---\ntitle: never closed\n").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_front_matter("---\ntitle: [unclosed\n---\nbody").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_not_a_mapping() {
        let err = parse_front_matter("---\n- one\n- two\n---\nbody").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
