//! Boundary parsers for multi-value project fields.
//!
//! Projects store `tech`, `tags` and `images` as ordered lists. Older rows and
//! clients send them as delimited strings: `tech` comma-separated, `tags`
//! pipe-separated, and `images` either a JSON array encoded in a string or a
//! comma-separated string. These helpers accept every one of those shapes.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    List(Vec<String>),
    Text(String),
}

pub const TECH_DELIMITER: char = ',';
pub const TAG_DELIMITER: char = '|';
pub const IMAGE_DELIMITER: char = ',';

/// Splits on `delimiter`, trimming entries and dropping empty ones.
pub fn split_list(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `images` accepts a JSON array encoded as a string before falling back to commas.
pub fn parse_images(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
            return clean(list);
        }
    }
    split_list(trimmed, IMAGE_DELIMITER)
}

fn clean(list: Vec<String>) -> Vec<String> {
    list.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn deserialize_with<'de, D>(deserializer: D, parse: fn(&str) -> Vec<String>) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawList>::deserialize(deserializer)? {
        Some(RawList::List(list)) => clean(list),
        Some(RawList::Text(text)) => parse(&text),
        None => Vec::new(),
    })
}

pub fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_with(deserializer, |raw| split_list(raw, TECH_DELIMITER))
}

pub fn pipe_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_with(deserializer, |raw| split_list(raw, TAG_DELIMITER))
}

pub fn image_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_with(deserializer, parse_images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "comma_list")]
        tech: Vec<String>,
        #[serde(default, deserialize_with = "pipe_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "image_list")]
        images: Vec<String>,
    }

    #[test]
    fn delimited_strings_are_split() {
        let fields: Fields = serde_json::from_value(serde_json::json!({
            "tech": "Rust, Actix ,,SQL",
            "tags": "web|cli | ",
            "images": "a.png, b.png"
        }))
        .unwrap();

        assert_eq!(fields.tech, vec!["Rust", "Actix", "SQL"]);
        assert_eq!(fields.tags, vec!["web", "cli"]);
        assert_eq!(fields.images, vec!["a.png", "b.png"]);
    }

    #[test]
    fn arrays_and_nulls_are_accepted() {
        let fields: Fields = serde_json::from_value(serde_json::json!({
            "tech": ["Rust", " "],
            "tags": null
        }))
        .unwrap();

        assert_eq!(fields.tech, vec!["Rust"]);
        assert!(fields.tags.is_empty());
        assert!(fields.images.is_empty());
    }

    #[test]
    fn images_accept_json_encoded_string() {
        assert_eq!(parse_images(r#"["x.jpg","y.jpg"]"#), vec!["x.jpg", "y.jpg"]);
        // not valid JSON, so the bracket is treated as part of a comma list
        assert_eq!(parse_images("[x.jpg, y.jpg"), vec!["[x.jpg", "y.jpg"]);
    }
}
