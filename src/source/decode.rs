//! Page response decoding
//!
//! Turns a JSON response body into a [`Page`] of [`Post`]s using dot paths
//! for the item array and the next cursor.

use crate::config::ResponseConfig;
use crate::error::FetchError;
use crate::pagination::{Cursor, Page};
use crate::types::Post;
use serde_json::Value;

/// Decoder for page responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDecoder {
    items_path: String,
    cursor_path: String,
    id_field: String,
}

impl Default for PageDecoder {
    fn default() -> Self {
        Self::from_config(&ResponseConfig::default())
    }
}

impl PageDecoder {
    /// Create a decoder from explicit paths
    pub fn new(
        items_path: impl Into<String>,
        cursor_path: impl Into<String>,
        id_field: impl Into<String>,
    ) -> Self {
        Self {
            items_path: items_path.into(),
            cursor_path: cursor_path.into(),
            id_field: id_field.into(),
        }
    }

    /// Create a decoder from the response section of a feed config
    pub fn from_config(config: &ResponseConfig) -> Self {
        Self::new(&config.items_path, &config.cursor_path, &config.id_field)
    }

    /// Decode a response body into a page.
    ///
    /// A missing or null cursor means the feed is exhausted.
    pub fn decode(&self, body: &Value) -> Result<Page<Post>, FetchError> {
        let items = match extract_path(body, &self.items_path) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(FetchError::decode(format!(
                    "expected array at '{}', found {}",
                    self.items_path,
                    type_name(other)
                )))
            }
            None => {
                return Err(FetchError::decode(format!(
                    "missing items at '{}'",
                    self.items_path
                )))
            }
        };

        let posts = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.decode_item(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        let next_cursor = match extract_path(body, &self.cursor_path) {
            None | Some(Value::Null) => Cursor::Exhausted,
            Some(Value::String(token)) => Cursor::from_wire(token.as_str()),
            Some(other) => {
                return Err(FetchError::decode(format!(
                    "expected string cursor at '{}', found {}",
                    self.cursor_path,
                    type_name(other)
                )))
            }
        };

        Ok(Page::new(posts, next_cursor))
    }

    fn decode_item(&self, index: usize, item: &Value) -> Result<Post, FetchError> {
        let id = match item.get(&self.id_field) {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(FetchError::decode(format!(
                    "item {index} has no usable '{}' field",
                    self.id_field
                )))
            }
        };
        Ok(Post::new(id, item.clone()))
    }
}

/// Follow a dot path (`$.data.items`, `data.items[0]`) into a JSON value
fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let mut current = value;

    for part in path.split('.') {
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index = part[bracket_pos + 1..]
                .strip_suffix(']')?
                .parse::<usize>()
                .ok()?;
            if !name.is_empty() {
                current = current.get(name)?;
            }
            current = current.get(index)?;
        } else {
            current = current.get(part)?;
        }
    }

    Some(current)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
