//! Entity lump parsing
//!
//! The entity lump is plain text: a sequence of `{ ... }` blocks, one per
//! entity, where every line inside a block is a quoted key/value pair:
//!
//! ```text
//! {
//! "classname" "prop_dynamic"
//! "model" "models/props/crate.mdl"
//! "skin" "1"
//! }
//! ```
//!
//! Keys and values are lower-cased while parsing.

use std::collections::BTreeMap;

use crate::error::{BspError, Result};

/// A single entity from the entity lump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entity {
    properties: BTreeMap<String, String>,
}

impl Entity {
    /// Value of a key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Whether the entity defines a key
    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// The entity's `classname`
    pub fn classname(&self) -> Option<&str> {
        self.get("classname")
    }

    /// Iterate over all key/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of key/value pairs
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the entity has no key/value pairs
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Set a key, replacing any earlier value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }
}

/// Parse entity lump text into entities
///
/// Lines with fewer than two tokens are ignored, and a duplicated key keeps
/// its last value.
pub fn parse_entities(text: &str) -> Result<Vec<Entity>> {
    let mut entities = Vec::new();
    let mut current = Entity::default();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim_matches(|c: char| c.is_whitespace() || c == '\0');
        match line {
            "" | "{" => {}
            "}" => entities.push(std::mem::take(&mut current)),
            _ => {
                let tokens = split_line(&line.to_lowercase()).ok_or_else(|| {
                    BspError::ParseError(format!(
                        "unterminated quote on entity line {}",
                        number + 1
                    ))
                })?;
                if let [key, value, ..] = tokens.as_slice() {
                    current.insert(key.clone(), value.clone());
                }
            }
        }
    }

    Ok(entities)
}

/// Split a line into whitespace separated tokens, honouring double quotes
fn split_line(line: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in line.chars() {
        if quoted {
            if c == '"' {
                quoted = false;
            } else {
                token.push(c);
            }
        } else if c == '"' {
            quoted = true;
            in_token = true;
        } else if c.is_whitespace() {
            if in_token {
                tokens.push(std::mem::take(&mut token));
                in_token = false;
            }
        } else {
            token.push(c);
            in_token = true;
        }
    }

    if quoted {
        return None;
    }
    if in_token {
        tokens.push(token);
    }
    Some(tokens)
}
