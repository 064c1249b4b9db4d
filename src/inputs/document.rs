use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// A flat mapping from fully-qualified workflow parameter names
/// (`Namespace.field`) to JSON values.
///
/// Keys are kept sorted so the serialized document is stable and diffable.
/// Layers are merged with [`overlay`](InputDocument::overlay); later layers
/// win.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InputDocument {
    values: BTreeMap<String, Value>,
}

impl InputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bundled parameter template. An empty template yields an
    /// empty document.
    pub fn from_template(template: &str) -> Result<Self> {
        if template.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(InputDocument {
            values: serde_json::from_str(template)?,
        })
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_owned(), value.into());
    }

    /// Append values to a list parameter, creating the list if the key is
    /// absent. Appending to a non-list value is a hard error so a typoed
    /// key cannot silently shadow a scalar.
    pub fn append<I, V>(&mut self, key: &str, items: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let entry = self
            .values
            .entry(key.to_owned())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(list) => {
                list.extend(items.into_iter().map(Into::into));
                Ok(())
            }
            _ => Err(Error::NotAList(key.to_owned())),
        }
    }

    /// Merge another document on top of this one; `other`'s values take
    /// precedence on key collisions.
    pub fn overlay(&mut self, other: InputDocument) {
        self.values.extend(other.values);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Pretty-printed JSON with keys in sorted order.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.values)?)
    }

    /// Serialize the document into `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        info!("Inputs JSON file: {}", path.display());
        fs::write(path, self.to_pretty_json()?)?;
        Ok(())
    }
}
