//! Todo record type

use serde::{Deserialize, Deserializer, Serialize};

/// A single todo item.
///
/// All fields default when absent from JSON, so a partial body such as
/// `{"done": true}` decodes with empty strings for the missing fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Todo {
    /// Store-assigned identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "msg", deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub done: bool,
}

/// Decode an explicit JSON `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Todo {
    /// Create an unsaved todo (empty id, not done)
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            message: message.into(),
            done: false,
        }
    }

    /// Set the id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the done flag
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}
