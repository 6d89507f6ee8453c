//! Plugin section lookup and decoding
//!
//! Plugins find their settings under `[plugins."<key>"]`. In version 2
//! documents the key is the plugin's full `<type>.<id>` URI; legacy
//! documents (no version, or version 1) key sections by the bare id.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::document::Config;
use crate::{Error, Result};

/// A plugin's identity as supplied by the plugin registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Registration {
    /// Plugin type, e.g. `io.containerd.grpc.v1`
    pub plugin_type: String,
    /// Plugin id within its type, e.g. `cri`
    pub id: String,
}

impl Registration {
    pub fn new(plugin_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            plugin_type: plugin_type.into(),
            id: id.into(),
        }
    }

    /// The fully qualified `<type>.<id>` name, or the bare id if the type is empty.
    pub fn uri(&self) -> String {
        if self.plugin_type.is_empty() {
            self.id.clone()
        } else {
            format!("{}.{}", self.plugin_type, self.id)
        }
    }
}

/// Derive the `plugins` key for `registration` under schema `version`.
///
/// `version` is an effective version; pass [`Config::effective_version`].
///
/// ```
/// use plugd_config::{Registration, plugin_key};
///
/// let cri = Registration::new("io.containerd.grpc.v1", "cri");
/// assert_eq!(plugin_key(2, &cri), "io.containerd.grpc.v1.cri");
/// assert_eq!(plugin_key(1, &cri), "cri");
/// ```
pub fn plugin_key(version: i64, registration: &Registration) -> String {
    if version >= 2 {
        registration.uri()
    } else {
        registration.id.clone()
    }
}

impl Config {
    /// The raw section configured for `registration`, if any.
    pub fn plugin_section(&self, registration: &Registration) -> Option<&Value> {
        self.plugins
            .get(&plugin_key(self.effective_version(), registration))
    }

    /// Decode the section configured for `registration` onto `target`.
    ///
    /// The section is laid over the current value of `target`: fields the
    /// section names are replaced, nested tables are overlaid key by key,
    /// and everything the section omits keeps its pre-set value. Map
    /// targets such as `serde_json::Map<String, Value>` gain the section's
    /// entries alongside the ones they already hold.
    ///
    /// Returns `Ok(false)` and leaves `target` untouched when no section is
    /// configured; the plugin should then run with its defaults. On a shape
    /// mismatch `target` is also left untouched.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] naming the section key if the section does not fit
    /// `T`.
    pub fn decode<T>(&self, registration: &Registration, target: &mut T) -> Result<bool>
    where
        T: Serialize + DeserializeOwned,
    {
        let key = plugin_key(self.effective_version(), registration);
        let Some(section) = self.plugins.get(&key) else {
            tracing::trace!(%key, "No plugin section configured");
            return Ok(false);
        };

        let decode_error = |message: String| Error::Decode {
            key: key.clone(),
            message,
        };
        let mut current = serde_json::to_value(&*target).map_err(|e| decode_error(e.to_string()))?;
        overlay_value(&mut current, section);

        *target = T::deserialize(current).map_err(|e| decode_error(e.to_string()))?;
        tracing::trace!(%key, "Decoded plugin section");
        Ok(true)
    }
}

/// Lay `section` over `current`, descending into tables present in both.
fn overlay_value(current: &mut Value, section: &Value) {
    match (current, section) {
        (Value::Object(current), Value::Object(section)) => {
            for (name, value) in section {
                match current.get_mut(name) {
                    Some(existing) => overlay_value(existing, value),
                    None => {
                        current.insert(name.clone(), value.clone());
                    }
                }
            }
        }
        (current, section) => *current = section.clone(),
    }
}
