//! Types for deployment manifests.
//!
//! This module defines the manifest document, its application entries, and
//! the errors raised while reading, writing, or editing them.

use std::io;

use serde::de;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// URL template used when an application declares none.
pub const DEFAULT_URL: &str = "${name}.${target-base}";

/// Memory reservation used when neither the application nor its framework declares one.
pub const DEFAULT_MEM: &str = "128M";

/// Instance count used when an application declares none.
pub const DEFAULT_INSTANCES: u64 = 1;

/// Errors that can occur while loading, saving, or editing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// The manifest file could not be read.
  #[error("failed to read manifest: {0}")]
  Read(#[source] io::Error),

  /// The manifest is not valid YAML or does not have the expected shape.
  #[error("failed to parse manifest: {0}")]
  Parse(#[source] serde_yaml::Error),

  /// The manifest could not be serialized.
  #[error("failed to serialize manifest: {0}")]
  Serialize(#[source] serde_yaml::Error),

  /// The manifest file could not be written.
  #[error("failed to write manifest: {0}")]
  Write(#[source] io::Error),

  /// An edit supplied a value of the wrong shape for a typed field.
  #[error("invalid value for '{field}': {reason}")]
  InvalidField { field: String, reason: String },
}

/// One application's declared configuration.
///
/// Only `name` and `depends-on` are interpreted. Every other key (framework,
/// memory, instances, services, ...) is kept verbatim in `extra` and written
/// back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppEntry {
  /// Application name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,

  /// Relative paths of the applications this one depends on, in declared order.
  #[serde(
    rename = "depends-on",
    alias = "depends_on",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub depends_on: Option<Vec<String>>,

  /// All remaining keys, opaque to target selection.
  #[serde(flatten)]
  pub extra: Mapping,
}

impl AppEntry {
  /// Create an entry with just a name.
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
      ..Self::default()
    }
  }

  /// Declared dependencies, empty when `depends-on` is absent.
  pub fn depends_on(&self) -> &[String] {
    self.depends_on.as_deref().unwrap_or_default()
  }

  /// Look up a nested key among the opaque fields.
  pub fn get(&self, keys: &[&str]) -> Option<&Value> {
    let (first, rest) = keys.split_first()?;
    let mut current = self.extra.get(*first)?;
    for key in rest {
      current = current.get(*key)?;
    }
    Some(current)
  }

  /// Memory reservation: `mem`, then `framework.info.mem`, then [`DEFAULT_MEM`].
  pub fn mem(&self) -> &str {
    self
      .get(&["mem"])
      .and_then(Value::as_str)
      .or_else(|| self.get(&["framework", "info", "mem"]).and_then(Value::as_str))
      .unwrap_or(DEFAULT_MEM)
  }

  /// Instance count, [`DEFAULT_INSTANCES`] when absent.
  pub fn instances(&self) -> u64 {
    self
      .get(&["instances"])
      .and_then(Value::as_u64)
      .unwrap_or(DEFAULT_INSTANCES)
  }

  /// URL template, [`DEFAULT_URL`] when absent.
  pub fn url(&self) -> &str {
    self.get(&["url"]).and_then(Value::as_str).unwrap_or(DEFAULT_URL)
  }

  /// True when the entry declares nothing at all.
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.depends_on.is_none() && self.extra.is_empty()
  }

  /// Set a nested key, creating intermediate mappings as needed.
  ///
  /// `name` and `depends-on` update the typed fields and reject values of
  /// the wrong shape. A null `name` or `depends-on` clears the field.
  pub fn set(&mut self, keys: &[&str], value: Value) -> Result<(), ManifestError> {
    match keys {
      [] => Err(ManifestError::InvalidField {
        field: String::new(),
        reason: "key path cannot be empty".to_string(),
      }),
      ["name"] => {
        self.name = match value {
          Value::Null => None,
          Value::String(name) => Some(name),
          other => {
            return Err(ManifestError::InvalidField {
              field: "name".to_string(),
              reason: format!("expected a string, got {}", describe(&other)),
            });
          }
        };
        Ok(())
      }
      ["depends-on"] | ["depends_on"] => {
        self.depends_on = serde_yaml::from_value(value).map_err(|e| ManifestError::InvalidField {
          field: "depends-on".to_string(),
          reason: e.to_string(),
        })?;
        Ok(())
      }
      [first, rest @ ..] => {
        let slot = self.extra.entry(Value::from(*first)).or_insert(Value::Null);
        set_nested(slot, rest, value);
        Ok(())
      }
    }
  }
}

/// Write `value` at `keys` below `slot`. A non-mapping value on the way is
/// replaced with a mapping.
fn set_nested(slot: &mut Value, keys: &[&str], value: Value) {
  let Some((first, rest)) = keys.split_first() else {
    *slot = value;
    return;
  };

  if let Value::Mapping(map) = slot {
    let child = map.entry(Value::from(*first)).or_insert(Value::Null);
    set_nested(child, rest, value);
  } else {
    let mut child = Value::Null;
    set_nested(&mut child, rest, value);
    let mut map = Mapping::new();
    map.insert(Value::from(*first), child);
    *slot = Value::Mapping(map);
  }
}

fn describe(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Sequence(_) => "a sequence",
    Value::Mapping(_) => "a mapping",
    Value::Tagged(_) => "a tagged value",
  }
}

/// The application mapping of a manifest.
///
/// Keys are paths relative to the manifest file's directory. Declared order
/// is preserved through parsing and serialization because it decides which
/// application a nested path matches and how unrelated applications are
/// ordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Applications(Vec<(String, AppEntry)>);

impl Applications {
  /// Create an empty application mapping.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Iterate entries in declared order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &AppEntry)> {
    self.0.iter().map(|(key, entry)| (key.as_str(), entry))
  }

  /// Get an entry by its exact key.
  pub fn get(&self, key: &str) -> Option<&AppEntry> {
    self.0.iter().find(|(k, _)| k == key).map(|(_, entry)| entry)
  }

  /// Insert or replace an entry. A replaced entry keeps its position.
  pub fn insert(&mut self, key: impl Into<String>, entry: AppEntry) -> Option<AppEntry> {
    let key = key.into();
    match self.0.iter().position(|(k, _)| *k == key) {
      Some(idx) => Some(std::mem::replace(&mut self.0[idx].1, entry)),
      None => {
        self.0.push((key, entry));
        None
      }
    }
  }

  /// Get an entry for editing, appending an empty one if the key is new.
  pub fn get_or_insert_default(&mut self, key: &str) -> &mut AppEntry {
    let idx = match self.0.iter().position(|(k, _)| k == key) {
      Some(idx) => idx,
      None => {
        self.0.push((key.to_string(), AppEntry::default()));
        self.0.len() - 1
      }
    };
    &mut self.0[idx].1
  }
}

impl FromIterator<(String, AppEntry)> for Applications {
  fn from_iter<I: IntoIterator<Item = (String, AppEntry)>>(iter: I) -> Self {
    let mut apps = Self::new();
    for (key, entry) in iter {
      apps.insert(key, entry);
    }
    apps
  }
}

impl Serialize for Applications {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.0.len()))?;
    for (key, entry) in &self.0 {
      map.serialize_entry(key, entry)?;
    }
    map.end()
  }
}

/// Read through `serde_yaml::Mapping`, which keeps document order and
/// rejects duplicate keys, then type each entry. A null entry is empty.
impl<'de> Deserialize<'de> for Applications {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let mapping = Mapping::deserialize(deserializer)?;
    let mut apps = Vec::with_capacity(mapping.len());
    for (key, entry) in mapping {
      let key = match key {
        Value::String(key) => key,
        other => {
          return Err(de::Error::custom(format!(
            "application path must be a string, got {}",
            describe(&other)
          )));
        }
      };
      let entry = match entry {
        Value::Null => AppEntry::default(),
        other => serde_yaml::from_value(other).map_err(de::Error::custom)?,
      };
      apps.push((key, entry));
    }
    Ok(Applications(apps))
  }
}

/// A deployment manifest.
///
/// A multi-application manifest carries an `applications` mapping. Without
/// one, the top-level fields describe a single standalone application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub applications: Option<Applications>,

  /// Top-level application fields, used when there is no `applications` mapping.
  #[serde(flatten)]
  pub app: AppEntry,
}

impl Manifest {
  /// Parse a manifest from YAML text. Blank text is an empty manifest.
  pub fn from_yaml(text: &str) -> Result<Self, ManifestError> {
    if text.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(text).map_err(ManifestError::Parse)
  }

  /// Serialize the manifest to YAML text.
  pub fn to_yaml(&self) -> Result<String, ManifestError> {
    serde_yaml::to_string(self).map_err(ManifestError::Serialize)
  }

  /// The application mapping, if this is a multi-application manifest.
  pub fn applications(&self) -> Option<&Applications> {
    self.applications.as_ref()
  }

  /// Set a nested field of one application, creating the application if needed.
  pub fn set_app_field(&mut self, app: &str, keys: &[&str], value: Value) -> Result<(), ManifestError> {
    self
      .applications
      .get_or_insert_with(Applications::new)
      .get_or_insert_default(app)
      .set(keys, value)
  }
}
