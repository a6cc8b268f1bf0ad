//! Persisted settings for shortcut-composer.
//!
//! Settings are kept as a grouped `group -> key -> string` mapping, the same
//! shape the host application uses for its own configuration file. Typed access
//! goes through [`Field`], which parses the raw strings on every read and
//! serializes on every write.
//!
//! Two locations exist: the global one, persisted to
//! `~/.config/shortcut-composer/settings.toml`, and the per-document one, which
//! the host swaps in and out when the active document changes.
//!
//! The store is an explicit object shared as `Arc<ConfigStore>`; every component
//! that needs settings receives it at construction.

pub mod enums;
pub mod field;
pub mod global;
pub mod group;
pub mod values;

pub use enums::{DeadzoneStrategy, EnumValue, RotationDeadzoneStrategy};
pub use field::{DualField, Field};
pub use global::GlobalConfig;
pub use group::FieldGroup;
pub use values::{Color, FieldValue, ListElement};

use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;

use crate::util::{lock, read, write};

/// Raw settings of one location: `group -> key -> serialized value`.
pub type Settings = BTreeMap<String, BTreeMap<String, String>>;

/// A value as it may appear in the settings file.
///
/// Values are written as strings, but hand-edited files may hold bare numbers
/// or booleans; those are kept in their textual form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl FileValue {
    fn into_raw(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
        }
    }
}

type SettingsFile = BTreeMap<String, BTreeMap<String, FileValue>>;

/// Change-notification callback registered on a field or a group.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Where a field keeps its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Location {
    /// Shared by all documents, persisted in the settings file.
    Global,
    /// Stored with the active document.
    Document,
}

/// Errors raised by the settings layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {group}/{name}: {reason}")]
    InvalidValue {
        group: String,
        name: String,
        value: String,
        reason: String,
    },

    #[error("unknown setting {group}/{name}")]
    UnknownField { group: String, name: String },

    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Type-erased description of a field, kept so that settings can be edited and
/// reset by `(group, name)` without knowing the field's Rust type.
#[derive(Clone)]
pub struct FieldSpec {
    pub group: String,
    pub name: String,
    pub location: Location,
    default_raw: String,
    normalize: Arc<dyn Fn(&str) -> Result<String, String> + Send + Sync>,
}

impl FieldSpec {
    pub(crate) fn new<T: FieldValue>(
        group: &str,
        name: &str,
        location: Location,
        default: &T,
    ) -> Self {
        Self {
            group: group.to_string(),
            name: name.to_string(),
            location,
            default_raw: default.to_raw(),
            normalize: Arc::new(|raw: &str| {
                let value = T::from_raw(raw).ok_or_else(|| "could not be parsed".to_string())?;
                value.check()?;
                Ok(value.to_raw())
            }),
        }
    }

    /// Serialized construction default.
    pub fn default_raw(&self) -> &str {
        &self.default_raw
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("group", &self.group)
            .field("name", &self.name)
            .field("location", &self.location)
            .field("default_raw", &self.default_raw)
            .finish_non_exhaustive()
    }
}

type FieldKey = (Location, String, String);

/// Grouped key-value settings store with change callbacks.
pub struct ConfigStore {
    path: Option<PathBuf>,
    global: RwLock<Settings>,
    document: RwLock<Settings>,
    field_callbacks: Mutex<HashMap<(String, String), Vec<Callback>>>,
    group_callbacks: Mutex<HashMap<String, Vec<Callback>>>,
    specs: RwLock<BTreeMap<FieldKey, FieldSpec>>,
    dirty: AtomicBool,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("path", &self.path)
            .field("dirty", &self.dirty.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Creates an empty store that is never written to disk.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self::with_settings(None, Settings::new()))
    }

    fn with_settings(path: Option<PathBuf>, global: Settings) -> Self {
        Self {
            path,
            global: RwLock::new(global),
            document: RwLock::new(Settings::new()),
            field_callbacks: Mutex::new(HashMap::new()),
            group_callbacks: Mutex::new(HashMap::new()),
            specs: RwLock::new(BTreeMap::new()),
            dirty: AtomicBool::new(false),
        }
    }

    /// Returns the default location of the settings file.
    ///
    /// The file is located at `~/.config/shortcut-composer/settings.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("shortcut-composer");
        Ok(config_dir.join("settings.toml"))
    }

    /// Loads settings from `path`, or starts empty if the file does not exist.
    ///
    /// The path is remembered and used by [`ConfigStore::save`].
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub fn load(path: impl Into<PathBuf>) -> Result<Arc<Self>, ConfigError> {
        let path = path.into();

        if !path.exists() {
            info!("Settings file not found, using defaults");
            debug!("Expected settings at: {}", path.display());
            return Ok(Arc::new(Self::with_settings(Some(path), Settings::new())));
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let file: SettingsFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        let settings: Settings = file
            .into_iter()
            .map(|(group, entries)| {
                let entries = entries
                    .into_iter()
                    .map(|(name, value)| (name, value.into_raw()))
                    .collect();
                (group, entries)
            })
            .collect();

        info!("Loaded settings from {}", path.display());
        debug!("{} setting groups", settings.len());
        Ok(Arc::new(Self::with_settings(Some(path), settings)))
    }

    /// Location of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether global settings changed since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Writes global settings to the backing file.
    ///
    /// Creates the parent directory if it doesn't exist. In-memory stores have
    /// nothing to write and succeed immediately.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            debug!("In-memory settings store, nothing to save");
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(&*read(&self.global))?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        self.dirty.store(false, Ordering::Release);
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    fn location(&self, location: Location) -> &RwLock<Settings> {
        match location {
            Location::Global => &self.global,
            Location::Document => &self.document,
        }
    }

    /// Returns the raw string stored under `group/name`.
    pub fn read_raw(&self, location: Location, group: &str, name: &str) -> Option<String> {
        read(self.location(location))
            .get(group)
            .and_then(|entries| entries.get(name))
            .cloned()
    }

    /// Stores a raw string without validation and notifies listeners if it changed.
    pub(crate) fn write_raw(&self, location: Location, group: &str, name: &str, raw: String) {
        let changed = {
            let mut settings = write(self.location(location));
            let entries = settings.entry(group.to_string()).or_default();
            match entries.get(name) {
                Some(previous) if *previous == raw => false,
                _ => {
                    entries.insert(name.to_string(), raw);
                    true
                }
            }
        };

        if changed {
            if location == Location::Global {
                self.dirty.store(true, Ordering::Release);
            }
            self.notify(group, name);
        }
    }

    /// Validates `raw` against the registered field and stores its normalized form.
    ///
    /// Nothing is written when the value is rejected.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownField`] when no field is registered under
    /// `group/name`, and [`ConfigError::InvalidValue`] when the value does not
    /// parse as the field's type.
    pub fn write_checked(
        &self,
        location: Location,
        group: &str,
        name: &str,
        raw: &str,
    ) -> Result<(), ConfigError> {
        let spec = self
            .spec(location, group, name)
            .ok_or_else(|| ConfigError::UnknownField {
                group: group.to_string(),
                name: name.to_string(),
            })?;

        let normalized = (spec.normalize)(raw).map_err(|reason| ConfigError::InvalidValue {
            group: group.to_string(),
            name: name.to_string(),
            value: raw.to_string(),
            reason,
        })?;

        self.write_raw(location, group, name, normalized);
        Ok(())
    }

    pub(crate) fn register_spec(&self, spec: FieldSpec) {
        let key = (spec.location, spec.group.clone(), spec.name.clone());
        write(&self.specs).insert(key, spec);
    }

    /// Looks up a registered field description.
    pub fn spec(&self, location: Location, group: &str, name: &str) -> Option<FieldSpec> {
        read(&self.specs)
            .get(&(location, group.to_string(), name.to_string()))
            .cloned()
    }

    /// All registered field descriptions, ordered by location, group and name.
    pub fn specs(&self) -> Vec<FieldSpec> {
        read(&self.specs).values().cloned().collect()
    }

    /// Registers a callback fired whenever `group/name` changes in any location.
    pub fn register_callback(&self, group: &str, name: &str, callback: Callback) {
        lock(&self.field_callbacks)
            .entry((group.to_string(), name.to_string()))
            .or_default()
            .push(callback);
    }

    /// Registers a callback fired whenever any field of `group` changes.
    pub fn register_group_callback(&self, group: &str, callback: Callback) {
        lock(&self.group_callbacks)
            .entry(group.to_string())
            .or_default()
            .push(callback);
    }

    fn notify(&self, group: &str, name: &str) {
        // Callbacks may read the store, so no lock is held while they run.
        let mut callbacks: Vec<Callback> = lock(&self.field_callbacks)
            .get(&(group.to_string(), name.to_string()))
            .cloned()
            .unwrap_or_default();
        if let Some(group_callbacks) = lock(&self.group_callbacks).get(group) {
            callbacks.extend(group_callbacks.iter().cloned());
        }

        for callback in callbacks {
            callback();
        }
    }

    /// Resets every registered global field (optionally only one group) to its default.
    ///
    /// Defaults overridden with [`Field::set_default`] are honoured.
    pub fn reset_defaults(&self, group: Option<&str>) {
        let specs: Vec<FieldSpec> = self
            .specs()
            .into_iter()
            .filter(|spec| spec.location == Location::Global)
            .filter(|spec| group.is_none_or(|group| spec.group == group))
            .collect();

        for spec in specs {
            let default = self
                .read_raw(
                    Location::Global,
                    &spec.group,
                    &field::default_key(&spec.name),
                )
                .unwrap_or_else(|| spec.default_raw.clone());
            self.write_raw(Location::Global, &spec.group, &spec.name, default);
        }
        info!(
            "Reset {} to defaults",
            group.map_or_else(|| "all settings".to_string(), |g| format!("group '{g}'"))
        );
    }

    /// Copy of the raw settings of one location.
    pub fn snapshot(&self, location: Location) -> Settings {
        read(self.location(location)).clone()
    }

    /// Replaces the per-document settings, returning the previous ones.
    ///
    /// Called by the host when the active document changes. Every key present in
    /// either the old or the new settings is reported as changed.
    pub fn swap_document(&self, settings: Settings) -> Settings {
        let previous = std::mem::replace(&mut *write(&self.document), settings);
        let current = self.snapshot(Location::Document);

        let mut touched: Vec<(String, String)> = Vec::new();
        for source in [&previous, &current] {
            for (group, entries) in source {
                for name in entries.keys() {
                    let key = (group.clone(), name.clone());
                    if !touched.contains(&key) {
                        touched.push(key);
                    }
                }
            }
        }
        for (group, name) in touched {
            self.notify(&group, &name);
        }

        if !previous.is_empty() {
            debug!("Swapped out {} document setting groups", previous.len());
        }
        previous
    }

    /// Removes a stored value so that the field falls back to its default.
    pub fn remove(&self, location: Location, group: &str, name: &str) {
        let removed = write(self.location(location))
            .get_mut(group)
            .and_then(|entries| entries.remove(name))
            .is_some();
        if removed {
            if location == Location::Global {
                self.dirty.store(true, Ordering::Release);
            }
            self.notify(group, name);
        } else {
            warn!("No stored value for {group}/{name}");
        }
    }
}

#[cfg(test)]
mod tests;
