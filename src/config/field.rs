//! Typed access to persisted settings.

use log::warn;
use std::fmt;
use std::sync::{Arc, Weak};

use super::{Callback, ConfigError, ConfigStore, FieldSpec, FieldValue, Location};

/// Key under which an overridden default of `name` is persisted.
pub(crate) fn default_key(name: &str) -> String {
    format!("{name} (default)")
}

/// A named, typed value persisted in a [`ConfigStore`].
///
/// Reads parse the stored string on every call, so changes made elsewhere (the
/// CLI, another action sharing the group) are always visible. A missing or
/// malformed stored value falls back to the default.
#[derive(Clone)]
pub struct Field<T: FieldValue> {
    store: Arc<ConfigStore>,
    group: String,
    name: String,
    default: T,
    location: Location,
}

impl<T: FieldValue> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("group", &self.group)
            .field("name", &self.name)
            .field("default", &self.default)
            .field("location", &self.location)
            .finish()
    }
}

impl<T: FieldValue> Field<T> {
    /// Creates a global field and registers it with the store.
    pub fn new(store: &Arc<ConfigStore>, group: &str, name: &str, default: T) -> Self {
        Self::with_location(store, group, name, default, Location::Global)
    }

    /// Creates a field stored with the active document.
    pub fn local(store: &Arc<ConfigStore>, group: &str, name: &str, default: T) -> Self {
        Self::with_location(store, group, name, default, Location::Document)
    }

    pub fn with_location(
        store: &Arc<ConfigStore>,
        group: &str,
        name: &str,
        default: T,
        location: Location,
    ) -> Self {
        store.register_spec(FieldSpec::new(group, name, location, &default));
        Self {
            store: Arc::clone(store),
            group: group.to_string(),
            name: name.to_string(),
            default,
            location,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Current value, or the default when nothing valid is stored.
    pub fn read(&self) -> T {
        match self.store.read_raw(self.location, &self.group, &self.name) {
            None => self.default(),
            Some(raw) => T::from_raw(&raw).unwrap_or_else(|| {
                warn!(
                    "Malformed value '{}' for {}/{}, using default",
                    raw, self.group, self.name
                );
                self.default()
            }),
        }
    }

    /// Stores `value`. Listeners are notified only if the stored text changes.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when the value cannot be represented
    /// faithfully (for example a list element containing the separator). Nothing
    /// is written in that case.
    pub fn write(&self, value: T) -> Result<(), ConfigError> {
        value.check().map_err(|reason| ConfigError::InvalidValue {
            group: self.group.clone(),
            name: self.name.clone(),
            value: format!("{value:?}"),
            reason,
        })?;

        if self.store.read_raw(self.location, &self.group, &self.name).is_none()
            && value == self.default()
        {
            return Ok(());
        }
        self.store
            .write_raw(self.location, &self.group, &self.name, value.to_raw());
        Ok(())
    }

    /// Parses and stores a raw string, rejecting it without writing when malformed.
    pub fn write_raw(&self, raw: &str) -> Result<(), ConfigError> {
        let value = T::from_raw(raw).ok_or_else(|| ConfigError::InvalidValue {
            group: self.group.clone(),
            name: self.name.clone(),
            value: raw.to_string(),
            reason: "could not be parsed".to_string(),
        })?;
        self.write(value)
    }

    /// The default value: a persisted override if one was set, else the
    /// construction default.
    pub fn default(&self) -> T {
        self.store
            .read_raw(self.location, &self.group, &default_key(&self.name))
            .and_then(|raw| T::from_raw(&raw))
            .unwrap_or_else(|| self.default.clone())
    }

    /// Persists a new default, leaving the current value alone.
    pub fn set_default(&self, value: T) -> Result<(), ConfigError> {
        value.check().map_err(|reason| ConfigError::InvalidValue {
            group: self.group.clone(),
            name: default_key(&self.name),
            value: format!("{value:?}"),
            reason,
        })?;
        self.store.write_raw(
            self.location,
            &self.group,
            &default_key(&self.name),
            value.to_raw(),
        );
        Ok(())
    }

    /// Writes the default back as the current value.
    pub fn reset_default(&self) -> Result<(), ConfigError> {
        self.write(self.default())
    }

    /// Registers a callback fired whenever the stored value changes.
    pub fn register_callback(&self, callback: impl Fn() + Send + Sync + 'static) {
        let callback: Callback = Arc::new(callback);
        self.store
            .register_callback(&self.group, &self.name, callback);
    }

    /// Registers a callback receiving the new value whenever it changes.
    ///
    /// The callback holds the store weakly, so the store is not kept alive by
    /// its own callback table.
    pub fn on_change(&self, callback: impl Fn(T) + Send + Sync + 'static) {
        let weak = self.downgrade();
        self.register_callback(move || {
            if let Some(field) = weak.upgrade() {
                callback(field.read());
            }
        });
    }

    fn downgrade(&self) -> WeakField<T> {
        WeakField {
            store: Arc::downgrade(&self.store),
            group: self.group.clone(),
            name: self.name.clone(),
            default: self.default.clone(),
            location: self.location,
        }
    }
}

struct WeakField<T: FieldValue> {
    store: Weak<ConfigStore>,
    group: String,
    name: String,
    default: T,
    location: Location,
}

impl<T: FieldValue> WeakField<T> {
    fn upgrade(&self) -> Option<Field<T>> {
        Some(Field {
            store: self.store.upgrade()?,
            group: self.group.clone(),
            name: self.name.clone(),
            default: self.default.clone(),
            location: self.location,
        })
    }
}

/// A value kept both globally and per document; `save_local` picks which one
/// is active.
#[derive(Debug, Clone)]
pub struct DualField<T: FieldValue> {
    global: Field<T>,
    local: Field<T>,
    save_local: Field<bool>,
}

impl<T: FieldValue> DualField<T> {
    pub fn new(
        store: &Arc<ConfigStore>,
        group: &str,
        name: &str,
        default: T,
        save_local: Field<bool>,
    ) -> Self {
        Self {
            global: Field::new(store, group, name, default.clone()),
            local: Field::local(store, group, name, default),
            save_local,
        }
    }

    fn active(&self) -> &Field<T> {
        if self.save_local.read() {
            &self.local
        } else {
            &self.global
        }
    }

    pub fn read(&self) -> T {
        self.active().read()
    }

    pub fn write(&self, value: T) -> Result<(), ConfigError> {
        self.active().write(value)
    }

    /// Default of the global field; the local one follows it.
    pub fn default(&self) -> T {
        self.global.default()
    }

    pub fn set_default(&self, value: T) -> Result<(), ConfigError> {
        self.global.set_default(value)
    }

    pub fn reset_default(&self) -> Result<(), ConfigError> {
        self.write(self.global.default())
    }

    /// Writes every new value of `source` into this field.
    ///
    /// Like [`Field::on_change`], the callback does not keep the store alive.
    pub fn follow(&self, source: &Field<T>) {
        let weak = self.downgrade();
        let (group, name) = (source.group().to_string(), source.name().to_string());
        source.on_change(move |value| {
            let Some(target) = weak.upgrade() else {
                return;
            };
            if let Err(err) = target.write(value) {
                warn!("Failed to follow {group}/{name}: {err}");
            }
        });
    }

    fn downgrade(&self) -> WeakDualField<T> {
        WeakDualField {
            global: self.global.downgrade(),
            local: self.local.downgrade(),
            save_local: self.save_local.downgrade(),
        }
    }

    /// Registers the callback on both locations and on the locality switch.
    pub fn register_callback(&self, callback: impl Fn() + Send + Sync + 'static) {
        let callback = Arc::new(callback);
        // Store callbacks fire for both locations of a key.
        let on_value = Arc::clone(&callback);
        self.global.register_callback(move || on_value());
        self.save_local.register_callback(move || callback());
    }
}

struct WeakDualField<T: FieldValue> {
    global: WeakField<T>,
    local: WeakField<T>,
    save_local: WeakField<bool>,
}

impl<T: FieldValue> WeakDualField<T> {
    fn upgrade(&self) -> Option<DualField<T>> {
        Some(DualField {
            global: self.global.upgrade()?,
            local: self.local.upgrade()?,
            save_local: self.save_local.upgrade()?,
        })
    }
}
