//! Fields sharing one settings group.

use std::sync::Arc;

use super::{Callback, ConfigStore, DualField, Field, FieldValue};

/// Factory for fields stored under the same group name.
#[derive(Debug, Clone)]
pub struct FieldGroup {
    store: Arc<ConfigStore>,
    name: String,
}

impl FieldGroup {
    pub fn new(store: &Arc<ConfigStore>, name: impl Into<String>) -> Self {
        Self {
            store: Arc::clone(store),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Creates a global field in this group.
    pub fn field<T: FieldValue>(&self, name: &str, default: T) -> Field<T> {
        Field::new(&self.store, &self.name, name, default)
    }

    /// Creates a field stored with the active document.
    pub fn local_field<T: FieldValue>(&self, name: &str, default: T) -> Field<T> {
        Field::local(&self.store, &self.name, name, default)
    }

    /// Creates a field whose location follows `save_local`.
    pub fn dual_field<T: FieldValue>(
        &self,
        name: &str,
        default: T,
        save_local: &Field<bool>,
    ) -> DualField<T> {
        DualField::new(&self.store, &self.name, name, default, save_local.clone())
    }

    /// Resets every global field of the group to its default.
    pub fn reset_defaults(&self) {
        self.store.reset_defaults(Some(&self.name));
    }

    /// Registers a callback fired when any field of the group changes.
    pub fn register_callback(&self, callback: impl Fn() + Send + Sync + 'static) {
        let callback: Callback = Arc::new(callback);
        self.store.register_group_callback(&self.name, callback);
    }
}
