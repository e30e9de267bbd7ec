//! Property providers.
//!
//! A [`Provider`] is the flat set of named values one scene entity exposes
//! (a material's colors and maps, a geometry's buffers). Values live in a
//! [`SlotArena`], so a slot can be referenced by a [`PropertyHandle`] that
//! observes later in-place writes and detects structural invalidation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::arena::{SlotArena, SlotKey};
use super::error::{DataError, DataResult};
use super::handle::PropertyHandle;
use super::value::{Property, PropertyValue};

/// A provider shared between its owning entity and the containers it is
/// registered with.
pub type SharedProvider = Arc<RwLock<Provider>>;

/// Process-unique provider identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderId(u64);

impl ProviderId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Named, typed values owned by one scene entity.
#[derive(Debug)]
pub struct Provider {
    id: ProviderId,
    uuid: String,
    slots: SlotArena<PropertyValue>,
    names: HashMap<String, SlotKey>,
}

impl Provider {
    /// Create an empty provider with a random uuid.
    pub fn new() -> Self {
        Self::with_uuid(uuid::Uuid::new_v4().to_string())
    }

    /// Create an empty provider with an explicit uuid.
    ///
    /// The uuid addresses the provider inside a container collection, as in
    /// `geometry[<uuid>].indices`.
    pub fn with_uuid(uuid: impl Into<String>) -> Self {
        Self {
            id: ProviderId::next(),
            uuid: uuid.into(),
            slots: SlotArena::new(),
            names: HashMap::new(),
        }
    }

    /// Wrap into a [`SharedProvider`].
    pub fn into_shared(self) -> SharedProvider {
        Arc::new(RwLock::new(self))
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with<T: Property>(mut self, name: impl Into<String>, value: T) -> Self {
        self.set(name, value);
        self
    }

    /// Process-unique id.
    pub fn id(&self) -> ProviderId {
        self.id
    }

    /// Uuid used for collection addressing.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Store a typed value.
    pub fn set<T: Property>(&mut self, name: impl Into<String>, value: T) {
        self.set_value(name, value.into_value());
    }

    /// Store a value.
    ///
    /// A value of the same kind as the current one is written in place and
    /// existing handles observe it. A value of another kind replaces the
    /// slot, and existing handles become stale.
    pub fn set_value(&mut self, name: impl Into<String>, value: PropertyValue) {
        let name = name.into();

        if let Some(&key) = self.names.get(&name) {
            if let Some(current) = self.slots.get_mut(key) {
                if current.same_kind(&value) {
                    *current = value;
                    return;
                }
            }
            log::trace!("Provider {}: retyping `{}`", self.uuid, name);
            self.slots.remove(key);
        }

        let key = self.slots.insert(value);
        self.names.insert(name, key);
    }

    /// Remove a value, invalidating handles to it.
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        let key = self.names.remove(name)?;
        self.slots.remove(key)
    }

    /// Whether a value is stored under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// The raw value stored under `name`.
    pub fn value(&self, name: &str) -> Option<&PropertyValue> {
        self.names.get(name).and_then(|&key| self.slots.get(key))
    }

    /// Typed lookup.
    pub fn get<T: Property>(&self, name: &str) -> DataResult<T> {
        let value = self
            .value(name)
            .ok_or_else(|| DataError::missing(name, T::TYPE_NAME))?;
        T::from_value(value)
            .ok_or_else(|| DataError::mismatch(name, T::TYPE_NAME, value.type_name()))
    }

    /// Slot currently backing `name`.
    pub fn slot(&self, name: &str) -> Option<SlotKey> {
        self.names.get(name).copied()
    }

    /// Value stored in a slot, or `None` if the slot was retired.
    pub fn slot_value(&self, key: SlotKey) -> Option<&PropertyValue> {
        self.slots.get(key)
    }

    /// Names of all stored values.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the provider stores nothing.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resolve a typed handle to `name` inside a shared provider.
    ///
    /// `display_name` is the fully qualified name reported by errors.
    pub fn handle<T: Property>(
        shared: &SharedProvider,
        name: &str,
        display_name: &str,
    ) -> DataResult<PropertyHandle<T>> {
        let provider = shared.read();
        let key = provider
            .slot(name)
            .ok_or_else(|| DataError::missing(display_name, T::TYPE_NAME))?;
        let value = provider
            .slot_value(key)
            .ok_or_else(|| DataError::missing(display_name, T::TYPE_NAME))?;
        if T::from_value(value).is_none() {
            return Err(DataError::mismatch(
                display_name,
                T::TYPE_NAME,
                value.type_name(),
            ));
        }
        Ok(PropertyHandle::new(
            Arc::downgrade(shared),
            key,
            display_name,
        ))
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;

    #[test]
    fn test_set_and_get() {
        let provider = Provider::with_uuid("m1")
            .with("diffuseColor", Vec4::new(1.0, 0.0, 0.0, 1.0))
            .with("shininess", 8.0f32);

        assert_eq!(provider.uuid(), "m1");
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.get::<f32>("shininess").unwrap(), 8.0);
        assert_eq!(
            provider.get::<Vec4>("diffuseColor").unwrap(),
            Vec4::new(1.0, 0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_get_missing_and_mismatched() {
        let provider = Provider::new().with("shininess", 8.0f32);

        assert_eq!(
            provider.get::<f32>("alpha").unwrap_err(),
            DataError::missing("alpha", "float1")
        );
        assert_eq!(
            provider.get::<i32>("shininess").unwrap_err(),
            DataError::mismatch("shininess", "int1", "float1")
        );
    }

    #[test]
    fn test_same_kind_write_keeps_slot() {
        let mut provider = Provider::new().with("alpha", 0.5f32);
        let before = provider.slot("alpha").unwrap();
        provider.set("alpha", 0.25f32);
        assert_eq!(provider.slot("alpha"), Some(before));
        assert_eq!(provider.get::<f32>("alpha").unwrap(), 0.25);
    }

    #[test]
    fn test_retype_replaces_slot() {
        let mut provider = Provider::new().with("alpha", 0.5f32);
        let before = provider.slot("alpha").unwrap();
        provider.set("alpha", true);
        assert!(provider.slot_value(before).is_none());
        assert!(provider.get::<bool>("alpha").unwrap());
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut provider = Provider::new().with("alpha", 0.5f32);
        assert_eq!(provider.remove("alpha"), Some(PropertyValue::Float(0.5)));
        assert!(!provider.has("alpha"));
        assert!(provider.is_empty());
        assert!(provider.remove("alpha").is_none());
    }

    #[test]
    fn test_default_uuids_are_distinct() {
        let a = Provider::new();
        let b = Provider::new();
        assert_ne!(a.uuid(), b.uuid());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_handle_type_check() {
        let shared = Provider::new().with("alpha", 0.5f32).into_shared();
        assert!(Provider::handle::<f32>(&shared, "alpha", "alpha").is_ok());
        assert_eq!(
            Provider::handle::<bool>(&shared, "alpha", "alpha").unwrap_err(),
            DataError::mismatch("alpha", "bool1", "float1")
        );
    }
}
