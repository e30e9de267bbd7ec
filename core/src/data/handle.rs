//! Typed handles into provider slots.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::arena::SlotKey;
use super::error::{DataError, DataResult};
use super::provider::Provider;
use super::value::Property;

/// A typed, non-owning reference to one provider slot.
///
/// The handle keeps only a weak reference to the provider. Reading it
/// returns the slot's current value, so in-place writes are observed without
/// re-resolving the name. It becomes stale when the slot is removed or
/// retyped, or when the provider is dropped; reads then fail with
/// [`DataError::StaleHandle`].
pub struct PropertyHandle<T> {
    provider: Weak<RwLock<Provider>>,
    slot: SlotKey,
    name: Arc<str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Property> PropertyHandle<T> {
    pub(crate) fn new(provider: Weak<RwLock<Provider>>, slot: SlotKey, name: &str) -> Self {
        Self {
            provider,
            slot,
            name: Arc::from(name),
            _marker: PhantomData,
        }
    }

    /// Read the slot's current value.
    pub fn read(&self) -> DataResult<T> {
        let provider = self.provider.upgrade().ok_or_else(|| self.stale())?;
        let guard = provider.read();
        guard
            .slot_value(self.slot)
            .and_then(T::from_value)
            .ok_or_else(|| self.stale())
    }

    /// Whether the slot still holds a value of type `T`.
    pub fn is_valid(&self) -> bool {
        self.read().is_ok()
    }

    /// Fully qualified property name this handle was resolved from.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn stale(&self) -> DataError {
        DataError::StaleHandle {
            name: self.name.to_string(),
        }
    }
}

impl<T> Clone for PropertyHandle<T> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            slot: self.slot,
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for PropertyHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyHandle")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
