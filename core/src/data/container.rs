//! Hierarchical property stores.
//!
//! A [`Container`] aggregates providers. Top-level providers expose their
//! properties under their own names; providers registered in a named
//! collection are addressed as `collection[uuid].property`. Draw calls
//! resolve bindings against three containers at once, selected through
//! [`DataScopes`].

use std::collections::HashMap;
use std::sync::Arc;

use super::binding::BindingSource;
use super::error::{DataError, DataResult};
use super::handle::PropertyHandle;
use super::provider::{Provider, SharedProvider};
use super::template::{self, Variables};
use super::value::Property;

/// An aggregation of property providers.
#[derive(Debug, Default)]
pub struct Container {
    providers: Vec<SharedProvider>,
    collections: HashMap<String, Vec<SharedProvider>>,
}

/// Where a qualified name was found: the provider and the provider-local name.
struct Location<'c, 'n> {
    provider: &'c SharedProvider,
    local_name: &'n str,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a top-level provider.
    ///
    /// Providers are searched in registration order; the first one defining
    /// a name wins.
    pub fn add_provider(&mut self, provider: SharedProvider) {
        self.providers.push(provider);
    }

    /// Unregister a top-level provider. Returns `false` if it was not registered.
    pub fn remove_provider(&mut self, provider: &SharedProvider) -> bool {
        let before = self.providers.len();
        self.providers.retain(|p| !Arc::ptr_eq(p, provider));
        self.providers.len() != before
    }

    /// Register a provider as a member of a named collection.
    pub fn add_to_collection(&mut self, collection: impl Into<String>, provider: SharedProvider) {
        self.collections
            .entry(collection.into())
            .or_default()
            .push(provider);
    }

    /// Unregister a provider from a collection. Returns `false` if it was not a member.
    pub fn remove_from_collection(&mut self, collection: &str, provider: &SharedProvider) -> bool {
        let Some(members) = self.collections.get_mut(collection) else {
            return false;
        };
        let before = members.len();
        members.retain(|p| !Arc::ptr_eq(p, provider));
        members.len() != before
    }

    /// Number of top-level providers.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Number of providers registered in a collection.
    pub fn collection_len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, Vec::len)
    }

    /// Substitute `${...}` placeholders in a raw property name.
    pub fn resolve_name(variables: &Variables, raw: &str) -> DataResult<String> {
        template::resolve_name(variables, raw)
    }

    /// Whether `name` resolves to a stored value.
    pub fn has(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }

    /// Typed value lookup.
    pub fn get<T: Property>(&self, name: &str) -> DataResult<T> {
        let location = self
            .locate(name)
            .ok_or_else(|| DataError::missing(name, T::TYPE_NAME))?;
        let provider = location.provider.read();
        provider.get::<T>(location.local_name).map_err(|err| match err {
            DataError::MissingProperty {
                expected, found, ..
            } => DataError::MissingProperty {
                name: name.to_string(),
                expected,
                found,
            },
            other => other,
        })
    }

    /// Resolve a typed handle to the slot backing `name`.
    pub fn handle<T: Property>(&self, name: &str) -> DataResult<PropertyHandle<T>> {
        let location = self
            .locate(name)
            .ok_or_else(|| DataError::missing(name, T::TYPE_NAME))?;
        Provider::handle::<T>(location.provider, location.local_name, name)
    }

    fn locate<'n>(&self, name: &'n str) -> Option<Location<'_, 'n>> {
        if let Some(location) = self.locate_in_collection(name) {
            return Some(location);
        }
        self.providers
            .iter()
            .find(|provider| provider.read().has(name))
            .map(|provider| Location {
                provider,
                local_name: name,
            })
    }

    /// Match `collection[uuid].property` against registered collections.
    fn locate_in_collection<'n>(&self, name: &'n str) -> Option<Location<'_, 'n>> {
        let open = name.find('[')?;
        let members = self.collections.get(&name[..open])?;
        let close = open + name[open..].find(']')?;
        let uuid = &name[open + 1..close];
        let local_name = name[close + 1..].strip_prefix('.')?;

        members
            .iter()
            .find(|provider| {
                let provider = provider.read();
                provider.uuid() == uuid && provider.has(local_name)
            })
            .map(|provider| Location {
                provider,
                local_name,
            })
    }
}

/// The three containers a binding can select from.
#[derive(Debug, Clone, Copy)]
pub struct DataScopes<'a> {
    /// Scene-wide data (lights, time).
    pub root: &'a Container,
    /// Data of the renderer drawing the scene (camera matrices).
    pub renderer: &'a Container,
    /// Data of the drawn entity (geometry, material, transform).
    pub target: &'a Container,
}

impl<'a> DataScopes<'a> {
    /// Group the three scopes.
    pub fn new(root: &'a Container, renderer: &'a Container, target: &'a Container) -> Self {
        Self {
            root,
            renderer,
            target,
        }
    }

    /// Container selected by a binding source.
    pub fn get(&self, source: BindingSource) -> &'a Container {
        match source {
            BindingSource::Root => self.root,
            BindingSource::Renderer => self.renderer,
            BindingSource::Target => self.target,
        }
    }
}
