//! Binding maps: declarative links from shader inputs to properties.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::error::DataError;

/// Which of the three data scopes a binding resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingSource {
    /// Scene-wide data.
    Root,
    /// Data of the renderer drawing the scene.
    Renderer,
    /// Data of the drawn entity.
    Target,
}

impl BindingSource {
    /// Lowercase name, as written in technique data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Renderer => "renderer",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for BindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindingSource {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "root" => Ok(Self::Root),
            "renderer" => Ok(Self::Renderer),
            "target" => Ok(Self::Target),
            _ => Err(DataError::InvalidSource(s.to_string())),
        }
    }
}

/// A (scope, property name) pair.
///
/// The property name may contain `${...}` placeholders resolved per draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub source: BindingSource,
    pub property_name: String,
}

impl Binding {
    /// Create a binding.
    pub fn new(source: BindingSource, property_name: impl Into<String>) -> Self {
        Self {
            source,
            property_name: property_name.into(),
        }
    }

    /// Binding against the root scope.
    pub fn root(property_name: impl Into<String>) -> Self {
        Self::new(BindingSource::Root, property_name)
    }

    /// Binding against the renderer scope.
    pub fn renderer(property_name: impl Into<String>) -> Self {
        Self::new(BindingSource::Renderer, property_name)
    }

    /// Binding against the target scope.
    pub fn target(property_name: impl Into<String>) -> Self {
        Self::new(BindingSource::Target, property_name)
    }
}

/// Map from shader-input name to binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingMap {
    bindings: HashMap<String, Binding>,
}

impl BindingMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding (builder style). A later binding for the same input replaces the earlier one.
    #[must_use]
    pub fn with(mut self, input: impl Into<String>, binding: Binding) -> Self {
        self.insert(input, binding);
        self
    }

    /// Add or replace a binding, returning the previous one.
    pub fn insert(&mut self, input: impl Into<String>, binding: Binding) -> Option<Binding> {
        self.bindings.insert(input.into(), binding)
    }

    /// Remove a binding.
    pub fn remove(&mut self, input: &str) -> Option<Binding> {
        self.bindings.remove(input)
    }

    /// Binding for an input, if any.
    pub fn get(&self, input: &str) -> Option<&Binding> {
        self.bindings.get(input)
    }

    /// Whether an input is bound.
    pub fn contains(&self, input: &str) -> bool {
        self.bindings.contains_key(input)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over (input, binding) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("root", BindingSource::Root)]
    #[case("renderer", BindingSource::Renderer)]
    #[case("TARGET", BindingSource::Target)]
    fn test_source_from_str(#[case] text: &str, #[case] expected: BindingSource) {
        assert_eq!(text.parse::<BindingSource>().unwrap(), expected);
    }

    #[test]
    fn test_invalid_source() {
        assert_eq!(
            "camera".parse::<BindingSource>().unwrap_err(),
            DataError::InvalidSource("camera".to_string())
        );
    }

    #[test]
    fn test_source_display_round_trips() {
        for source in [BindingSource::Root, BindingSource::Renderer, BindingSource::Target] {
            assert_eq!(source.to_string().parse::<BindingSource>().unwrap(), source);
        }
    }

    #[test]
    fn test_map_is_unique_per_input() {
        let map = BindingMap::new()
            .with("diffuseColor", Binding::target("material.diffuseColor"))
            .with("diffuseColor", Binding::root("defaults.diffuseColor"));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("diffuseColor"), Some(&Binding::root("defaults.diffuseColor")));
    }

    #[test]
    fn test_insert_remove() {
        let mut map = BindingMap::new();
        assert!(map.is_empty());
        assert!(map.insert("uv", Binding::target("geometry[${geometryUuid}].uv")).is_none());
        assert!(map.contains("uv"));
        assert_eq!(map.iter().count(), 1);
        assert!(map.remove("uv").is_some());
        assert!(!map.contains("uv"));
    }
}
