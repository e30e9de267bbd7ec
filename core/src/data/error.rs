//! Property store error types.

/// Errors raised while addressing or reading property data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// The property is absent, or holds a value of another type.
    #[error("missing property `{name}`: expected {expected}, {}", found_description(.found))]
    MissingProperty {
        /// Fully resolved property name.
        name: String,
        /// Type the caller asked for.
        expected: &'static str,
        /// Type actually stored, `None` when nothing is stored under the name.
        found: Option<&'static str>,
    },

    /// A `${...}` placeholder names a variable absent from the variable table.
    #[error("unresolved variable `{variable}` in `{template}`")]
    UnresolvedVariable {
        /// The placeholder's variable name.
        variable: String,
        /// The raw property name being resolved.
        template: String,
    },

    /// A `${` is never closed, or encloses an empty variable name.
    #[error("malformed placeholder at byte {offset} in `{template}`")]
    MalformedTemplate {
        /// The raw property name being resolved.
        template: String,
        /// Byte offset of the offending `${`.
        offset: usize,
    },

    /// A binding names a scope that does not exist.
    #[error("invalid binding source `{0}` (expected root, renderer or target)")]
    InvalidSource(String),

    /// A handle outlived the slot it pointed to.
    #[error("stale handle to property `{name}`")]
    StaleHandle {
        /// Property name the handle was resolved from.
        name: String,
    },
}

fn found_description(found: &Option<&'static str>) -> String {
    match found {
        Some(ty) => format!("found {ty}"),
        None => "found nothing".to_string(),
    }
}

impl DataError {
    pub(crate) fn missing(name: impl Into<String>, expected: &'static str) -> Self {
        Self::MissingProperty {
            name: name.into(),
            expected,
            found: None,
        }
    }

    pub(crate) fn mismatch(
        name: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::MissingProperty {
            name: name.into(),
            expected,
            found: Some(found),
        }
    }
}

/// Convenience result alias for the data layer.
pub type DataResult<T> = Result<T, DataError>;
