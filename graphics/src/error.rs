//! Graphics error types.

use tessera_core::data::DataError;

use crate::program::InputType;

/// Errors raised while binding or rendering a draw call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphicsError {
    /// A property could not be resolved or read.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The program declares an input type draw calls cannot bind.
    #[error("unsupported program input type {input_type} for `{input}`")]
    UnsupportedInputType {
        /// Declared input name.
        input: String,
        /// Declared type.
        input_type: InputType,
    },

    /// More samplers than the configured limit.
    #[error("too many samplers: at most {max} texture slots are available")]
    TooManySamplers {
        /// Configured limit.
        max: u32,
    },

    /// More vertex buffers than the configured limit.
    #[error("too many vertex buffers: at most {max} slots are available")]
    TooManyVertexBuffers {
        /// Configured limit.
        max: u32,
    },

    /// `render` was called on a draw call without a successful `bind`.
    #[error("draw call is not bound")]
    NotBound,
}

/// Convenience result alias for the graphics crate.
pub type GraphicsResult<T> = Result<T, GraphicsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphicsError::UnsupportedInputType {
            input: "envMap".to_string(),
            input_type: InputType::SamplerCube,
        };
        assert_eq!(
            err.to_string(),
            "unsupported program input type samplerCube for `envMap`"
        );

        let err = GraphicsError::from(DataError::InvalidSource("camera".to_string()));
        assert!(err.to_string().starts_with("invalid binding source"));

        assert_eq!(GraphicsError::NotBound.to_string(), "draw call is not bound");
    }
}
