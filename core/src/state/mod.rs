//! Render states: value types, the default record, and the property names
//! state bindings are keyed by.

mod types;

pub use types::{
    BlendFactor, CompareMode, Priority, ScissorBox, States, StencilOperation, TriangleCulling,
};

/// Names under which state bindings are looked up in a state binding map.
pub mod names {
    pub const PRIORITY: &str = "priority";
    pub const Z_SORT: &str = "zSort";
    pub const BLENDING_SOURCE: &str = "blendingSourceFactor";
    pub const BLENDING_DESTINATION: &str = "blendingDestinationFactor";
    pub const COLOR_MASK: &str = "colorMask";
    pub const DEPTH_MASK: &str = "depthMask";
    pub const DEPTH_FUNCTION: &str = "depthFunction";
    pub const TRIANGLE_CULLING: &str = "triangleCulling";
    pub const STENCIL_FUNCTION: &str = "stencilFunction";
    pub const STENCIL_REFERENCE: &str = "stencilReference";
    pub const STENCIL_MASK: &str = "stencilMask";
    pub const STENCIL_FAIL_OPERATION: &str = "stencilFailOperation";
    pub const STENCIL_Z_FAIL_OPERATION: &str = "stencilZFailOperation";
    pub const STENCIL_Z_PASS_OPERATION: &str = "stencilZPassOperation";
    pub const SCISSOR_TEST: &str = "scissorTest";
    pub const SCISSOR_BOX: &str = "scissorBox";
    pub const TARGET: &str = "target";

    /// Every recognized state name.
    pub const ALL: [&str; 17] = [
        PRIORITY,
        Z_SORT,
        BLENDING_SOURCE,
        BLENDING_DESTINATION,
        COLOR_MASK,
        DEPTH_MASK,
        DEPTH_FUNCTION,
        TRIANGLE_CULLING,
        STENCIL_FUNCTION,
        STENCIL_REFERENCE,
        STENCIL_MASK,
        STENCIL_FAIL_OPERATION,
        STENCIL_Z_FAIL_OPERATION,
        STENCIL_Z_PASS_OPERATION,
        SCISSOR_TEST,
        SCISSOR_BOX,
        TARGET,
    ];
}

#[cfg(test)]
mod tests {
    use super::names;
    use std::collections::HashSet;

    #[test]
    fn test_state_names_are_unique() {
        let unique: HashSet<_> = names::ALL.iter().collect();
        assert_eq!(unique.len(), names::ALL.len());
    }
}
