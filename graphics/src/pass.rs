//! Render passes.
//!
//! A pass is the technique-level description a draw call binds from: one
//! program, three binding maps and the default render states shared by
//! every draw call of the pass.

use std::sync::Arc;

use tessera_core::data::BindingMap;
use tessera_core::state::States;

use crate::program::Program;

/// A program plus the bindings and default states used to draw with it.
#[derive(Debug, Clone)]
pub struct Pass {
    name: String,
    program: Arc<Program>,
    attribute_bindings: BindingMap,
    uniform_bindings: BindingMap,
    state_bindings: BindingMap,
    states: Arc<States>,
}

impl Pass {
    /// Create a pass with empty binding maps and default states.
    pub fn new(name: impl Into<String>, program: Arc<Program>) -> Self {
        Self {
            name: name.into(),
            program,
            attribute_bindings: BindingMap::new(),
            uniform_bindings: BindingMap::new(),
            state_bindings: BindingMap::new(),
            states: Arc::new(States::default()),
        }
    }

    #[must_use]
    pub fn with_attribute_bindings(mut self, bindings: BindingMap) -> Self {
        self.attribute_bindings = bindings;
        self
    }

    #[must_use]
    pub fn with_uniform_bindings(mut self, bindings: BindingMap) -> Self {
        self.uniform_bindings = bindings;
        self
    }

    #[must_use]
    pub fn with_state_bindings(mut self, bindings: BindingMap) -> Self {
        self.state_bindings = bindings;
        self
    }

    /// Set the default states.
    #[must_use]
    pub fn with_states(mut self, states: States) -> Self {
        self.states = Arc::new(states);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    pub fn attribute_bindings(&self) -> &BindingMap {
        &self.attribute_bindings
    }

    pub fn uniform_bindings(&self) -> &BindingMap {
        &self.uniform_bindings
    }

    pub fn state_bindings(&self) -> &BindingMap {
        &self.state_bindings
    }

    /// Default states shared by the pass's draw calls.
    pub fn states(&self) -> &Arc<States> {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{ProgramId, ProgramInputs};
    use tessera_core::data::Binding;

    #[test]
    fn test_pass_builder() {
        let program = Arc::new(Program::new(ProgramId(1), ProgramInputs::new()));
        let pass = Pass::new("basic", program)
            .with_uniform_bindings(
                BindingMap::new().with("diffuseColor", Binding::target("material.diffuseColor")),
            )
            .with_states(States::transparent());

        assert_eq!(pass.name(), "basic");
        assert_eq!(pass.uniform_bindings().len(), 1);
        assert!(pass.attribute_bindings().is_empty());
        assert_eq!(**pass.states(), States::transparent());
    }
}
