//! `SymbolContainerBuilder` for configuring a container before first use.

use void_value::{RuntimeError, RuntimeResult};

use super::{ContainerConfig, SymbolContainer};
use crate::builtins::{ModuleHelperModule, VariableHelpersModule};
use crate::module::Module;

/// Builder for [`SymbolContainer`].
///
/// Modules added here are registered in order during [`build`](Self::build),
/// after the root scope exists.
#[must_use]
pub struct SymbolContainerBuilder {
    initial_scope: String,
    config: ContainerConfig,
    modules: Vec<Box<dyn Module>>,
}

impl SymbolContainerBuilder {
    pub fn new(initial_scope: impl Into<String>) -> Self {
        SymbolContainerBuilder {
            initial_scope: initial_scope.into(),
            config: ContainerConfig::default(),
            modules: Vec::new(),
        }
    }

    /// Bound on class-hierarchy walks (inherited method/property lookup).
    pub fn max_hierarchy_depth(mut self, depth: usize) -> Self {
        self.config.max_hierarchy_depth = depth;
        self
    }

    pub fn with_module(mut self, module: Box<dyn Module>) -> Self {
        self.modules.push(module);
        self
    }

    /// Install the introspection helpers (`module_list`, `typeof`, ...).
    pub fn with_builtins(self) -> Self {
        self.with_module(Box::new(ModuleHelperModule))
            .with_module(Box::new(VariableHelpersModule))
    }

    pub fn build(self) -> RuntimeResult<SymbolContainer> {
        if self.initial_scope.is_empty() {
            return Err(RuntimeError::new("initial scope name must not be empty"));
        }
        let mut container = SymbolContainer::with_config(self.config);
        container.create(&self.initial_scope);
        for module in self.modules {
            container.register_module(module)?;
        }
        Ok(container)
    }
}
