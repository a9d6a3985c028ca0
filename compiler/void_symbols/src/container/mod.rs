//! The symbol container: scopes plus the runtime registries.
//!
//! One [`SymbolContainer`] holds everything an interpreter needs to resolve
//! names at runtime:
//!
//! - named [`SymbolTable`](crate::SymbolTable)s and the stack of active scopes
//! - the native function registry and its documentation
//! - the class registry (properties, methods, static state)
//! - the module registry
//!
//! It is an explicit context value. Native callbacks receive `&SymbolContainer`
//! instead of reaching for a global.
//!
//! The operations are split by concern across the submodules; each adds an
//! `impl SymbolContainer` block.

mod builder;
mod classes;
mod functions;
mod instance;
mod introspection;
mod modules;
mod scopes;
mod symbols;

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use void_value::{RuntimeResult, ValuePtr};

use crate::module::Module;
use crate::params::FunctionDoc;
use crate::table::TableRef;

pub use builder::SymbolContainerBuilder;
pub use classes::{default_value_for, ClassInfo, MethodInfo, PropertyInfo};
pub use scopes::ScopeGuard;

/// Native function or method body.
pub type NativeFn = Rc<dyn Fn(&SymbolContainer, &[ValuePtr]) -> RuntimeResult>;

/// Settings fixed at build time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Bound on class-hierarchy walks.
    pub max_hierarchy_depth: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        ContainerConfig {
            max_hierarchy_depth: 10,
        }
    }
}

struct FunctionEntry {
    callback: NativeFn,
    module: Option<String>,
}

/// One entry of the active scope stack.
struct ActiveScope {
    name: String,
    table: TableRef,
}

struct ModuleEntry {
    module: Rc<dyn Module>,
    description: String,
}

pub struct SymbolContainer {
    scopes: FxHashMap<String, TableRef>,
    scope_stack: Vec<ActiveScope>,
    functions: FxHashMap<String, FunctionEntry>,
    docs: FxHashMap<String, FunctionDoc>,
    classes: FxHashMap<String, ClassInfo>,
    modules: FxHashMap<String, ModuleEntry>,
    current_module: Option<String>,
    next_call_frame: u64,
    config: ContainerConfig,
}

impl SymbolContainer {
    /// A container with default settings whose root scope is `initial_scope`.
    pub fn new(initial_scope: &str) -> RuntimeResult<Self> {
        SymbolContainer::builder(initial_scope).build()
    }

    pub fn builder(initial_scope: impl Into<String>) -> SymbolContainerBuilder {
        SymbolContainerBuilder::new(initial_scope)
    }

    fn with_config(config: ContainerConfig) -> Self {
        SymbolContainer {
            scopes: FxHashMap::default(),
            scope_stack: Vec::new(),
            functions: FxHashMap::default(),
            docs: FxHashMap::default(),
            classes: FxHashMap::default(),
            modules: FxHashMap::default(),
            current_module: None,
            next_call_frame: 0,
            config,
        }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }
}

impl fmt::Debug for SymbolContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolContainer")
            .field("scope_stack", &self.scope_stack())
            .field("scopes", &self.scopes.len())
            .field("functions", &self.functions.len())
            .field("classes", &self.classes.len())
            .field("modules", &self.modules.len())
            .field("current_module", &self.current_module)
            .finish_non_exhaustive()
    }
}
