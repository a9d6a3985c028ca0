//! Void Symbols - scoped symbol storage and runtime registries for VoidScript.
//!
//! # Architecture
//!
//! - [`Symbol`]: one enum variant per symbol kind (variable, constant,
//!   function, method, class, enum), shared as [`SymbolRef`]
//! - [`SymbolFactory`]: constructors for each kind
//! - [`SymbolTable`]: `namespace -> name -> symbol` with a parent link
//! - [`SymbolContainer`]: named scopes, the active scope stack, and the
//!   function, class and module registries
//! - [`Module`]: the registration protocol for native extensions
//!
//! Values come from `void_value`, re-exported here for convenience.

pub mod builtins;
mod container;
mod factory;
mod kind;
mod module;
mod params;
mod symbol;
mod table;

pub use builtins::{ModuleHelperModule, VariableHelpersModule};
pub use container::{
    default_value_for, ClassInfo, ContainerConfig, MethodInfo, NativeFn, PropertyInfo,
    ScopeGuard, SymbolContainer, SymbolContainerBuilder,
};
pub use factory::SymbolFactory;
pub use kind::{
    SymbolKind, CALL_SCOPE, CONSTANTS_NS, FUNCTIONS_NS, METHODS_NS, OTHERS_NS, SCOPE_SEPARATOR,
    VARIABLES_NS,
};
pub use module::Module;
pub use params::{FunctionDoc, ParameterInfo};
pub use symbol::{
    ClassSymbol, ConstantSymbol, EnumSymbol, FunctionBody, FunctionSymbol, MethodSymbol, Symbol,
    SymbolRef, VariableSymbol,
};
pub use table::{SymbolTable, TableRef};

pub use void_value::{
    ObjectMap, RuntimeError, RuntimeErrorKind, RuntimeResult, Value, ValuePtr, ValueType,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=void_symbols=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
