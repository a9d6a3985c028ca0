//! The module registration protocol.

use void_value::RuntimeResult;

use crate::container::SymbolContainer;

/// A bundle of native functions and classes installed into a container.
///
/// [`SymbolContainer::register_module`] marks the module as current while
/// `register` runs, so everything it registers is attributed to it.
pub trait Module {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn register(&self, container: &mut SymbolContainer) -> RuntimeResult<()>;
}
