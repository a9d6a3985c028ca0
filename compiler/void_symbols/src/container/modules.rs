//! The module registry.

use std::rc::Rc;

use tracing::debug;
use void_value::errors::unknown_module;
use void_value::RuntimeResult;

use super::{ModuleEntry, SymbolContainer};
use crate::module::Module;

impl SymbolContainer {
    /// Run `module.register` with the module marked current, then keep the
    /// module. A failed registration is not kept; whatever it registered
    /// before failing stays.
    pub fn register_module(&mut self, module: Box<dyn Module>) -> RuntimeResult<()> {
        let module: Rc<dyn Module> = Rc::from(module);
        let name = module.name().to_string();
        debug!(module = %name, "register module");

        let previous = self.current_module.replace(name.clone());
        let result = module.register(self);
        self.current_module = previous;
        result.map_err(|err| err.with_note(format!("while registering module {name}")))?;

        let description = module.description().to_string();
        self.modules.insert(name, ModuleEntry { module, description });
        Ok(())
    }

    pub fn get_module(&self, name: &str) -> Option<Rc<dyn Module>> {
        self.modules.get(name).map(|entry| Rc::clone(&entry.module))
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn module_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.keys().cloned().collect();
        names.sort();
        names
    }

    /// Forget a module. Its functions and classes stay registered.
    pub fn remove_module(&mut self, name: &str) -> RuntimeResult<()> {
        self.modules.remove(name).ok_or_else(|| unknown_module(name))?;
        if self.current_module.as_deref() == Some(name) {
            self.current_module = None;
        }
        Ok(())
    }

    pub fn module_description(&self, name: &str) -> Option<&str> {
        self.modules
            .get(name)
            .map(|entry| entry.description.as_str())
    }

    pub fn set_module_description(&mut self, name: &str, description: &str) -> RuntimeResult<()> {
        let entry = self.modules.get_mut(name).ok_or_else(|| unknown_module(name))?;
        entry.description = description.to_string();
        Ok(())
    }

    /// The module whose `register` is running, if any.
    pub fn current_module(&self) -> Option<&str> {
        self.current_module.as_deref()
    }
}
