//! The native function registry.

use std::rc::Rc;

use tracing::debug;
use void_value::errors::unknown_function;
use void_value::{RuntimeResult, ValuePtr, ValueType};

use super::{FunctionEntry, SymbolContainer};
use crate::params::FunctionDoc;

impl SymbolContainer {
    /// Register (or replace) a native function.
    ///
    /// The function is attributed to the module currently registering, if
    /// any. A documentation entry is created only when none exists yet, so
    /// docs registered beforehand survive.
    pub fn register_function<F>(&mut self, name: &str, callback: F, return_type: ValueType)
    where
        F: Fn(&SymbolContainer, &[ValuePtr]) -> RuntimeResult + 'static,
    {
        debug!(function = name, module = ?self.current_module, "register function");
        self.functions.insert(
            name.to_string(),
            FunctionEntry {
                callback: Rc::new(callback),
                module: self.current_module.clone(),
            },
        );
        self.docs
            .entry(name.to_string())
            .or_insert_with(|| FunctionDoc::new(name, return_type));
    }

    /// Store documentation for a function or a qualified method name.
    /// Overwrites any earlier entry.
    pub fn register_doc(&mut self, name: &str, doc: FunctionDoc) {
        self.docs.insert(name.to_string(), doc);
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Declared return type; `Null` when undocumented.
    pub fn function_return_type(&self, name: &str) -> ValueType {
        self.docs
            .get(name)
            .map_or(ValueType::Null, |doc| doc.return_type)
    }

    pub fn function_doc(&self, name: &str) -> Option<&FunctionDoc> {
        self.docs.get(name)
    }

    /// Every registered native function, sorted.
    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Module that registered `name`, if any.
    pub fn function_module(&self, name: &str) -> Option<&str> {
        self.functions
            .get(name)
            .and_then(|entry| entry.module.as_deref())
    }

    pub fn function_names_by_module(&self, module: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .functions
            .iter()
            .filter(|(_, entry)| entry.module.as_deref() == Some(module))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Invoke a native function. Callback errors propagate unchanged.
    #[tracing::instrument(level = "debug", skip(self, args), fields(argc = args.len()))]
    pub fn call_function(&self, name: &str, args: &[ValuePtr]) -> RuntimeResult {
        let callback = self
            .functions
            .get(name)
            .map(|entry| Rc::clone(&entry.callback))
            .ok_or_else(|| unknown_function(name))?;
        callback(self, args)
    }
}
