//! Defining and resolving scoped symbols.

use std::fmt::Write as _;

use tracing::trace;
use void_value::errors::{immutable_assignment, undefined_symbol, unknown_scope, wrong_symbol_kind};
use void_value::{RuntimeResult, ValuePtr};

use super::SymbolContainer;
use crate::kind::{SymbolKind, CONSTANTS_NS, FUNCTIONS_NS, METHODS_NS, VARIABLES_NS};
use crate::symbol::SymbolRef;

impl SymbolContainer {
    /// Define `symbol` in the current scope under its kind's namespace.
    /// Returns that namespace.
    pub fn add(&mut self, symbol: SymbolRef) -> RuntimeResult<&'static str> {
        let namespace = symbol.kind().namespace();
        self.define_in(symbol, namespace, None)
    }

    pub fn add_variable(
        &mut self,
        symbol: SymbolRef,
        scope: Option<&str>,
    ) -> RuntimeResult<&'static str> {
        expect_kind(&symbol, &[SymbolKind::Variable])?;
        self.define_in(symbol, VARIABLES_NS, scope)
    }

    pub fn add_constant(
        &mut self,
        symbol: SymbolRef,
        scope: Option<&str>,
    ) -> RuntimeResult<&'static str> {
        expect_kind(&symbol, &[SymbolKind::Constant])?;
        self.define_in(symbol, CONSTANTS_NS, scope)
    }

    pub fn add_function(
        &mut self,
        symbol: SymbolRef,
        scope: Option<&str>,
    ) -> RuntimeResult<&'static str> {
        expect_kind(&symbol, &[SymbolKind::Function])?;
        self.define_in(symbol, FUNCTIONS_NS, scope)
    }

    /// Methods are stored under the methods namespace. A plain function
    /// symbol is accepted and stored there as well.
    pub fn add_method_symbol(
        &mut self,
        symbol: SymbolRef,
        scope: Option<&str>,
    ) -> RuntimeResult<&'static str> {
        expect_kind(&symbol, &[SymbolKind::Method, SymbolKind::Function])?;
        self.define_in(symbol, METHODS_NS, scope)
    }

    pub fn add_class(
        &mut self,
        symbol: SymbolRef,
        scope: Option<&str>,
    ) -> RuntimeResult<&'static str> {
        expect_kind(&symbol, &[SymbolKind::Class])?;
        self.define_in(symbol, VARIABLES_NS, scope)
    }

    pub fn add_enum(
        &mut self,
        symbol: SymbolRef,
        scope: Option<&str>,
    ) -> RuntimeResult<&'static str> {
        expect_kind(&symbol, &[SymbolKind::Enum])?;
        self.define_in(symbol, VARIABLES_NS, scope)
    }

    fn define_in(
        &mut self,
        symbol: SymbolRef,
        namespace: &'static str,
        scope: Option<&str>,
    ) -> RuntimeResult<&'static str> {
        let table = match scope {
            Some(scope) => self
                .scopes
                .get(scope)
                .cloned()
                .ok_or_else(|| unknown_scope(scope))?,
            None => self.current_table()?,
        };
        trace!(name = symbol.name(), namespace, "define symbol");
        table.borrow_mut().define(namespace, symbol);
        Ok(namespace)
    }

    /// Look `name` up in `namespace`, from the current table outwards.
    pub fn get(&self, namespace: &str, name: &str) -> Option<SymbolRef> {
        let table = self.current_table().ok()?;
        let found = table.borrow().get(namespace, name);
        found
    }

    pub fn exists(&self, namespace: &str, name: &str) -> bool {
        self.get(namespace, name).is_some()
    }

    /// Like [`get`](Self::get), failing with `UndefinedSymbol` on a miss.
    pub fn resolve(&self, namespace: &str, name: &str) -> RuntimeResult<SymbolRef> {
        self.get(namespace, name)
            .ok_or_else(|| undefined_symbol(name))
    }

    pub fn get_variable(&self, name: &str) -> Option<SymbolRef> {
        self.get_kind(VARIABLES_NS, name, SymbolKind::Variable)
    }

    /// A variable defined directly in the named scope.
    pub fn get_variable_in(&self, scope: &str, name: &str) -> Option<SymbolRef> {
        let table = self.scopes.get(scope)?;
        let found = table.borrow().get_local(VARIABLES_NS, name);
        found.filter(|symbol| symbol.kind() == SymbolKind::Variable)
    }

    pub fn get_constant(&self, name: &str) -> Option<SymbolRef> {
        self.get_kind(CONSTANTS_NS, name, SymbolKind::Constant)
    }

    pub fn get_function(&self, name: &str) -> Option<SymbolRef> {
        self.get_kind(FUNCTIONS_NS, name, SymbolKind::Function)
    }

    pub fn get_method(&self, name: &str) -> Option<SymbolRef> {
        self.get(METHODS_NS, name)
            .filter(|symbol| symbol.as_function().is_some())
    }

    pub fn get_enum(&self, name: &str) -> Option<SymbolRef> {
        self.get_kind(VARIABLES_NS, name, SymbolKind::Enum)
    }

    fn get_kind(&self, namespace: &str, name: &str, kind: SymbolKind) -> Option<SymbolRef> {
        self.get(namespace, name)
            .filter(|symbol| symbol.kind() == kind)
    }

    /// First match among variables, constants, functions, then methods.
    pub fn find_symbol(&self, name: &str) -> Option<SymbolRef> {
        self.get_variable(name)
            .or_else(|| self.get_constant(name))
            .or_else(|| self.get_function(name))
            .or_else(|| self.get_method(name))
    }

    /// Rebind the variable `name` as seen from the current scope.
    pub fn assign(&self, name: &str, value: ValuePtr) -> RuntimeResult<()> {
        if let Some(symbol) = self.get(VARIABLES_NS, name) {
            return symbol.set_value(value);
        }
        if self.get_constant(name).is_some() {
            return Err(immutable_assignment(name));
        }
        Err(undefined_symbol(name))
    }

    /// Human-readable listing of every scope and its symbols.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for scope in self.scope_names() {
            let Some(table) = self.scopes.get(&scope) else {
                continue;
            };
            let _ = writeln!(out, "Scope: '{scope}'");
            let table = table.borrow();
            for namespace in table.namespaces() {
                let _ = writeln!(out, " Namespace: '{namespace}'");
                for symbol in table.list_all(&namespace) {
                    let _ = writeln!(out, "{}", symbol.dump());
                }
            }
        }
        out
    }
}

fn expect_kind(symbol: &SymbolRef, accepted: &[SymbolKind]) -> RuntimeResult<()> {
    let kind = symbol.kind();
    if accepted.contains(&kind) {
        return Ok(());
    }
    let expected = accepted
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(" or ");
    Err(wrong_symbol_kind(symbol.name(), &expected, kind.name()))
}
