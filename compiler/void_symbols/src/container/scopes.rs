//! Scope stack management.
//!
//! Every scope is a named [`SymbolTable`]. Two kinds of table exist:
//!
//! - root-chained tables from [`create`](SymbolContainer::create) (files,
//!   function bodies, call frames), whose parent is the root table
//! - child tables from [`enter_scope`](SymbolContainer::enter_scope)
//!   (blocks), whose parent is the table active when they were entered
//!
//! Name resolution follows the current table's parent chain, so a call
//! frame sees globals but never its caller's block locals. Each stack entry
//! holds its own table handle; scope names may repeat on the stack.

use std::ops::{Deref, DerefMut};

use tracing::{debug, trace};
use void_value::errors::unknown_scope;
use void_value::RuntimeResult;

use super::{ActiveScope, SymbolContainer};
use crate::kind::CALL_SCOPE;
use crate::table::{SymbolTable, TableRef};

impl SymbolContainer {
    /// Create a fresh table under `name` and make it current.
    ///
    /// The first table created becomes the root; later ones are chained to
    /// it. An existing table with the same name is replaced.
    pub fn create(&mut self, name: &str) {
        let table = match self.root_table() {
            Some(root) if self.root_name() != Some(name) => SymbolTable::with_parent(root),
            _ => SymbolTable::new(),
        };
        debug!(scope = name, "create scope");
        self.push_scope(name, TableRef::new(table));
    }

    /// Push a block scope whose parent is the current table.
    pub fn enter_scope(&mut self, name: &str) {
        let table = match self.current_table() {
            Ok(parent) => SymbolTable::with_parent(parent),
            Err(_) => SymbolTable::new(),
        };
        trace!(scope = name, "enter scope");
        self.push_scope(name, TableRef::new(table));
    }

    /// Pop the current scope and drop its table. If an outer scope with the
    /// same name is still active, that name refers to the outer table again.
    /// The root is never popped.
    pub fn leave_scope(&mut self) -> Option<String> {
        if self.scope_stack.len() <= 1 {
            return None;
        }
        let popped = self.scope_stack.pop()?;
        let registered = self
            .scopes
            .get(&popped.name)
            .is_some_and(|table| table.ptr_eq(&popped.table));
        if registered {
            let outer = self
                .scope_stack
                .iter()
                .rev()
                .find(|scope| scope.name == popped.name)
                .map(|scope| scope.table.clone());
            match outer {
                Some(table) => {
                    self.scopes.insert(popped.name.clone(), table);
                }
                None => {
                    self.scopes.remove(&popped.name);
                }
            }
        }
        trace!(scope = %popped.name, "leave scope");
        Some(popped.name)
    }

    /// Pop the current scope but keep its table for a later [`enter`](Self::enter).
    pub fn enter_previous_scope(&mut self) -> Option<String> {
        if self.scope_stack.len() <= 1 {
            return None;
        }
        let name = self.scope_stack.pop().map(|scope| scope.name);
        trace!(scope = ?name, "exit to previous scope");
        name
    }

    /// Re-enter an existing named table.
    pub fn enter(&mut self, name: &str) -> RuntimeResult<()> {
        let table = self
            .scopes
            .get(name)
            .cloned()
            .ok_or_else(|| unknown_scope(name))?;
        trace!(scope = name, "enter existing scope");
        self.scope_stack.push(ActiveScope {
            name: name.to_string(),
            table,
        });
        Ok(())
    }

    /// Create and enter a uniquely named frame for one call of a function
    /// defined in `base`. Returns the frame's scope name.
    pub fn enter_function_call_scope(&mut self, base: &str) -> String {
        let frame = self.next_call_frame;
        self.next_call_frame += 1;
        let name = format!("{base}{CALL_SCOPE}{frame}");
        self.create(&name);
        name
    }

    /// Empty only before the root scope exists.
    pub fn current_scope_name(&self) -> &str {
        self.scope_stack
            .last()
            .map_or("", |scope| scope.name.as_str())
    }

    pub fn current_table(&self) -> RuntimeResult<TableRef> {
        self.scope_stack
            .last()
            .map(|scope| scope.table.clone())
            .ok_or_else(|| unknown_scope(""))
    }

    /// Active scope names, outermost first.
    pub fn scope_stack(&self) -> Vec<&str> {
        self.scope_stack
            .iter()
            .map(|scope| scope.name.as_str())
            .collect()
    }

    /// Every live table name, sorted.
    pub fn scope_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scopes.keys().cloned().collect();
        names.sort();
        names
    }

    /// The table `name` currently refers to: the innermost active scope of
    /// that name, or a table kept by [`enter_previous_scope`](Self::enter_previous_scope).
    pub fn scope_table(&self, name: &str) -> Option<TableRef> {
        self.scopes.get(name).cloned()
    }

    pub fn depth(&self) -> usize {
        self.scope_stack.len()
    }

    /// Enter a block scope that is left when the guard drops.
    pub fn scoped(&mut self, name: &str) -> ScopeGuard<'_> {
        self.enter_scope(name);
        ScopeGuard { container: self }
    }

    /// Run `f` inside a block scope, leaving it afterwards even on panic.
    pub fn with_scope<T, F>(&mut self, name: &str, f: F) -> T
    where
        F: FnOnce(&mut ScopeGuard<'_>) -> T,
    {
        let mut guard = self.scoped(name);
        f(&mut guard)
    }

    pub(super) fn root_name(&self) -> Option<&str> {
        self.scope_stack.first().map(|scope| scope.name.as_str())
    }

    fn root_table(&self) -> Option<TableRef> {
        self.scope_stack.first().map(|scope| scope.table.clone())
    }

    fn push_scope(&mut self, name: &str, table: TableRef) {
        self.scopes.insert(name.to_string(), table.clone());
        self.scope_stack.push(ActiveScope {
            name: name.to_string(),
            table,
        });
    }
}

/// RAII guard over a block scope.
///
/// Derefs to the container; [`SymbolContainer::leave_scope`] runs on drop.
pub struct ScopeGuard<'a> {
    container: &'a mut SymbolContainer,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.container.leave_scope();
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = SymbolContainer;

    fn deref(&self) -> &Self::Target {
        self.container
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.container
    }
}
