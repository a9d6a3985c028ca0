//! Namespaced symbol tables with parent chaining.
//!
//! A table maps `namespace -> name -> symbol`. Lookups fall through to the
//! parent table when the local table has no entry; mutations only ever touch
//! the local table.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::symbol::SymbolRef;

/// Shared handle to a [`SymbolTable`].
///
/// `Rc`, not `Arc`: tables belong to one container on one thread.
#[repr(transparent)]
pub struct TableRef(Rc<RefCell<SymbolTable>>);

impl TableRef {
    #[inline]
    pub fn new(table: SymbolTable) -> Self {
        TableRef(Rc::new(RefCell::new(table)))
    }

    /// Whether both handles point at the same table.
    #[inline]
    pub fn ptr_eq(&self, other: &TableRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Clone for TableRef {
    #[inline]
    fn clone(&self) -> Self {
        TableRef(Rc::clone(&self.0))
    }
}

impl fmt::Debug for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TableRef").field(&self.0).finish()
    }
}

impl Deref for TableRef {
    type Target = RefCell<SymbolTable>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    namespaces: FxHashMap<String, FxHashMap<String, SymbolRef>>,
    parent: Option<TableRef>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    pub fn with_parent(parent: TableRef) -> Self {
        SymbolTable {
            namespaces: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Insert or replace; last write wins.
    pub fn define(&mut self, namespace: &str, symbol: SymbolRef) {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(symbol.name().to_string(), symbol);
    }

    pub fn get_local(&self, namespace: &str, name: &str) -> Option<SymbolRef> {
        self.namespaces
            .get(namespace)
            .and_then(|symbols| symbols.get(name))
            .cloned()
    }

    /// Local table first, then each ancestor in turn.
    pub fn get(&self, namespace: &str, name: &str) -> Option<SymbolRef> {
        if let Some(symbol) = self.get_local(namespace, name) {
            return Some(symbol);
        }
        let mut next = self.parent.clone();
        while let Some(table) = next {
            let table = table.borrow();
            if let Some(symbol) = table.get_local(namespace, name) {
                return Some(symbol);
            }
            next = table.parent.clone();
        }
        None
    }

    pub fn exists(&self, namespace: &str, name: &str) -> bool {
        self.get(namespace, name).is_some()
    }

    /// Symbols defined directly in this table under `namespace`, by name.
    pub fn list_all(&self, namespace: &str) -> Vec<SymbolRef> {
        let mut symbols: Vec<SymbolRef> = self
            .namespaces
            .get(namespace)
            .map(|symbols| symbols.values().cloned().collect())
            .unwrap_or_default();
        symbols.sort_by(|a, b| a.name().cmp(b.name()));
        symbols
    }

    /// Every local symbol, ordered by namespace then name.
    pub fn symbols(&self) -> Vec<(String, SymbolRef)> {
        self.namespaces()
            .into_iter()
            .flat_map(|ns| {
                self.list_all(&ns)
                    .into_iter()
                    .map(move |symbol| (ns.clone(), symbol))
            })
            .collect()
    }

    /// Local symbols under `namespace` whose name starts with `prefix`.
    pub fn list_with_prefix(&self, namespace: &str, prefix: &str) -> Vec<SymbolRef> {
        self.list_all(namespace)
            .into_iter()
            .filter(|symbol| symbol.name().starts_with(prefix))
            .collect()
    }

    /// Namespaces with at least one local symbol, sorted.
    pub fn namespaces(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .namespaces
            .iter()
            .filter(|(_, symbols)| !symbols.is_empty())
            .map(|(ns, _)| ns.clone())
            .collect();
        names.sort();
        names
    }

    pub fn remove(&mut self, namespace: &str, name: &str) -> Option<SymbolRef> {
        self.namespaces
            .get_mut(namespace)
            .and_then(|symbols| symbols.remove(name))
    }

    pub fn clear(&mut self, namespace: &str) {
        self.namespaces.remove(namespace);
    }

    /// Drop every local symbol. The parent link is kept.
    pub fn clear_all(&mut self) {
        self.namespaces.clear();
    }

    pub fn parent(&self) -> Option<TableRef> {
        self.parent.clone()
    }

    /// Number of local symbols across all namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
