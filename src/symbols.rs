//! Flat symbol table binding identifiers to the expression that defines them.
//!
//! Bindings live in an append‑only arena.  A name maps to the index of its
//! latest binding; declaring or assigning the name again pushes a new binding
//! and moves the name, so a [`BindingId`] handed out earlier keeps resolving
//! to the expression it was created for.  There are no nested scopes: a
//! binding made inside a block is visible everywhere once it exists.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::ast::Expr;
use crate::error::{CompileError, Result};

/// Index of a binding inside a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BindingId(usize);

impl BindingId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One entry of the table: a name and the expression it was bound to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SymbolTable {
    bindings: Vec<Binding>,
    current: BTreeMap<String, BindingId>,
    #[serde(skip)]
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding without complaint.
    pub fn declare(&mut self, name: &str, value: Expr) -> BindingId {
        let id: BindingId = self.push(name, value);

        debug!("Declared '{}' as binding #{}", name, id.index());

        id
    }

    /// Rebind an existing `name` to `value`.
    ///
    /// Fails with `UndeclaredIdentifier` when `name` was never declared.
    /// `line` is only used for the diagnostic.
    pub fn assign(&mut self, name: &str, value: Expr, line: usize) -> Result<BindingId> {
        if !self.contains(name) {
            return Err(CompileError::undeclared(line, name));
        }

        let id: BindingId = self.push(name, value);

        debug!("Assigned '{}' as binding #{}", name, id.index());

        Ok(id)
    }

    /// The binding currently associated with `name`.
    pub fn lookup(&self, name: &str) -> Option<BindingId> {
        self.current.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.current.contains_key(name)
    }

    /// Resolve an id handed out by [`declare`](Self::declare) or
    /// [`assign`](Self::assign).
    pub fn resolve(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id.index())
    }

    /// The latest binding of `name`.
    pub fn current(&self, name: &str) -> Option<&Binding> {
        self.lookup(name).and_then(|id| self.resolve(id))
    }

    /// Number of distinct names ever declared.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Declared names, in first‑declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    fn push(&mut self, name: &str, value: Expr) -> BindingId {
        let id = BindingId(self.bindings.len());

        self.bindings.push(Binding {
            name: name.to_owned(),
            value,
        });
        if self.current.insert(name.to_owned(), id).is_none() {
            self.order.push(name.to_owned());
        }

        id
    }
}

#[cfg(test)]
mod symbols_tests {
    use super::*;

    #[test]
    fn declare_then_lookup() {
        let mut table = SymbolTable::new();
        let id = table.declare("x", Expr::Integer(1));

        assert_eq!(table.lookup("x"), Some(id));
        assert_eq!(table.current("x").map(|b| &b.value), Some(&Expr::Integer(1)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn redeclaration_replaces_but_keeps_old_binding() {
        let mut table = SymbolTable::new();
        let first = table.declare("x", Expr::Integer(1));
        let second = table.declare("x", Expr::Integer(2));

        assert_ne!(first, second);
        assert_eq!(table.lookup("x"), Some(second));
        assert_eq!(table.resolve(first).map(|b| &b.value), Some(&Expr::Integer(1)));
        assert_eq!(table.resolve(second).map(|b| &b.value), Some(&Expr::Integer(2)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn assign_requires_declaration() {
        let mut table = SymbolTable::new();
        let err = table.assign("z", Expr::Integer(5), 3).unwrap_err();

        assert!(matches!(
            err,
            CompileError::UndeclaredIdentifier { ref name, line: 3 } if name == "z"
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn assign_overwrites_existing() {
        let mut table = SymbolTable::new();
        table.declare("y", Expr::Boolean(false));
        let id = table.assign("y", Expr::Boolean(true), 1).unwrap();

        assert_eq!(table.lookup("y"), Some(id));
        assert_eq!(table.current("y").map(|b| &b.value), Some(&Expr::Boolean(true)));
    }

    #[test]
    fn names_in_declaration_order() {
        let mut table = SymbolTable::new();
        table.declare("b", Expr::Integer(0));
        table.declare("a", Expr::Integer(0));
        table.declare("b", Expr::Integer(1));

        assert_eq!(table.names(), vec!["b", "a"]);
    }

    #[test]
    fn reassignment_keeps_one_name_entry() {
        let mut table = SymbolTable::new();
        table.declare("i", Expr::Integer(0));

        for n in 1..1000 {
            table.assign("i", Expr::Integer(n), 1).unwrap();
        }
        table.declare("j", Expr::Integer(0));

        assert_eq!(table.names(), vec!["i", "j"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(BindingId(999)).map(|b| &b.value), Some(&Expr::Integer(999)));
    }
}
