//! BinderState: the bound scope tree plus name resolution queries.

use r19_parser::{NodeArena, NodeIndex};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::scopes::{Scope, ScopeId};
use crate::symbols::{Symbol, SymbolId};

#[derive(Debug, Default)]
pub struct BinderState {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) symbols: Vec<Symbol>,
    /// Scope-creating node -> scope. A function's body block maps to the
    /// function scope.
    pub(crate) node_scope_ids: FxHashMap<u32, ScopeId>,
    /// Declared identifier node -> symbol.
    pub(crate) node_symbols: FxHashMap<u32, SymbolId>,
    pub(crate) current_scope: Option<ScopeId>,
}

impl BinderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self) {
        self.scopes.clear();
        self.symbols.clear();
        self.node_scope_ids.clear();
        self.node_symbols.clear();
        self.current_scope = None;
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn get_scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    /// The module scope, once a file has been bound.
    pub fn file_scope(&self) -> Option<ScopeId> {
        (!self.scopes.is_empty()).then_some(ScopeId(0))
    }

    /// Scope created by `node` itself, if any.
    pub fn scope_of_node(&self, node: NodeIndex) -> Option<ScopeId> {
        self.node_scope_ids.get(&node.0).copied()
    }

    /// Symbol declared by the identifier `name_node`.
    pub fn symbol_of_declaration_name(&self, name_node: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&name_node.0).copied()
    }

    /// Innermost scope containing `at` (the node itself included).
    pub fn enclosing_scope(&self, arena: &NodeArena, at: NodeIndex) -> Option<ScopeId> {
        std::iter::once(at)
            .chain(arena.ancestors(at))
            .find_map(|node| self.scope_of_node(node))
            .or_else(|| self.file_scope())
    }

    /// Look `name` up in `scope` and then in each enclosing scope.
    pub fn lookup_from_scope(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.get_scope(id)?;
            if let Some(symbol) = scope.get(name) {
                trace!(name, scope = id.0, symbol = symbol.0, "resolved name");
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// Resolve `name` as seen from the node `at`.
    pub fn resolve_name(&self, arena: &NodeArena, name: &str, at: NodeIndex) -> Option<SymbolId> {
        let scope = self.enclosing_scope(arena, at)?;
        self.lookup_from_scope(scope, name)
    }

    /// Whether `name` resolves to nothing from `at` (a global or undeclared
    /// name).
    pub fn is_unresolved(&self, arena: &NodeArena, name: &str, at: NodeIndex) -> bool {
        self.resolve_name(arena, name, at).is_none()
    }
}
