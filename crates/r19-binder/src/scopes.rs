//! Lexical scopes.

use r19_parser::NodeIndex;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::symbols::SymbolId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ScopeKind {
    /// The source file.
    Module,
    /// Function, arrow, method or accessor: parameters and body share it.
    Function,
    /// `static { }` inside a class body.
    StaticBlock,
    /// Class body; holds the name of a class expression.
    Class,
    /// Braced block, `for` head or `switch` body.
    Block,
    /// `catch (binding)`.
    Catch,
}

impl ScopeKind {
    /// `var` declarations hoist to the nearest scope of one of these kinds.
    pub fn is_var_container(self) -> bool {
        matches!(
            self,
            ScopeKind::Module | ScopeKind::Function | ScopeKind::StaticBlock
        )
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    /// Node that created the scope.
    pub container: NodeIndex,
    pub table: FxHashMap<String, SymbolId>,
}

impl Scope {
    pub(crate) fn new(parent: Option<ScopeId>, kind: ScopeKind, container: NodeIndex) -> Self {
        Scope {
            parent,
            kind,
            container,
            table: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.table.get(name).copied()
    }

    pub fn has(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }
}
