//! Symbols: one per declared name per scope.

use bitflags::bitflags;
use r19_parser::NodeIndex;
use serde::Serialize;
use smallvec::SmallVec;

use crate::scopes::ScopeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

bitflags! {
    /// What kinds of declaration introduced a symbol. Redeclarations OR
    /// their flags into the existing symbol.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u16 {
        const FUNCTION_SCOPED_VARIABLE = 1 << 0;
        const BLOCK_SCOPED_VARIABLE = 1 << 1;
        const CONST = 1 << 2;
        const FUNCTION = 1 << 3;
        const CLASS = 1 << 4;
        const PARAMETER = 1 << 5;
        const IMPORT = 1 << 6;
        const CATCH_VARIABLE = 1 << 7;

        const VARIABLE = Self::FUNCTION_SCOPED_VARIABLE.bits()
            | Self::BLOCK_SCOPED_VARIABLE.bits()
            | Self::CONST.bits();
    }
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub flags: SymbolFlags,
    /// Declaration nodes in source order.
    pub declarations: SmallVec<[NodeIndex; 2]>,
    pub scope: ScopeId,
}

impl Symbol {
    pub(crate) fn new(name: String, flags: SymbolFlags, scope: ScopeId) -> Self {
        Symbol {
            name,
            flags,
            declarations: SmallVec::new(),
            scope,
        }
    }

    /// The declaration resolution reports for this symbol.
    pub fn first_declaration(&self) -> NodeIndex {
        self.declarations.first().copied().unwrap_or(NodeIndex::NONE)
    }

    pub fn has_flags(&self, flags: SymbolFlags) -> bool {
        self.flags.intersects(flags)
    }
}
