//! Scope and symbol binder for the r19 linter.
//!
//! The binder walks a parsed `NodeArena` once and records:
//! - a tree of lexical scopes (module, function, block, class, catch)
//! - one symbol per declared name per scope, with every declaration node
//! - a map from scope-creating nodes to their scope
//!
//! Rules use [`BinderState::resolve_name`] to find the declaration an
//! identifier refers to.

mod scopes;
mod state;
mod state_binding;
mod symbols;

pub use scopes::{Scope, ScopeId, ScopeKind};
pub use state::BinderState;
pub use symbols::{Symbol, SymbolFlags, SymbolId};

/// Bind a whole file in one call.
pub fn bind(arena: &r19_parser::NodeArena, root: r19_parser::NodeIndex) -> BinderState {
    let mut binder = BinderState::new();
    binder.bind_source_file(arena, root);
    binder
}
