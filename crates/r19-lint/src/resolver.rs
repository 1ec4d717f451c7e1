//! Scope resolution seam.
//!
//! Rules never reach into the binder directly: they ask a
//! [`ScopeResolver`] for the declaration a name refers to, and chase
//! `const B = A` aliases explicitly, one hop at a time.

use r19_binder::BinderState;
use r19_common::limits::MAX_ALIAS_HOPS;
use r19_parser::parser::node::VariableKind;
use r19_parser::{NodeArena, NodeIndex};
use rustc_hash::FxHashSet;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Declaration(NodeIndex),
    NotFound,
}

impl Resolution {
    pub fn declaration(self) -> Option<NodeIndex> {
        match self {
            Resolution::Declaration(decl) => Some(decl),
            Resolution::NotFound => None,
        }
    }
}

pub trait ScopeResolver {
    /// First recorded declaration of `name` in the innermost scope
    /// containing `at` that declares it. Aliases are not followed.
    fn resolve_declaration(&self, name: &str, at: NodeIndex) -> Resolution;
}

/// Resolver backed by a bound file.
pub struct BinderResolver<'a> {
    arena: &'a NodeArena,
    binder: &'a BinderState,
}

impl<'a> BinderResolver<'a> {
    pub fn new(arena: &'a NodeArena, binder: &'a BinderState) -> Self {
        BinderResolver { arena, binder }
    }
}

impl ScopeResolver for BinderResolver<'_> {
    fn resolve_declaration(&self, name: &str, at: NodeIndex) -> Resolution {
        self.binder
            .resolve_name(self.arena, name, at)
            .and_then(|symbol| self.binder.get_symbol(symbol))
            .map(|symbol| symbol.first_declaration())
            .filter(|decl| decl.is_some())
            .map_or(Resolution::NotFound, Resolution::Declaration)
    }
}

/// One alias hop: when `decl` is `const B = A` (with `A` a plain
/// identifier), the aliased name and the identifier node to resolve it at.
pub fn follow_alias(arena: &NodeArena, decl: NodeIndex) -> Option<(&str, NodeIndex)> {
    let declaration = arena.get_variable_declaration(decl)?;
    if arena.declaration_kind(decl) != Some(VariableKind::Const) {
        return None;
    }
    arena.identifier_text(declaration.name)?;
    let target = arena.skip_parentheses(declaration.initializer);
    let name = arena.identifier_text(target)?;
    Some((name, target))
}

/// Result of resolving a name and chasing its aliases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AliasTrace {
    /// Declaration the name itself resolves to.
    pub direct: Resolution,
    /// Declaration at the end of the alias chain. `NotFound` when the
    /// chain leaves the file, loops, or exceeds [`MAX_ALIAS_HOPS`].
    pub target: Resolution,
    /// Number of alias hops taken.
    pub hops: usize,
}

impl AliasTrace {
    pub fn is_aliased(&self) -> bool {
        self.hops > 0
    }
}

/// Resolve `name` at `at`, then follow `const` aliases until a
/// non-alias declaration is reached.
pub fn chase_aliases(
    resolver: &dyn ScopeResolver,
    arena: &NodeArena,
    name: &str,
    at: NodeIndex,
) -> AliasTrace {
    let direct = resolver.resolve_declaration(name, at);
    let mut current = direct;
    let mut hops = 0;
    let mut visited = FxHashSet::default();

    while let Resolution::Declaration(decl) = current {
        if !visited.insert(decl.0) {
            trace!(name, hops, "alias cycle");
            current = Resolution::NotFound;
            break;
        }
        let Some((next_name, next_at)) = follow_alias(arena, decl) else {
            break;
        };
        if hops == MAX_ALIAS_HOPS {
            trace!(name, hops, "alias hop limit reached");
            current = Resolution::NotFound;
            break;
        }
        hops += 1;
        trace!(from = name, to = next_name, hops, "following alias");
        current = resolver.resolve_declaration(next_name, next_at);
    }

    AliasTrace {
        direct,
        target: current,
        hops,
    }
}
