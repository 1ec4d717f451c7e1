//! Parser module
//!
//! - `base` - `NodeIndex` / `NodeList`
//! - `node` - node payloads, `NodeData` and `NodeKind`
//! - `node_arena` - storage and typed accessors
//! - `state*` - the recursive-descent `ParserState`

pub mod base;
pub mod node;
mod node_arena;
mod state;
mod state_expressions;
mod state_jsx;
mod state_statements;

pub use base::{NodeIndex, NodeList};
pub use node::{Node, NodeData, NodeKind};
pub use node_arena::NodeArena;
pub use state::{ParseDiagnostic, ParseResult, ParserState, parse};
