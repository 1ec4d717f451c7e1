//! JavaScript/JSX parser and AST types for the r19 linter.
//!
//! The tree is stored in a `NodeArena` and addressed by `NodeIndex`. Every
//! node carries its byte range, its parent and a closed `NodeData` variant,
//! so consumers match exhaustively on node shapes instead of probing an
//! open bag of properties.

pub mod parser;

pub use parser::{
    NodeArena, NodeData, NodeIndex, NodeKind, NodeList, ParseDiagnostic, ParseResult, ParserState,
    parse,
};
