//! Lossless concrete syntax tree for CSS-family sources.
//!
//! Every byte of the source belongs to exactly one token; unrecognized input
//! and skipped input are kept as explicit error and recovery nodes.

mod dialect;
mod node;
mod syntax_kind;
mod syntax_set;
mod token;
mod tree;

/// Per-parse dialect selection.
pub use dialect::Dialect;
/// Read-only node handles.
pub use node::SyntaxNode;
/// Token and rule kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use text_size::{TextRange, TextSize};
/// Matched tokens and their offsets.
pub use token::{Token, token_range};
/// Arena storage for the tree.
pub use tree::{NodeData, NodeId, NodeVariant, SyntaxTree};
