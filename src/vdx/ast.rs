//! Command tree definitions for parsed configurations
//!
//! ## Modules
//!
//! - `node` - Token, CommandLine, CommandNode and Document
//! - `span` - Position and Span types for source locations
//! - `location` - Byte offset to line/column conversion

pub mod location;
pub mod node;
pub mod span;

pub use location::SourceLocation;
pub use node::{CommandLine, CommandNode, Document, NodeKind, Token, Walk};
pub use span::{Position, Span};
