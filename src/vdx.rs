//! Configuration text to command tree
//!
//! Processing runs as a pipeline:
//!
//! 1. **Lexing** ([`lexing`]): logos tokens, blank-line normalization and block
//!    resolution
//! 2. **Recognition** ([`parsing`]): the chumsky grammar, producing a
//!    [`ParseTree`]
//! 3. **Building** ([`building`]): reduction into a [`Document`] of
//!    [`CommandNode`]s
//!
//! [`recognize`] stops after step 2, [`build`] runs all three. Both use the
//! default [`ParserConfig`]; use [`Parser`] for anything else.
//!
//! Nesting comes from header and `!` lines only. Indentation is accepted and
//! dropped; the one place it is looked at is the unterminated-block diagnostic.

pub mod ast;
pub mod building;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod snapshot;
pub mod testing;

pub use ast::{CommandLine, CommandNode, Document, NodeKind, Position, Span, Token};
pub use building::build_from_tree;
pub use config::{load_defaults, Loader, ParserConfig, RenderConfig, VdxConfig, MAX_DEPTH_CEILING};
pub use error::{InternalError, Location, ParseError, SyntaxError, SyntaxErrorKind};
pub use formats::{to_config_string, FormatRegistry};
pub use parsing::{ParseNode, ParseTree, Parser};
pub use snapshot::{ConfigSnapshot, Revision};

/// Run the grammar over `text` with the default configuration
pub fn recognize(text: &str) -> Result<ParseTree, ParseError> {
    Parser::default().recognize(text)
}

/// Parse `text` into a command tree with the default configuration
pub fn build(text: &str) -> Result<Document, ParseError> {
    Parser::default().build(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_recognize_agree() {
        let source = "fcoe\n fabric-map default\n  vlan 1002\n !\n!\n";
        let tree = recognize(source).expect("recognizes");
        let doc = build(source).expect("builds");
        assert_eq!(build_from_tree(&tree), Ok(doc.clone()));
        assert_eq!(tree.terminator_count(), doc.block_count());
    }

    #[test]
    fn test_errors_are_located() {
        let err = build("hostname sw1\n!\n").unwrap_err();
        assert!(err.to_string().starts_with("syntax error at line 2, column 1: "));
    }
}
