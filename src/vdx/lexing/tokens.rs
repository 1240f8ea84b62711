//! Token definitions for configuration text
//!
//! The raw tokens are produced by logos. `Indent` and `BlockOpen` are synthetic:
//! they never come out of the logos lexer and are inserted by the later token
//! passes (see [`super::blank_lines`] and [`super::block_resolution`]).
use logos::Logos;
use std::ops::Range;

/// Type alias for token with its byte range in the source
pub type TokenLocation = (Token, Range<usize>);

/// All tokens of the configuration dialect
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Token {
    #[token("\n")]
    Newline,

    // Spaces, tabs and carriage returns. Leading runs become `Indent`.
    #[regex(r"[ \t\r\x0C]+")]
    Whitespace,

    // A lone `!`. Longer runs such as `!!` or `!foo` are words.
    #[token("!", priority = 3)]
    Terminator,

    // Everything up to the next run of whitespace
    #[regex(r"[^ \t\r\n\x0C]+")]
    Word,

    // Leading whitespace of a non-blank line (synthetic)
    Indent,

    // Marks a header line that opens a block (synthetic, zero-width)
    BlockOpen,
}

impl Token {
    /// Human-readable name used in syntax errors
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Newline => "line break",
            Token::Whitespace => "whitespace",
            Token::Terminator => "terminator `!`",
            Token::Word => "command token",
            Token::Indent => "indentation",
            Token::BlockOpen => "block header",
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Token::Indent | Token::BlockOpen)
    }

    /// Tokens that may appear after the first token of a line
    pub fn is_text(&self) -> bool {
        matches!(self, Token::Word | Token::Terminator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Result<Token, ()>> {
        Token::lexer(source).collect()
    }

    #[test]
    fn test_header_line() {
        assert_eq!(
            kinds("cee-map default"),
            vec![Ok(Token::Word), Ok(Token::Whitespace), Ok(Token::Word)]
        );
    }

    #[test]
    fn test_terminator_alone() {
        assert_eq!(
            kinds(" !\n"),
            vec![
                Ok(Token::Whitespace),
                Ok(Token::Terminator),
                Ok(Token::Newline)
            ]
        );
    }

    #[test]
    fn test_bang_inside_word_is_a_word() {
        assert_eq!(kinds("!!"), vec![Ok(Token::Word)]);
        assert_eq!(kinds("hello!"), vec![Ok(Token::Word)]);
        assert_eq!(kinds("!motd"), vec![Ok(Token::Word)]);
    }

    #[test]
    fn test_punctuation_stays_inside_words() {
        let mut lexer = Token::lexer("fcmap 0E:FC:00 priority-table 15.0");
        assert_eq!(lexer.next(), Some(Ok(Token::Word)));
        assert_eq!(lexer.slice(), "fcmap");
        lexer.next();
        assert_eq!(lexer.next(), Some(Ok(Token::Word)));
        assert_eq!(lexer.slice(), "0E:FC:00");
        lexer.next();
        assert_eq!(lexer.next(), Some(Ok(Token::Word)));
        assert_eq!(lexer.slice(), "priority-table");
        lexer.next();
        assert_eq!(lexer.next(), Some(Ok(Token::Word)));
        assert_eq!(lexer.slice(), "15.0");
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_crlf_and_tabs_are_whitespace() {
        assert_eq!(
            kinds("vlan\t1002\r\n"),
            vec![
                Ok(Token::Word),
                Ok(Token::Whitespace),
                Ok(Token::Word),
                Ok(Token::Whitespace),
                Ok(Token::Newline)
            ]
        );
    }

    #[test]
    fn test_token_predicates() {
        assert!(Token::Indent.is_synthetic());
        assert!(Token::BlockOpen.is_synthetic());
        assert!(!Token::Word.is_synthetic());

        assert!(Token::Word.is_text());
        assert!(Token::Terminator.is_text());
        assert!(!Token::Whitespace.is_text());
    }
}
