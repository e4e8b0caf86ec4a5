//! Token types for host declaration sources.
//!
//! Tokens are the output of the lexer and input to the parser.

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
    /// Whether a line break separates this token from the previous one.
    pub newline_before: bool,
}

impl Token {
    /// Creates a new token on the same line as its predecessor.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            newline_before: false,
        }
    }

    /// Marks whether a line break precedes this token.
    #[must_use]
    pub fn with_newline_before(mut self, newline_before: bool) -> Self {
        self.newline_before = newline_before;
        self
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns true if this token is the identifier or keyword `word`.
    #[must_use]
    pub fn is_ident(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(name) if name == word)
    }

    /// Returns true if this token opens a group (`(`, `[`, `{`).
    #[must_use]
    pub const fn opens_group(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    /// Returns true if this token closes a group.
    #[must_use]
    pub const fn closes_group(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }
}

/// Token types of the host declaration grammar.
///
/// Keywords are not distinguished from identifiers: most of them are
/// contextual in the host language, so the parser matches on the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `<`
    LAngle,
    /// `>`
    RAngle,

    // Punctuation
    /// `->`
    Arrow,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `@`
    At,
    /// `?`
    Question,
    /// `!`
    Bang,
    /// `=`
    Equals,
    /// `&`
    Ampersand,

    // Words and literals
    /// Identifier or keyword, including backticked names and `$0`.
    Ident(String),
    /// Numeric literal, kept as written.
    Number(String),
    /// String literal, kept as written (quotes included).
    String(String),
    /// `#name` directive or freestanding macro, without the `#`.
    Pound(String),
    /// Any other operator, such as `==` or `+=`.
    Operator(String),

    // Meta
    /// Comment text, delimiters included.
    Comment(String),
    /// End of input
    Eof,
    /// Lexer error
    Error(String),
}

impl TokenKind {
    /// Returns true if this token kind should be ignored during parsing.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Returns true for operator-like tokens that may spell an operator name.
    #[must_use]
    pub const fn is_operator_like(&self) -> bool {
        matches!(
            self,
            Self::Operator(_)
                | Self::LAngle
                | Self::RAngle
                | Self::Question
                | Self::Bang
                | Self::Equals
                | Self::Ampersand
                | Self::Dot
                | Self::Ellipsis
        )
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LAngle => "'<'",
            Self::RAngle => "'>'",
            Self::Arrow => "'->'",
            Self::Colon => "':'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Ellipsis => "'...'",
            Self::At => "'@'",
            Self::Question => "'?'",
            Self::Bang => "'!'",
            Self::Equals => "'='",
            Self::Ampersand => "'&'",
            Self::Ident(_) => "identifier",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Pound(_) => "directive",
            Self::Operator(_) => "operator",
            Self::Comment(_) => "comment",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_ident() {
        let token = Token::new(TokenKind::Ident("func".into()), Span::new(0, 4, 1, 1));
        assert!(token.is_ident("func"));
        assert!(!token.is_ident("var"));
    }

    #[test]
    fn token_groups() {
        assert!(Token::new(TokenKind::LBrace, Span::at_start()).opens_group());
        assert!(Token::new(TokenKind::RParen, Span::at_start()).closes_group());
        assert!(!Token::new(TokenKind::LAngle, Span::at_start()).opens_group());
    }

    #[test]
    fn token_newline_flag() {
        let token = Token::new(TokenKind::Colon, Span::at_start()).with_newline_before(true);
        assert!(token.newline_before);
    }

    #[test]
    fn token_kind_name() {
        assert_eq!(TokenKind::Arrow.name(), "'->'");
        assert_eq!(TokenKind::Ident("x".into()).name(), "identifier");
        assert!(TokenKind::Comment("// x".into()).is_trivia());
        assert!(TokenKind::Operator("==".into()).is_operator_like());
    }
}
