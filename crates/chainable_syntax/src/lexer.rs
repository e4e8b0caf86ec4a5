//! Lexer for host declaration sources.
//!
//! The lexer converts source text into a stream of tokens. It understands
//! enough of the host grammar to keep string literals, comments and operators
//! from confusing the parser's brace matching; everything else is left to the
//! parser.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Characters that may form an operator.
const OPERATOR_CHARS: &str = "/=-+!*%<>&|^~?.";

/// Lexer for host source code.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        let newline_before = self.skip_whitespace();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(
                TokenKind::Eof,
                Span::new(start, start, start_line, start_column),
            )
            .with_newline_before(newline_before);
        };

        let kind = match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '<' => self.single(TokenKind::LAngle),
            '>' => self.single(TokenKind::RAngle),
            ':' => self.single(TokenKind::Colon),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '@' => self.single(TokenKind::At),
            '?' => self.single(TokenKind::Question),
            '-' if self.peek_char_n(1) == Some('>') => {
                self.advance();
                self.advance();
                TokenKind::Arrow
            }
            '.' => self.scan_dot(),
            '=' | '!' | '&' => self.scan_punct_or_operator(c),
            '/' if self.peek_char_n(1) == Some('/') => self.scan_line_comment(),
            '/' if self.peek_char_n(1) == Some('*') => self.scan_block_comment(),
            '"' => self.scan_string(0),
            '#' => self.scan_hash(),
            '`' => self.scan_backticked(),
            '$' => {
                self.advance();
                TokenKind::Ident(format!("${}", self.scan_identifier_text()))
            }
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_identifier_start(c) => TokenKind::Ident(self.scan_identifier_text()),
            c if OPERATOR_CHARS.contains(c) => TokenKind::Operator(self.scan_operator_text()),
            c => {
                self.advance();
                TokenKind::Error(format!("unexpected character: {c}"))
            }
        };

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
        )
        .with_newline_before(newline_before)
    }

    /// Tokenizes all source and returns a vector of tokens ending in `Eof`.
    ///
    /// Comments are included in the output.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks `n` characters ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes one character and returns `kind`.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Skips whitespace, returning whether a line break was crossed.
    fn skip_whitespace(&mut self) -> bool {
        let mut crossed_line = false;
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            crossed_line |= c == '\n';
            self.advance();
        }
        crossed_line
    }

    /// Scans `.`, `...` or a dotted operator such as `..<`.
    fn scan_dot(&mut self) -> TokenKind {
        if self.rest.starts_with("...") {
            self.advance();
            self.advance();
            self.advance();
            TokenKind::Ellipsis
        } else if self.rest.starts_with("..") {
            TokenKind::Operator(self.scan_operator_text())
        } else {
            self.advance();
            TokenKind::Dot
        }
    }

    /// Scans `=`, `!` or `&`, or a longer operator starting with one of them.
    fn scan_punct_or_operator(&mut self, c: char) -> TokenKind {
        let continues = match c {
            '=' => matches!(self.peek_char_n(1), Some('=' | '>')),
            '!' => self.peek_char_n(1) == Some('='),
            _ => matches!(self.peek_char_n(1), Some('&' | '=')),
        };
        if continues {
            return TokenKind::Operator(self.scan_operator_text());
        }
        self.advance();
        match c {
            '=' => TokenKind::Equals,
            '!' => TokenKind::Bang,
            _ => TokenKind::Ampersand,
        }
    }

    /// Scans a run of operator characters.
    fn scan_operator_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if !OPERATOR_CHARS.contains(c) {
                break;
            }
            // An operator never swallows the start of a comment.
            if !text.is_empty() && c == '/' && matches!(self.peek_char_n(1), Some('/' | '*')) {
                break;
            }
            text.push(c);
            self.advance();
        }
        text
    }

    /// Scans a `//` comment up to the end of the line.
    fn scan_line_comment(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.advance();
        }
        TokenKind::Comment(text)
    }

    /// Scans a `/* ... */` comment; block comments nest.
    fn scan_block_comment(&mut self) -> TokenKind {
        let mut text = String::new();
        let mut depth = 0usize;
        while let Some(c) = self.peek_char() {
            if self.rest.starts_with("/*") {
                depth += 1;
                text.push_str("/*");
                self.advance();
                self.advance();
            } else if self.rest.starts_with("*/") {
                depth = depth.saturating_sub(1);
                text.push_str("*/");
                self.advance();
                self.advance();
                if depth == 0 {
                    return TokenKind::Comment(text);
                }
            } else {
                text.push(c);
                self.advance();
            }
        }
        TokenKind::Error("unterminated block comment".into())
    }

    /// Scans a string literal whose opening quote is at the cursor.
    ///
    /// `hashes` is the number of `#` already consumed for a raw string.
    fn scan_string(&mut self, hashes: usize) -> TokenKind {
        let start = self.position - hashes;
        let closing_hashes = "#".repeat(hashes);

        if self.rest.starts_with("\"\"\"") {
            self.advance();
            self.advance();
            self.advance();
            let terminator = format!("\"\"\"{closing_hashes}");
            return self.scan_string_body(start, hashes, &terminator, true);
        }

        self.advance();
        let terminator = format!("\"{closing_hashes}");
        self.scan_string_body(start, hashes, &terminator, false)
    }

    /// Scans the body of a string literal up to and including `terminator`.
    fn scan_string_body(
        &mut self,
        start: usize,
        hashes: usize,
        terminator: &str,
        multi_line: bool,
    ) -> TokenKind {
        let escape = format!("\\{}", "#".repeat(hashes));
        loop {
            if self.rest.starts_with(terminator) {
                for _ in 0..terminator.chars().count() {
                    self.advance();
                }
                break;
            }
            match self.peek_char() {
                None => return TokenKind::Error("unterminated string literal".into()),
                Some('\n') if !multi_line => {
                    return TokenKind::Error("unterminated string literal".into());
                }
                Some(_) if self.rest.starts_with(&escape) => {
                    for _ in 0..escape.chars().count() {
                        self.advance();
                    }
                    if self.peek_char() == Some('(') {
                        self.skip_interpolation();
                    } else {
                        self.advance();
                    }
                }
                Some(_) => self.advance(),
            }
        }
        TokenKind::String(self.source[start..self.position].to_string())
    }

    /// Skips a `\( ... )` interpolation, including nested strings.
    fn skip_interpolation(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.peek_char() {
            match c {
                '(' => {
                    depth += 1;
                    self.advance();
                }
                ')' => {
                    self.advance();
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                '"' => {
                    let _ = self.scan_string(0);
                }
                '\n' => return,
                _ => self.advance(),
            }
        }
    }

    /// Scans tokens starting with `#`: raw strings and directives.
    fn scan_hash(&mut self) -> TokenKind {
        let hashes = self.rest.chars().take_while(|&c| c == '#').count();
        if self.rest[hashes..].starts_with('"') {
            for _ in 0..hashes {
                self.advance();
            }
            return self.scan_string(hashes);
        }

        self.advance(); // consume '#'
        match self.peek_char() {
            Some(c) if is_identifier_start(c) => TokenKind::Pound(self.scan_identifier_text()),
            Some(c) => TokenKind::Error(format!("unexpected character after #: {c}")),
            None => TokenKind::Error("unexpected end of input after #".into()),
        }
    }

    /// Scans a backticked identifier, keeping the backticks.
    fn scan_backticked(&mut self) -> TokenKind {
        self.advance(); // consume opening '`'
        let mut text = String::from("`");
        loop {
            match self.peek_char() {
                Some('`') => {
                    self.advance();
                    text.push('`');
                    return TokenKind::Ident(text);
                }
                Some('\n') | None => {
                    return TokenKind::Error("unterminated backticked identifier".into());
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Scans a numeric literal.
    fn scan_number(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            let fraction = c == '.' && self.peek_char_n(1).is_some_and(|n| n.is_ascii_digit());
            if c.is_ascii_alphanumeric() || c == '_' || fraction {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        TokenKind::Number(text)
    }

    /// Scans the text of an identifier.
    fn scan_identifier_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if is_identifier_continue(c) {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}

/// Returns true if `c` can start an identifier.
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns true if `c` can continue an identifier.
fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
