//! Parser for host declaration sources.
//!
//! The parser builds a [`SyntaxTree`] of declarations. It descends into type
//! bodies but treats expressions, statements and types as opaque token runs:
//! their trimmed source text is stored on the node instead of a sub-tree.
//!
//! The host grammar is newline-sensitive. A declaration ends at the first
//! token that starts a new line, unless that token (or the one before it)
//! continues the current line, such as a leading `->` or a trailing operator.

use log::trace;

use crate::decl::{
    Attribute, BindingKind, Decl, EffectSpecifiers, FunctionDecl, Modifier, OtherDecl, Parameter,
    Pattern, PatternBinding, TypeDecl, TypeKind, VariableDecl, is_modifier_keyword,
};
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::tree::{NodeId, SyntaxTree};

/// Parser for host source code.
pub struct Parser<'src> {
    /// Source text (for sub-tree text and error messages).
    source: &'src str,
    /// Tokens with trivia removed, ending in `Eof`.
    tokens: Vec<Token>,
    /// Index of the current token.
    position: usize,
    /// Byte offset just past the last consumed token.
    last_end: usize,
    /// Returned when reading past the end.
    eof: Token,
    /// Tree under construction.
    tree: SyntaxTree,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut tokens = Vec::new();
        let mut pending_newline = false;
        for token in Lexer::tokenize_all(source) {
            if token.kind.is_trivia() {
                pending_newline |= token.newline_before;
                continue;
            }
            let newline = token.newline_before || pending_newline;
            pending_newline = false;
            tokens.push(token.with_newline_before(newline));
        }

        let end = source.len();
        Self {
            source,
            tokens,
            position: 0,
            last_end: 0,
            eof: Token::new(TokenKind::Eof, Span::new(end, end, 1, 1)),
            tree: SyntaxTree::new(),
        }
    }

    /// Parses the whole source into a tree.
    ///
    /// # Errors
    /// Returns an error if the source cannot be parsed.
    pub fn parse(mut self) -> Result<SyntaxTree> {
        let root = self.tree.root();
        self.parse_members(root, false)?;
        let end = self.source.len();
        self.tree.node_mut(root)?.span = Span::at_start().until(end);
        Ok(self.tree)
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Parses declarations until `}` (when `braced`) or end of input.
    fn parse_members(&mut self, parent: NodeId, braced: bool) -> Result<()> {
        loop {
            match self.current().kind {
                TokenKind::Eof if braced => {
                    return Err(self.error("unterminated declaration body, expected '}'"));
                }
                TokenKind::Eof => return Ok(()),
                TokenKind::RBrace if braced => return Ok(()),
                TokenKind::RBrace => return Err(self.error("unexpected '}'")),
                TokenKind::Semicolon => {
                    self.advance();
                }
                _ => self.parse_declaration(parent)?,
            }
        }
    }

    /// Parses one declaration and attaches it to `parent`.
    fn parse_declaration(&mut self, parent: NodeId) -> Result<()> {
        let start = self.current().span;

        if let TokenKind::Pound(directive) = &self.current().kind {
            if matches!(directive.as_str(), "if" | "elseif" | "else" | "endif") {
                self.skip_line();
                return Ok(());
            }
        }

        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_modifiers()?;

        let keyword = match &self.current().kind {
            TokenKind::Ident(word) => word.clone(),
            TokenKind::Error(message) => return Err(self.error(message)),
            _ => String::new(),
        };

        if let Some(kind) = TypeKind::from_keyword(&keyword) {
            return self.parse_type_decl(parent, start, kind, attributes, modifiers);
        }
        match keyword.as_str() {
            "var" | "let" => self.parse_variable_decl(parent, start, attributes, modifiers),
            "func" => self.parse_function_decl(parent, start, attributes, modifiers),
            _ => self.parse_other_decl(parent, start, attributes, modifiers),
        }
    }

    /// Parses `@name` and `@name(arguments)` attributes.
    fn parse_attributes(&mut self) -> Result<Vec<Attribute>> {
        let mut attributes = Vec::new();
        while self.current().kind == TokenKind::At {
            self.advance();
            let mut name = self.expect_ident("attribute name")?;
            while self.current().kind == TokenKind::Dot && self.is_adjacent() {
                self.advance();
                name.push('.');
                name.push_str(&self.expect_ident("attribute name")?);
            }
            let arguments = if self.current().kind == TokenKind::LParen && self.is_adjacent() {
                let span = self.skip_group()?;
                Some(self.inner_text(span))
            } else {
                None
            };
            attributes.push(Attribute { name, arguments });
        }
        Ok(attributes)
    }

    /// Parses declaration modifiers such as `public` or `private(set)`.
    fn parse_modifiers(&mut self) -> Result<Vec<Modifier>> {
        let mut modifiers = Vec::new();
        loop {
            let TokenKind::Ident(word) = &self.current().kind else {
                break;
            };
            if !is_modifier_keyword(word) {
                break;
            }
            // `class` is a modifier only in front of another declaration keyword.
            if word == "class" && !self.class_is_modifier() {
                break;
            }
            let name = word.clone();
            self.advance();
            let detail = if self.current().kind == TokenKind::LParen && self.is_adjacent() {
                let span = self.skip_group()?;
                Some(self.inner_text(span))
            } else {
                None
            };
            modifiers.push(Modifier { name, detail });
        }
        Ok(modifiers)
    }

    /// Returns true if the `class` at the cursor is a modifier.
    fn class_is_modifier(&self) -> bool {
        match &self.peek(1).kind {
            TokenKind::Ident(next) => {
                matches!(next.as_str(), "func" | "var" | "let" | "subscript")
                    || is_modifier_keyword(next)
            }
            _ => false,
        }
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    /// Parses a type declaration and its members.
    fn parse_type_decl(
        &mut self,
        parent: NodeId,
        start: Span,
        kind: TypeKind,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<()> {
        self.advance(); // keyword

        let name = if kind == TypeKind::Extension {
            let span = self
                .capture_until(false, |token, _| {
                    matches!(token.kind, TokenKind::Colon | TokenKind::LBrace)
                        || token.is_ident("where")
                })
                .ok_or_else(|| self.error("expected extended type name"))?;
            self.text(span)
        } else {
            self.expect_ident("type name")?
        };

        let generic_params = if self.current().kind == TokenKind::LAngle {
            let span = self.skip_angle_group()?;
            Some(self.text(span))
        } else {
            None
        };

        let inheritance = if self.current().kind == TokenKind::Colon {
            self.advance();
            self.capture_until(false, |token, _| {
                token.kind == TokenKind::LBrace || token.is_ident("where")
            })
            .map(|span| self.text(span))
        } else {
            None
        };

        let where_clause = self.parse_where_clause(false);

        if self.current().kind != TokenKind::LBrace {
            return Err(self.error(&format!(
                "expected '{{' after {} header, found {}",
                kind.keyword(),
                self.current().kind.name()
            )));
        }

        let decl = TypeDecl {
            kind,
            name,
            attributes,
            modifiers,
            generic_params,
            inheritance,
            where_clause,
        };
        let id = self.tree.add(parent, Decl::Type(decl), start)?;

        self.advance(); // '{'
        self.parse_members(id, true)?;
        self.advance(); // '}'

        self.tree.node_mut(id)?.span = start.until(self.last_end);
        Ok(())
    }

    // =========================================================================
    // Variable declarations
    // =========================================================================

    /// Parses a `var`/`let` declaration with one or more bindings.
    fn parse_variable_decl(
        &mut self,
        parent: NodeId,
        start: Span,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<()> {
        let binding = if self.current().is_ident("var") {
            BindingKind::Var
        } else {
            BindingKind::Let
        };
        self.advance();

        let mut bindings = Vec::new();
        loop {
            bindings.push(self.parse_pattern_binding()?);
            if self.current().kind == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }

        let decl = VariableDecl {
            attributes,
            modifiers,
            binding,
            bindings,
        };
        self.tree
            .add(parent, Decl::Variable(decl), start.until(self.last_end))?;
        Ok(())
    }

    /// Parses `pattern: Type = initializer { accessors }`.
    fn parse_pattern_binding(&mut self) -> Result<PatternBinding> {
        let pattern = match &self.current().kind {
            TokenKind::Ident(name) if name == "_" => {
                self.advance();
                Pattern::Wildcard
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Pattern::Identifier(name)
            }
            TokenKind::LParen => {
                let span = self.skip_group()?;
                Pattern::Tuple(self.text(span))
            }
            _ => return Err(self.error("expected a binding pattern")),
        };

        let type_annotation = if self.current().kind == TokenKind::Colon {
            self.advance();
            let span = self
                .capture_until(true, |token, _| {
                    matches!(
                        token.kind,
                        TokenKind::Equals | TokenKind::Comma | TokenKind::Semicolon | TokenKind::LBrace
                    )
                })
                .ok_or_else(|| self.error("expected a type annotation"))?;
            Some(self.text(span))
        } else {
            None
        };

        let initializer = if self.current().kind == TokenKind::Equals {
            self.advance();
            let span = self
                .capture_until(true, |token, next| {
                    matches!(token.kind, TokenKind::Comma | TokenKind::Semicolon)
                        || (token.kind == TokenKind::LBrace
                            && (next.is_ident("willSet") || next.is_ident("didSet")))
                })
                .ok_or_else(|| self.error("expected an initializer expression"))?;
            Some(self.text(span))
        } else {
            None
        };

        let accessors = if self.current().kind == TokenKind::LBrace {
            let span = self.skip_group()?;
            Some(self.text(span))
        } else {
            None
        };

        Ok(PatternBinding {
            pattern,
            type_annotation,
            initializer,
            accessors,
        })
    }

    // =========================================================================
    // Function declarations
    // =========================================================================

    /// Parses a `func` declaration.
    fn parse_function_decl(
        &mut self,
        parent: NodeId,
        start: Span,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<()> {
        self.advance(); // 'func'

        let name = self.parse_function_name()?;

        let generic_params = if self.current().kind == TokenKind::LAngle && self.is_adjacent() {
            let span = self.skip_angle_group()?;
            Some(self.text(span))
        } else {
            None
        };

        if self.current().kind != TokenKind::LParen {
            return Err(self.error(&format!(
                "expected '(' after function name `{name}`, found {}",
                self.current().kind.name()
            )));
        }
        let first = self.position + 1;
        let clause_span = self.skip_group()?;
        let last = self.position - 1;
        let parameter_clause = self.text(clause_span);
        let parameters = self.parse_parameters(first, last)?;

        let effects = self.parse_effects()?;

        let return_type = if self.current().kind == TokenKind::Arrow {
            self.advance();
            let span = self
                .capture_until(true, |token, _| {
                    matches!(token.kind, TokenKind::LBrace | TokenKind::Semicolon)
                        || token.is_ident("where")
                })
                .ok_or_else(|| self.error("expected a return type"))?;
            Some(self.text(span))
        } else {
            None
        };

        let where_clause = self.parse_where_clause(true);

        let body = if self.current().kind == TokenKind::LBrace {
            let span = self.skip_group()?;
            Some(self.inner_text(span))
        } else {
            None
        };

        let decl = FunctionDecl {
            attributes,
            modifiers,
            name,
            generic_params,
            parameter_clause,
            parameters,
            effects,
            return_type,
            where_clause,
            body,
        };
        self.tree
            .add(parent, Decl::Function(decl), start.until(self.last_end))?;
        Ok(())
    }

    /// Parses a function name: an identifier or an operator.
    fn parse_function_name(&mut self) -> Result<String> {
        if let TokenKind::Ident(name) = &self.current().kind {
            let name = name.clone();
            self.advance();
            return Ok(name);
        }
        if !self.current().kind.is_operator_like() {
            return Err(self.error("expected a function name"));
        }
        let start = self.current().span;
        self.advance();
        while self.current().kind.is_operator_like() && self.is_adjacent() {
            self.advance();
        }
        Ok(self.text(start.until(self.last_end)))
    }

    /// Parses the parameters between token indices `first` and `last` (exclusive).
    fn parse_parameters(&self, first: usize, last: usize) -> Result<Vec<Parameter>> {
        let tokens = self.tokens.get(first..last).unwrap_or(&[]);
        split_top_level(tokens, |token| token.kind == TokenKind::Comma)
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .map(|segment| self.parameter_from_tokens(segment))
            .collect()
    }

    /// Builds one parameter from its tokens.
    fn parameter_from_tokens(&self, tokens: &[Token]) -> Result<Parameter> {
        let parts = split_top_level(tokens, |token| token.kind == TokenKind::Colon);
        let (names, rest) = match parts.as_slice() {
            [names, ..] if parts.len() >= 2 => (*names, &tokens[names.len() + 1..]),
            _ => return Err(self.error_at(tokens[0].span, "expected ':' in parameter")),
        };

        let names: Vec<&str> = names
            .iter()
            .filter_map(|token| match &token.kind {
                TokenKind::Ident(name) => Some(name.as_str()),
                _ => None,
            })
            .collect();
        let (first_name, second_name) = match names.as_slice() {
            [only] => ((*only).to_string(), None),
            [label, name] => ((*label).to_string(), Some((*name).to_string())),
            _ => return Err(self.error_at(tokens[0].span, "malformed parameter name")),
        };

        let type_and_default = split_top_level(rest, |token| token.kind == TokenKind::Equals);
        let mut type_tokens = type_and_default.first().copied().unwrap_or(&[]);
        let default_value = if type_and_default.len() > 1 {
            let default_tokens = &rest[type_tokens.len() + 1..];
            Some(self.tokens_text(default_tokens))
        } else {
            None
        };

        let is_inout = type_tokens.first().is_some_and(|t| t.is_ident("inout"));
        if is_inout {
            type_tokens = &type_tokens[1..];
        }
        if type_tokens.is_empty() {
            return Err(self.error_at(tokens[0].span, "expected a parameter type"));
        }
        let is_variadic = type_tokens
            .last()
            .is_some_and(|t| t.kind == TokenKind::Ellipsis);
        let is_autoclosure = type_tokens
            .windows(2)
            .any(|pair| pair[0].kind == TokenKind::At && pair[1].is_ident("autoclosure"));

        Ok(Parameter {
            first_name,
            second_name,
            type_annotation: self.tokens_text(type_tokens),
            default_value,
            is_inout,
            is_variadic,
            is_autoclosure,
        })
    }

    /// Parses `async`/`reasync` and `throws`/`rethrows`/`throws(E)`.
    fn parse_effects(&mut self) -> Result<EffectSpecifiers> {
        let mut effects = EffectSpecifiers::default();
        loop {
            let current = self.current();
            if current.is_ident("async") || current.is_ident("reasync") {
                let span = current.span;
                self.advance();
                effects.async_keyword = Some(self.text(span));
            } else if current.is_ident("throws") || current.is_ident("rethrows") {
                let span = current.span;
                self.advance();
                if self.current().kind == TokenKind::LParen && self.is_adjacent() {
                    self.skip_group()?;
                }
                effects.throws_clause = Some(self.text(span.until(self.last_end)));
            } else {
                return Ok(effects);
            }
        }
    }

    /// Parses an optional `where` clause, returning its requirements.
    fn parse_where_clause(&mut self, stop_at_newline: bool) -> Option<String> {
        if !self.current().is_ident("where") {
            return None;
        }
        self.advance();
        self.capture_until(stop_at_newline, |token, _| {
            matches!(token.kind, TokenKind::LBrace | TokenKind::Semicolon)
        })
        .map(|span| self.text(span))
    }

    // =========================================================================
    // Other declarations
    // =========================================================================

    /// Skips a declaration the tree does not model in detail.
    fn parse_other_decl(
        &mut self,
        parent: NodeId,
        start: Span,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<()> {
        let keyword = match &self.current().kind {
            TokenKind::Ident(word) => word.clone(),
            TokenKind::Pound(name) => format!("#{name}"),
            TokenKind::Eof | TokenKind::RBrace => String::new(),
            _ => self.current().text(self.source).to_string(),
        };
        if !matches!(self.current().kind, TokenKind::Eof | TokenKind::RBrace) {
            if self.current().closes_group() {
                return Err(self.error(&format!("unexpected {}", self.current().kind.name())));
            }
            if self.current().opens_group() {
                self.skip_group()?;
            } else {
                self.advance();
            }
            self.capture_until(true, |token, _| token.kind == TokenKind::Semicolon);
        }
        trace!("skipped `{keyword}` declaration at {}:{}", start.line, start.column);

        let decl = OtherDecl {
            keyword,
            attributes,
            modifiers,
        };
        self.tree
            .add(parent, Decl::Other(decl), start.until(self.last_end))?;
        Ok(())
    }

    /// Skips the remaining tokens of the current line.
    fn skip_line(&mut self) {
        self.advance();
        while !self.current().newline_before && self.current().kind != TokenKind::Eof {
            self.advance();
        }
    }

    // =========================================================================
    // Token runs
    // =========================================================================

    /// Consumes tokens until `stop` matches at nesting depth zero.
    ///
    /// Groups are consumed whole, generic angle brackets are tracked, and an
    /// unmatched closing delimiter always stops. With `stop_at_newline`, a
    /// token starting a new line stops too unless it continues the line.
    /// Returns the span of the consumed tokens, or `None` if none were.
    fn capture_until(
        &mut self,
        stop_at_newline: bool,
        stop: impl Fn(&Token, &Token) -> bool,
    ) -> Option<Span> {
        let start = self.current().span;
        let mut consumed = false;
        let mut angle_depth = 0usize;

        loop {
            let current = self.current();
            if current.kind == TokenKind::Eof || current.closes_group() {
                break;
            }
            if angle_depth == 0 {
                if stop(current, self.peek(1)) {
                    break;
                }
                if stop_at_newline && consumed && current.newline_before && !self.continues_line()
                {
                    break;
                }
            }

            let opens_angle =
                current.kind == TokenKind::LAngle && (self.is_adjacent() || angle_depth > 0);
            let closes_angle = current.kind == TokenKind::RAngle && angle_depth > 0;
            if current.opens_group() {
                if self.skip_group().is_err() {
                    break;
                }
            } else {
                if opens_angle {
                    angle_depth += 1;
                } else if closes_angle {
                    angle_depth -= 1;
                }
                self.advance();
            }
            consumed = true;
        }

        consumed.then(|| start.until(self.last_end))
    }

    /// Returns true if the current token, which starts a new line, continues
    /// the previous one.
    fn continues_line(&self) -> bool {
        let current = self.current();
        let leading = matches!(
            current.kind,
            TokenKind::Arrow
                | TokenKind::Dot
                | TokenKind::Operator(_)
                | TokenKind::Equals
                | TokenKind::LBrace
                | TokenKind::Question
        ) || current.is_ident("where")
            || current.is_ident("throws")
            || current.is_ident("async");
        let trailing = self.position.checked_sub(1).and_then(|i| self.tokens.get(i)).is_some_and(
            |previous| {
                matches!(
                    previous.kind,
                    TokenKind::Operator(_)
                        | TokenKind::Equals
                        | TokenKind::Arrow
                        | TokenKind::Comma
                        | TokenKind::Colon
                        | TokenKind::Dot
                        | TokenKind::At
                )
            },
        );
        leading || trailing
    }

    /// Consumes a balanced `(...)`, `[...]` or `{...}` group.
    fn skip_group(&mut self) -> Result<Span> {
        let start = self.current().span;
        let mut expected = Vec::new();
        loop {
            let current = self.current();
            if current.kind == TokenKind::Eof {
                return Err(self.error_at(start, "unterminated group"));
            }
            if let Some(closer) = closing_delimiter(&current.kind) {
                expected.push(closer);
            } else if current.closes_group() {
                if expected.pop().as_ref() != Some(&current.kind) {
                    return Err(self.error(&format!("mismatched {}", current.kind.name())));
                }
            }
            self.advance();
            if expected.is_empty() {
                return Ok(start.until(self.last_end));
            }
        }
    }

    /// Consumes a balanced `<...>` group.
    fn skip_angle_group(&mut self) -> Result<Span> {
        let start = self.current().span;
        let mut depth = 0usize;
        loop {
            let current = self.current();
            if current.kind == TokenKind::Eof {
                return Err(self.error_at(start, "unterminated generic clause"));
            }
            if current.closes_group() {
                return Err(self.error("unbalanced generic clause"));
            }
            if current.opens_group() {
                self.skip_group()?;
                continue;
            }
            if current.kind == TokenKind::LAngle {
                depth += 1;
            } else if current.kind == TokenKind::RAngle {
                depth = depth.saturating_sub(1);
            }
            self.advance();
            if depth == 0 {
                return Ok(start.until(self.last_end));
            }
        }
    }

    // =========================================================================
    // Cursor helpers
    // =========================================================================

    /// Returns the current token.
    fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the token `n` positions ahead.
    fn peek(&self, n: usize) -> &Token {
        self.tokens.get(self.position + n).unwrap_or(&self.eof)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if let Some(token) = self.tokens.get(self.position) {
            if token.kind != TokenKind::Eof {
                self.last_end = token.span.end;
                self.position += 1;
            }
        }
    }

    /// Returns true if the current token directly follows the previous one.
    fn is_adjacent(&self) -> bool {
        self.position > 0 && self.current().span.start == self.last_end
    }

    /// Expects an identifier, then advances.
    fn expect_ident(&mut self, what: &str) -> Result<String> {
        if let TokenKind::Ident(name) = &self.current().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error(&format!(
                "expected {what}, found {}",
                self.current().kind.name()
            )))
        }
    }

    /// Returns the trimmed source text of a span.
    fn text(&self, span: Span) -> String {
        span.text(self.source).trim().to_string()
    }

    /// Returns the trimmed text inside a delimited group span.
    fn inner_text(&self, span: Span) -> String {
        if span.len() < 2 {
            return String::new();
        }
        Span::new(span.start + 1, span.end - 1, span.line, span.column)
            .text(self.source)
            .trim()
            .to_string()
    }

    /// Returns the trimmed source text covered by a token run.
    fn tokens_text(&self, tokens: &[Token]) -> String {
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => self.text(first.span.until(last.span.end)),
            _ => String::new(),
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current().span, message)
    }

    /// Creates a parse error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::parse(message, span.line, span.column, self.context_at(span))
    }

    /// Gets the source line containing a span.
    fn context_at(&self, span: Span) -> String {
        let start = span.start.min(self.source.len());
        let line_start = self.source[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.source[start..]
            .find('\n')
            .map_or(self.source.len(), |i| start + i);

        self.source[line_start..line_end].to_string()
    }
}

/// Returns the token that closes a group opened by `kind`.
fn closing_delimiter(kind: &TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::LParen => Some(TokenKind::RParen),
        TokenKind::LBracket => Some(TokenKind::RBracket),
        TokenKind::LBrace => Some(TokenKind::RBrace),
        _ => None,
    }
}

/// Splits a token run at separators that sit outside any group.
///
/// Past a top-level `=` the run is an expression, where `<` only opens a
/// generic argument list if [`closes_generic_arguments`] finds its `>`.
fn split_top_level(tokens: &[Token], is_separator: impl Fn(&Token) -> bool) -> Vec<&[Token]> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut angle_depth = 0usize;
    let mut in_expression = false;
    let mut segment_start = 0;
    let mut previous_end = None;

    for (index, token) in tokens.iter().enumerate() {
        let adjacent = previous_end == Some(token.span.start);
        previous_end = Some(token.span.end);
        let top_level = depth == 0 && angle_depth == 0;
        match token.kind {
            _ if token.opens_group() => depth += 1,
            _ if token.closes_group() => depth = depth.saturating_sub(1),
            TokenKind::LAngle
                if (adjacent || angle_depth > 0)
                    && (!in_expression || closes_generic_arguments(&tokens[index + 1..])) =>
            {
                angle_depth += 1;
            }
            TokenKind::RAngle if angle_depth > 0 => angle_depth -= 1,
            _ if top_level && is_separator(token) => {
                segments.push(&tokens[segment_start..index]);
                segment_start = index + 1;
                in_expression = token.kind == TokenKind::Equals;
            }
            TokenKind::Equals if top_level => in_expression = true,
            _ => {}
        }
    }
    segments.push(&tokens[segment_start..]);
    segments
}

/// Returns true if `tokens`, which follow a `<`, contain its closing `>`
/// before anything a generic argument list cannot hold.
fn closes_generic_arguments(tokens: &[Token]) -> bool {
    let mut depth = 0usize;
    let mut angle_depth = 1usize;
    for token in tokens {
        if token.opens_group() {
            depth += 1;
        } else if token.closes_group() {
            if depth == 0 {
                return false;
            }
            depth -= 1;
        } else if depth == 0 {
            match token.kind {
                TokenKind::LAngle => angle_depth += 1,
                TokenKind::RAngle => {
                    angle_depth -= 1;
                    if angle_depth == 0 {
                        return true;
                    }
                }
                TokenKind::Colon | TokenKind::Equals | TokenKind::Semicolon => return false,
                _ => {}
            }
        }
    }
    false
}

/// Parses source code into a declaration tree.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<SyntaxTree> {
    Parser::new(source).parse()
}
