//! Literate preprocessing, tokenization, and the layout-context stack for
//! the Curry front end (C3/C4).
//!
//! [`Lexer::next_token`] is a pull-based, one-token-at-a-time interface: it
//! is meant to be driven by the parser engine in `curry-parser`, which also
//! reaches into the lexer's [`LayoutStack`] via [`Lexer::layout_mut`] to
//! implement the `layoutOn`/`layoutOff`/`layoutEnd` combinators. Keeping the
//! stack inside the lexer (rather than threading it through every parser
//! call) is the decomposition the specification's design notes call for.

mod cursor;
pub mod error;
pub mod layout;
pub mod literate;
mod scan;
pub mod token;

use cursor::Cursor;
use curry_span::Position;

pub use error::{LexError, LexErrorKind, LiterateError, LiterateErrorKind};
pub use layout::LayoutStack;
pub use token::{Token, TokenAttrs, TokenKind};

/// `.curry` is plain, `.lcurry` is literate, `.icurry` is an interface file.
/// Anything else is rejected by the external loader, out of scope here.
pub fn is_literate_extension(file: &str) -> bool {
    file.ends_with(".lcurry")
}

/// One buffered real token awaiting layout resolution (§4.3's "about to
/// deliver a non-virtual token at column c on a new logical line").
#[derive(Clone)]
struct PendingReal {
    token: Token,
    column: i64,
    /// Once we've delivered the one virtual-semicolon this token's
    /// indentation triggered, further polls of this pending token must
    /// bypass the indentation check entirely (else "column == top" would
    /// fire again from the unchanged stack and loop forever).
    resolved: bool,
}

/// Tokenizes a source file, threading the layout-context stack through the
/// column-aware continuation implied by §4.3.
///
/// `Clone` lets the parser engine snapshot-and-restore lexer state for the
/// non-deterministic `alt_long` combinator's trial parses (§4.4).
#[derive(Clone)]
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    layout: LayoutStack,
    pending_real: Option<PendingReal>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, file: impl Into<std::rc::Rc<str>>) -> Self {
        Lexer {
            cursor: Cursor::new(source, file),
            layout: LayoutStack::new(),
            pending_real: None,
        }
    }

    pub fn position(&self) -> &Position {
        self.cursor.position()
    }

    /// The layout stack, mutated by the parser's `layoutOn`/`layoutOff`/
    /// `layoutEnd` combinators.
    pub fn layout_mut(&mut self) -> &mut LayoutStack {
        &mut self.layout
    }

    pub fn layout(&self) -> &LayoutStack {
        &self.layout
    }

    /// Produce the next token, applying the layout rule (§4.3) when the
    /// token begins a new logical line.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            if let Some(pending) = &mut self.pending_real {
                if pending.resolved {
                    let PendingReal { token, .. } = self.pending_real.take().unwrap();
                    return Ok(token);
                }
                let column = pending.column;
                match self.layout.top() {
                    None => {
                        let PendingReal { token, .. } = self.pending_real.take().unwrap();
                        return Ok(token);
                    }
                    Some(top) if top < 0 => {
                        let PendingReal { token, .. } = self.pending_real.take().unwrap();
                        return Ok(token);
                    }
                    Some(top) if column == top => {
                        let pos = self.pending_real.as_ref().unwrap().token.position.clone();
                        self.pending_real.as_mut().unwrap().resolved = true;
                        return Ok(Token::virtual_semicolon(pos));
                    }
                    Some(top) if column < top => {
                        let pos = self.pending_real.as_ref().unwrap().token.position.clone();
                        self.layout.pop();
                        return Ok(Token::virtual_close_brace(pos));
                    }
                    _ => {
                        let PendingReal { token, .. } = self.pending_real.take().unwrap();
                        return Ok(token);
                    }
                }
            }

            let new_line = self.skip_trivia()?;

            if self.cursor.is_eof() {
                if let Some(top) = self.layout.top() {
                    if top > 0 {
                        self.layout.pop();
                        return Ok(Token::virtual_close_brace(self.cursor.position().clone()));
                    }
                    // An explicit block never closed by its `}`: drop the
                    // sentinel silently and keep draining.
                    self.layout.pop();
                    continue;
                }
                return Ok(Token::eof(self.cursor.position().clone()));
            }

            let start_pos = self.cursor.position().clone();
            let column = start_pos.column().unwrap_or(1) as i64;
            let token = scan::scan_token(&mut self.cursor, start_pos)?;

            if new_line {
                self.pending_real = Some(PendingReal {
                    token,
                    column,
                    resolved: false,
                });
                continue;
            }
            return Ok(token);
        }
    }

    /// Skip whitespace and comments; returns whether at least one newline
    /// was crossed. Plain block comments (`{- ... -}`, nestable) are
    /// trivia; a pragma opener (`{-#`) is not -- it stops the skip so
    /// `scan_token` can tokenize the pragma itself.
    fn skip_trivia(&mut self) -> Result<bool, LexError> {
        let mut new_line = false;
        loop {
            match self.cursor.peek() {
                Some('\n') => {
                    new_line = true;
                    self.cursor.advance();
                }
                Some(c) if c.is_whitespace() => {
                    self.cursor.advance();
                }
                Some('{') if self.cursor.peek_next() == Some('-') => {
                    // Peek a third character without consuming to decide
                    // comment vs. pragma.
                    let mut probe = self.cursor_clone_chars();
                    probe.next(); // '{'
                    probe.next(); // '-'
                    if probe.next() == Some('#') {
                        break;
                    }
                    self.skip_block_comment()?;
                }
                Some('-') if self.cursor.peek_next() == Some('-') && !self.is_symbolic_run() => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                _ => break,
            }
        }
        Ok(new_line)
    }

    /// Clone of the remaining character iterator, for short lookahead that
    /// `Cursor` itself doesn't expose.
    fn cursor_clone_chars(&self) -> std::iter::Peekable<std::vec::IntoIter<char>> {
        // `Cursor` only exposes one- and two-character peeks; a 3rd char of
        // lookahead is needed solely to disambiguate `{-#` from `{-`, so
        // collect a short bounded slice instead of widening `Cursor`'s API.
        let rest = self.cursor.slice(self.cursor.byte_pos(), self.cursor.source_len());
        rest.chars().take(4).collect::<Vec<_>>().into_iter().peekable()
    }

    fn is_symbolic_run(&self) -> bool {
        // `--` followed directly by more symbolic characters (e.g. `-->`)
        // is a user operator, not a line comment.
        let mut probe = self.cursor_clone_chars();
        probe.next(); // first '-'
        probe.next(); // second '-'
        matches!(probe.next(), Some(c) if scan::is_symbol_char(c))
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start = self.cursor.position().clone();
        self.cursor.advance(); // '{'
        self.cursor.advance(); // '-'
        let mut depth = 1u32;
        loop {
            match (self.cursor.peek(), self.cursor.peek_next()) {
                (Some('{'), Some('-')) => {
                    self.cursor.advance();
                    self.cursor.advance();
                    depth += 1;
                }
                (Some('-'), Some('}')) => {
                    self.cursor.advance();
                    self.cursor.advance();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                (Some(_), _) => {
                    self.cursor.advance();
                }
                (None, _) => {
                    return Err(LexError::new(LexErrorKind::UnterminatedBlockComment, start));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source, "T.curry");
        lexer.layout_mut().push_column(1);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn lex_simple_equation() {
        let kinds = tokenize("f = 1");
        assert_eq!(
            kinds,
            vec![TokenKind::Ident, TokenKind::Equals, TokenKind::IntLit, TokenKind::Eof]
        );
    }

    #[test]
    fn same_indent_yields_virtual_semicolon() {
        let kinds = tokenize("f = 1\ng = 2");
        assert!(kinds.contains(&TokenKind::VirtualSemicolon));
    }

    #[test]
    fn eof_drains_positive_layout_entries() {
        let mut lexer = Lexer::new("f = 1", "T.curry");
        lexer.layout_mut().push_column(1);
        lexer.layout_mut().push_column(5);
        let mut saw_close = 0;
        loop {
            let tok = lexer.next_token().unwrap();
            if tok.kind == TokenKind::VirtualCloseBrace {
                saw_close += 1;
            }
            if tok.kind == TokenKind::Eof {
                break;
            }
        }
        assert_eq!(saw_close, 2);
        assert!(lexer.layout().is_empty());
    }

    #[test]
    fn block_comments_nest() {
        let kinds = tokenize("{- outer {- inner -} still outer -} f");
        assert_eq!(kinds, vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn line_comments_are_skipped() {
        let kinds = tokenize("f -- trailing comment\n");
        assert_eq!(kinds, vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn dashes_followed_by_symbol_char_are_not_a_comment() {
        let mut lexer = Lexer::new("-->", "T.curry");
        lexer.layout_mut().push_column(1);
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::SymbolicIdent);
    }
}
