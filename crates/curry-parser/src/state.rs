//! Parser state: a lexer with one token of lookahead cached, plus the
//! fixity table built from `infixl`/`infixr`/`infix` declarations seen so
//! far (consulted by the expression grammar's precedence climb).

use rustc_hash::FxHashMap;

use curry_lexer::{LayoutStack, LexError, Lexer, Token, TokenKind};
use curry_span::Position;

use crate::error::{ParseError, ParseErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
    None,
}

#[derive(Debug, Clone, Copy)]
pub struct Fixity {
    pub assoc: Assoc,
    pub precedence: u8,
}

/// Default fixity for an operator with no declaration: `infixl 9`, matching
/// ordinary function application binding tighter than any declared
/// operator.
pub const DEFAULT_FIXITY: Fixity = Fixity { assoc: Assoc::Left, precedence: 9 };

#[derive(Clone)]
pub struct State<'src> {
    lexer: Lexer<'src>,
    lookahead: Option<Token>,
    /// Counts tokens actually consumed via [`State::bump`]; `alt_long`
    /// compares this across two trial clones to pick the longest match.
    consumed: usize,
    fixities: FxHashMap<String, Fixity>,
    lit_counter: usize,
}

impl<'src> State<'src> {
    pub fn new(source: &'src str, file: impl Into<std::rc::Rc<str>>) -> Result<Self, LexError> {
        let mut lexer = Lexer::new(source, file);
        let lookahead = Some(lexer.next_token()?);
        Ok(State {
            lexer,
            lookahead,
            consumed: 0,
            fixities: FxHashMap::default(),
            lit_counter: 0,
        })
    }

    /// A fresh placeholder identity tag for an integer literal's attached
    /// `Ident` (§3.5); elaboration fills in the real overload-resolution
    /// identity later.
    pub fn fresh_lit_ident(&mut self, position: Position) -> curry_ast::Ident {
        let name = format!("_lit{}", self.lit_counter);
        self.lit_counter += 1;
        curry_ast::Ident::new(name, position)
    }

    pub fn peek(&self) -> &Token {
        self.lookahead.as_ref().expect("lookahead is always populated after construction")
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub fn position(&self) -> Position {
        self.peek().position.clone()
    }

    /// Consume the current lookahead token and fetch the next one.
    pub fn bump(&mut self) -> Result<Token, ParseError> {
        let current = self.lookahead.take().expect("lookahead always populated");
        let next = self.lexer.next_token().map_err(lex_to_parse_error)?;
        self.lookahead = Some(next);
        self.consumed += 1;
        Ok(current)
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.peek_kind() == kind {
            self.bump()
        } else {
            Err(ParseError::new(
                ParseErrorKind::UnexpectedToken { expected: vec![kind], found: self.peek_kind() },
                self.position(),
            ))
        }
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn layout_mut(&mut self) -> &mut LayoutStack {
        self.lexer.layout_mut()
    }

    /// `layoutOn` (§4.5): push the current token's column.
    pub fn layout_on(&mut self) {
        let column = self.peek().position.column().unwrap_or(1) as i64;
        self.lexer.layout_mut().push_column(column);
    }

    /// `layoutOff` (§4.5): push the explicit-block sentinel.
    pub fn layout_off(&mut self) {
        self.lexer.layout_mut().push_explicit();
    }

    /// `layoutEnd` (§4.5): pop one entry.
    pub fn layout_end(&mut self) {
        self.lexer.layout_mut().pop();
    }

    pub fn declare_fixity(&mut self, op: String, fixity: Fixity) {
        self.fixities.insert(op, fixity);
    }

    pub fn fixity_of(&self, op: &str) -> Fixity {
        self.fixities.get(op).copied().unwrap_or(DEFAULT_FIXITY)
    }
}

fn lex_to_parse_error(e: LexError) -> ParseError {
    ParseError::new(ParseErrorKind::Message(e.to_string()), e.position.clone())
}
