//! Token categories and the `Token` value itself (C1 / C4, §3.3).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use curry_span::Position;

/// The category half of a token's (category, attributes) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // -- Keywords --------------------------------------------------------
    KwModule,
    KwWhere,
    KwImport,
    KwHiding,
    KwQualified,
    KwAs,
    KwData,
    KwNewtype,
    KwType,
    KwInfixl,
    KwInfixr,
    KwInfix,
    KwForeign,
    KwExternal,
    KwLet,
    KwIn,
    KwFree,
    KwIf,
    KwThen,
    KwElse,
    KwCase,
    KwOf,
    KwFcase,
    KwDo,

    // -- Punctuation / reserved operators --------------------------------
    Equals,      // =
    Pipe,        // |
    Arrow,       // ->
    LeftArrow,   // <-
    DoubleColon, // ::
    Backslash,   // \
    At,          // @
    Tilde,       // ~
    DotDot,      // ..
    Comma,
    Semicolon,
    Backtick,
    Underscore,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // -- Literals ---------------------------------------------------------
    IntLit,
    FloatLit,
    CharLit,
    StringLit,

    // -- Identifiers --------------------------------------------------------
    /// Lowercase-leading identifier, optionally module-qualified.
    Ident,
    /// Uppercase-leading identifier (constructor or module component),
    /// optionally module-qualified.
    ConsIdent,
    /// A user-definable operator-like identifier, optionally qualified.
    SymbolicIdent,

    // -- Pragmas -------------------------------------------------------------
    PragmaLanguage,
    PragmaOptions,

    // -- Virtual layout tokens -----------------------------------------------
    VirtualOpenBrace,
    VirtualCloseBrace,
    VirtualSemicolon,

    Eof,
}

impl TokenKind {
    pub fn is_virtual(self) -> bool {
        matches!(
            self,
            TokenKind::VirtualOpenBrace | TokenKind::VirtualCloseBrace | TokenKind::VirtualSemicolon
        )
    }
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("module", TokenKind::KwModule),
    ("where", TokenKind::KwWhere),
    ("import", TokenKind::KwImport),
    ("hiding", TokenKind::KwHiding),
    ("qualified", TokenKind::KwQualified),
    ("as", TokenKind::KwAs),
    ("data", TokenKind::KwData),
    ("newtype", TokenKind::KwNewtype),
    ("type", TokenKind::KwType),
    ("infixl", TokenKind::KwInfixl),
    ("infixr", TokenKind::KwInfixr),
    ("infix", TokenKind::KwInfix),
    ("foreign", TokenKind::KwForeign),
    ("external", TokenKind::KwExternal),
    ("let", TokenKind::KwLet),
    ("in", TokenKind::KwIn),
    ("free", TokenKind::KwFree),
    ("if", TokenKind::KwIf),
    ("then", TokenKind::KwThen),
    ("else", TokenKind::KwElse),
    ("case", TokenKind::KwCase),
    ("of", TokenKind::KwOf),
    ("fcase", TokenKind::KwFcase),
    ("do", TokenKind::KwDo),
];

/// Look up a plain lowercase identifier against the keyword table.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    static TABLE: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    let table = TABLE.get_or_init(|| KEYWORDS.iter().copied().collect());
    table.get(s).copied()
}

/// Reserved symbolic operators that are *not* user-definable.
const RESERVED_OPERATORS: &[(&str, TokenKind)] = &[
    ("=", TokenKind::Equals),
    ("|", TokenKind::Pipe),
    ("->", TokenKind::Arrow),
    ("<-", TokenKind::LeftArrow),
    ("::", TokenKind::DoubleColon),
    ("\\", TokenKind::Backslash),
    ("@", TokenKind::At),
    ("~", TokenKind::Tilde),
    ("..", TokenKind::DotDot),
];

pub fn reserved_operator(s: &str) -> Option<TokenKind> {
    RESERVED_OPERATORS
        .iter()
        .find(|(text, _)| *text == s)
        .map(|(_, kind)| *kind)
}

/// The payload half of a token's (category, attributes) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenAttrs {
    None,
    /// Plain text payload: identifiers, symbolic identifiers, pragma tags.
    Text(String),
    /// A module-qualified identifier: the dotted module path and the final
    /// unqualified name.
    Qualified { module_path: Vec<String>, name: String },
    IntLit(i64),
    FloatLit(f64),
    CharLit(char),
    StringLit(String),
    /// `LANGUAGE` pragma: the listed extension names, verbatim.
    LanguagePragma(Vec<String>),
    /// `OPTIONS` pragma: an optional tool tag and the free-text arguments.
    OptionsPragma {
        tool: Option<String>,
        args: String,
    },
}

impl TokenAttrs {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenAttrs::Text(s) => Some(s),
            TokenAttrs::Qualified { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A single token: category, attributes, and the position of its first
/// character (or, for virtual tokens, the position they were synthesized
/// at).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub attrs: TokenAttrs,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position, attrs: TokenAttrs) -> Self {
        Token { kind, attrs, position }
    }

    pub fn simple(kind: TokenKind, position: Position) -> Self {
        Token::new(kind, position, TokenAttrs::None)
    }

    pub fn virtual_open_brace(position: Position) -> Self {
        Token::simple(TokenKind::VirtualOpenBrace, position)
    }

    pub fn virtual_close_brace(position: Position) -> Self {
        Token::simple(TokenKind::VirtualCloseBrace, position)
    }

    pub fn virtual_semicolon(position: Position) -> Self {
        Token::simple(TokenKind::VirtualSemicolon, position)
    }

    pub fn eof(position: Position) -> Self {
        Token::simple(TokenKind::Eof, position)
    }
}
