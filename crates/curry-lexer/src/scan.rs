//! Per-token-family scanning, dispatched from the single entry point
//! [`scan_token`]. Each private function owns exactly one token family,
//! mirroring the decomposition of hand-rolled lexers elsewhere in this
//! toolchain.

use curry_span::Position;

use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind};
use crate::token::{keyword_from_str, reserved_operator, Token, TokenAttrs, TokenKind};

pub fn is_symbol_char(c: char) -> bool {
    matches!(
        c,
        '!' | '#' | '$' | '%' | '&' | '*' | '+' | '.' | '/' | '<' | '=' | '>' | '?' | '@' | '\\'
            | '^' | '|' | '-' | '~' | ':'
    )
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

/// Scan one real (non-virtual, non-whitespace, non-comment) token starting
/// at `start_pos`. The caller has already positioned `cursor` at the first
/// character and verified it is not EOF.
pub fn scan_token(cursor: &mut Cursor, start_pos: Position) -> Result<Token, LexError> {
    let c = cursor.peek().expect("scan_token called at EOF");

    if c.is_ascii_digit() {
        return lex_number(cursor, start_pos);
    }
    if c == '"' {
        return lex_string(cursor, start_pos);
    }
    if c == '\'' {
        return lex_char(cursor, start_pos);
    }
    if c == '{' && cursor.peek_next() == Some('-') {
        return lex_pragma(cursor, start_pos);
    }
    if is_ident_start(c) {
        return lex_ident_or_qualified(cursor, start_pos);
    }
    if let Some(kind) = single_char_punctuation(c) {
        cursor.advance();
        return Ok(Token::simple(kind, start_pos));
    }
    if is_symbol_char(c) {
        return lex_symbolic(cursor, start_pos, Vec::new());
    }

    cursor.advance();
    Err(LexError::new(LexErrorKind::UnexpectedCharacter(c), start_pos))
}

fn single_char_punctuation(c: char) -> Option<TokenKind> {
    Some(match c {
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        '`' => TokenKind::Backtick,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        _ => return None,
    })
}

fn lex_number(cursor: &mut Cursor, start_pos: Position) -> Result<Token, LexError> {
    let start = cursor.byte_pos();
    cursor.eat_while(|c| c.is_ascii_digit());

    let mut is_float = false;
    if cursor.peek() == Some('.') && cursor.peek_next().is_some_and(|c| c.is_ascii_digit()) {
        is_float = true;
        cursor.advance(); // '.'
        cursor.eat_while(|c| c.is_ascii_digit());
    }
    if matches!(cursor.peek(), Some('e') | Some('E')) {
        let mut probe_is_exponent = cursor.peek_next().is_some_and(|c| c.is_ascii_digit());
        if matches!(cursor.peek_next(), Some('+') | Some('-')) {
            probe_is_exponent = true;
        }
        if probe_is_exponent {
            is_float = true;
            cursor.advance(); // e/E
            if matches!(cursor.peek(), Some('+') | Some('-')) {
                cursor.advance();
            }
            cursor.eat_while(|c| c.is_ascii_digit());
        }
    }

    let text = cursor.slice(start, cursor.byte_pos());
    if is_float {
        let value: f64 = text
            .parse()
            .map_err(|_| LexError::new(LexErrorKind::InvalidNumberLiteral(text.to_string()), start_pos.clone()))?;
        Ok(Token::new(TokenKind::FloatLit, start_pos, TokenAttrs::FloatLit(value)))
    } else {
        let value: i64 = text
            .parse()
            .map_err(|_| LexError::new(LexErrorKind::InvalidNumberLiteral(text.to_string()), start_pos.clone()))?;
        Ok(Token::new(TokenKind::IntLit, start_pos, TokenAttrs::IntLit(value)))
    }
}

fn decode_escape(cursor: &mut Cursor, start_pos: &Position) -> Result<char, LexError> {
    let escaped = cursor
        .peek()
        .ok_or_else(|| LexError::new(LexErrorKind::UnterminatedString, start_pos.clone()))?;
    cursor.advance();
    Ok(match escaped {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        '0' => '\0',
        other => return Err(LexError::new(LexErrorKind::InvalidEscapeSequence(other), start_pos.clone())),
    })
}

fn lex_string(cursor: &mut Cursor, start_pos: Position) -> Result<Token, LexError> {
    cursor.advance(); // opening quote
    let mut value = String::new();
    loop {
        match cursor.peek() {
            None | Some('\n') => {
                return Err(LexError::new(LexErrorKind::UnterminatedString, start_pos));
            }
            Some('"') => {
                cursor.advance();
                return Ok(Token::new(TokenKind::StringLit, start_pos, TokenAttrs::StringLit(value)));
            }
            Some('\\') => {
                cursor.advance();
                value.push(decode_escape(cursor, &start_pos)?);
            }
            Some(c) => {
                cursor.advance();
                value.push(c);
            }
        }
    }
}

fn lex_char(cursor: &mut Cursor, start_pos: Position) -> Result<Token, LexError> {
    cursor.advance(); // opening quote
    let value = match cursor.peek() {
        None => return Err(LexError::new(LexErrorKind::UnterminatedChar, start_pos)),
        Some('\'') => return Err(LexError::new(LexErrorKind::EmptyCharLiteral, start_pos)),
        Some('\\') => {
            cursor.advance();
            decode_escape(cursor, &start_pos)?
        }
        Some(c) => {
            cursor.advance();
            c
        }
    };
    match cursor.peek() {
        Some('\'') => {
            cursor.advance();
            Ok(Token::new(TokenKind::CharLit, start_pos, TokenAttrs::CharLit(value)))
        }
        _ => Err(LexError::new(LexErrorKind::UnterminatedChar, start_pos)),
    }
}

/// Scan an identifier, following `.`-qualification through any number of
/// uppercase-leading components (`M.Sub.name`, `M.Sub.Cons`, `M.Sub.+`).
fn lex_ident_or_qualified(cursor: &mut Cursor, start_pos: Position) -> Result<Token, LexError> {
    let mut module_path: Vec<String> = Vec::new();

    loop {
        let seg_start = cursor.byte_pos();
        let first = cursor.peek().unwrap();
        cursor.eat_while(is_ident_continue);
        let seg = cursor.slice(seg_start, cursor.byte_pos()).to_string();

        let is_upper = first.is_uppercase();
        let followed_by_dot_component = is_upper
            && cursor.peek() == Some('.')
            && cursor
                .peek_next()
                .is_some_and(|c| is_ident_start(c) || is_symbol_char(c));

        if followed_by_dot_component {
            module_path.push(seg);
            cursor.advance(); // '.'
            continue;
        }

        if module_path.is_empty() {
            if let Some(kw) = keyword_from_str(&seg) {
                return Ok(Token::simple(kw, start_pos));
            }
            let kind = if is_upper { TokenKind::ConsIdent } else { TokenKind::Ident };
            return Ok(Token::new(kind, start_pos, TokenAttrs::Text(seg)));
        }

        // Qualified: the final segment may itself be a symbolic identifier
        // (`M.+`) rather than a plain name.
        if is_symbol_char(cursor.peek().unwrap_or(' ')) && seg.is_empty() {
            return lex_symbolic(cursor, start_pos, module_path);
        }

        let kind = if is_upper { TokenKind::ConsIdent } else { TokenKind::Ident };
        return Ok(Token::new(
            kind,
            start_pos,
            TokenAttrs::Qualified { module_path, name: seg },
        ));
    }
}

fn lex_symbolic(cursor: &mut Cursor, start_pos: Position, module_path: Vec<String>) -> Result<Token, LexError> {
    let start = cursor.byte_pos();
    cursor.eat_while(is_symbol_char);
    let text = cursor.slice(start, cursor.byte_pos()).to_string();

    if module_path.is_empty() {
        if let Some(kind) = reserved_operator(&text) {
            return Ok(Token::simple(kind, start_pos));
        }
        return Ok(Token::new(TokenKind::SymbolicIdent, start_pos, TokenAttrs::Text(text)));
    }
    Ok(Token::new(
        TokenKind::SymbolicIdent,
        start_pos,
        TokenAttrs::Qualified { module_path, name: text },
    ))
}

/// Lex a `{-# ... #-}` pragma. Unknown pragma names are skipped as trivia
/// (no token is produced; the caller must re-poll for the next real token).
fn lex_pragma(cursor: &mut Cursor, start_pos: Position) -> Result<Token, LexError> {
    cursor.advance(); // '{'
    cursor.advance(); // '-'
    cursor.advance(); // '#'
    skip_pragma_whitespace(cursor);

    let name_start = cursor.byte_pos();
    cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
    let name = cursor.slice(name_start, cursor.byte_pos()).to_string();

    match name.as_str() {
        "LANGUAGE" => {
            let mut extensions = Vec::new();
            loop {
                skip_pragma_whitespace(cursor);
                if matches!(cursor.peek(), Some('#')) {
                    break;
                }
                let ext_start = cursor.byte_pos();
                cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
                let ext = cursor.slice(ext_start, cursor.byte_pos()).to_string();
                if !ext.is_empty() {
                    extensions.push(ext);
                }
                skip_pragma_whitespace(cursor);
                if cursor.peek() == Some(',') {
                    cursor.advance();
                    continue;
                }
                break;
            }
            close_pragma(cursor, &start_pos)?;
            Ok(Token::new(
                TokenKind::PragmaLanguage,
                start_pos,
                TokenAttrs::LanguagePragma(extensions),
            ))
        }
        _ if name.starts_with("OPTIONS") => {
            let tool = name.strip_prefix("OPTIONS_").map(|s| s.to_string());
            skip_pragma_whitespace(cursor);
            let args_start = cursor.byte_pos();
            while !(cursor.peek() == Some('#') && cursor.peek_next() == Some('-')) {
                if cursor.peek().is_none() {
                    return Err(LexError::new(LexErrorKind::UnterminatedPragma, start_pos));
                }
                cursor.advance();
            }
            let args = cursor.slice(args_start, cursor.byte_pos()).trim().to_string();
            close_pragma(cursor, &start_pos)?;
            Ok(Token::new(
                TokenKind::PragmaOptions,
                start_pos,
                TokenAttrs::OptionsPragma { tool, args },
            ))
        }
        _ => {
            // Unknown pragma: skip to the closer and recurse for the next
            // real token.
            while !(cursor.peek() == Some('#') && cursor.peek_next() == Some('-')) {
                if cursor.peek().is_none() {
                    return Err(LexError::new(LexErrorKind::UnterminatedPragma, start_pos));
                }
                cursor.advance();
            }
            close_pragma(cursor, &start_pos)?;
            let next_start = cursor.position().clone();
            scan_token(cursor, next_start)
        }
    }
}

fn skip_pragma_whitespace(cursor: &mut Cursor) {
    cursor.eat_while(|c| c.is_whitespace());
}

fn close_pragma(cursor: &mut Cursor, start_pos: &Position) -> Result<(), LexError> {
    skip_pragma_whitespace(cursor);
    if cursor.peek() == Some('#') && cursor.peek_next() == Some('-') {
        cursor.advance();
        cursor.advance();
        Ok(())
    } else {
        Err(LexError::new(LexErrorKind::UnterminatedPragma, start_pos.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Token {
        let mut cursor = Cursor::new(source, "T.curry");
        let pos = cursor.position().clone();
        scan_token(&mut cursor, pos).unwrap()
    }

    #[test]
    fn scans_int_literal() {
        let tok = scan("42");
        assert_eq!(tok.kind, TokenKind::IntLit);
        assert_eq!(tok.attrs, TokenAttrs::IntLit(42));
    }

    #[test]
    fn scans_float_literal_with_exponent() {
        let tok = scan("1.5e10");
        assert_eq!(tok.kind, TokenKind::FloatLit);
        assert_eq!(tok.attrs, TokenAttrs::FloatLit(1.5e10));
    }

    #[test]
    fn integer_with_leading_zero_is_accepted() {
        let tok = scan("007");
        assert_eq!(tok.attrs, TokenAttrs::IntLit(7));
    }

    #[test]
    fn scans_string_literal_with_escapes() {
        let tok = scan("\"a\\nb\"");
        assert_eq!(tok.attrs, TokenAttrs::StringLit("a\nb".to_string()));
    }

    #[test]
    fn scans_char_literal() {
        let tok = scan("'x'");
        assert_eq!(tok.attrs, TokenAttrs::CharLit('x'));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut cursor = Cursor::new("\"abc", "T.curry");
        let pos = cursor.position().clone();
        let err = scan_token(&mut cursor, pos).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn scans_plain_identifier() {
        let tok = scan("foo");
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.attrs, TokenAttrs::Text("foo".to_string()));
    }

    #[test]
    fn scans_constructor_identifier() {
        let tok = scan("Foo");
        assert_eq!(tok.kind, TokenKind::ConsIdent);
    }

    #[test]
    fn scans_keyword() {
        let tok = scan("case");
        assert_eq!(tok.kind, TokenKind::KwCase);
        assert_eq!(tok.attrs, TokenAttrs::None);
    }

    #[test]
    fn scans_qualified_identifier() {
        let tok = scan("Data.List.map");
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(
            tok.attrs,
            TokenAttrs::Qualified {
                module_path: vec!["Data".to_string(), "List".to_string()],
                name: "map".to_string(),
            }
        );
    }

    #[test]
    fn scans_symbolic_identifier() {
        let tok = scan("+++");
        assert_eq!(tok.kind, TokenKind::SymbolicIdent);
        assert_eq!(tok.attrs, TokenAttrs::Text("+++".to_string()));
    }

    #[test]
    fn scans_reserved_operator_not_symbolic_ident() {
        let tok = scan("->");
        assert_eq!(tok.kind, TokenKind::Arrow);
    }

    #[test]
    fn scans_language_pragma() {
        let tok = scan("{-# LANGUAGE CPP, MultiParamTypeClasses #-}");
        assert_eq!(tok.kind, TokenKind::PragmaLanguage);
        assert_eq!(
            tok.attrs,
            TokenAttrs::LanguagePragma(vec!["CPP".to_string(), "MultiParamTypeClasses".to_string()])
        );
    }

    #[test]
    fn scans_options_pragma_with_tool_tag() {
        let tok = scan("{-# OPTIONS_CYMAKE -Wall #-}");
        assert_eq!(tok.kind, TokenKind::PragmaOptions);
        assert_eq!(
            tok.attrs,
            TokenAttrs::OptionsPragma {
                tool: Some("CYMAKE".to_string()),
                args: "-Wall".to_string()
            }
        );
    }

    #[test]
    fn unknown_pragma_is_skipped_and_next_real_token_returned() {
        let tok = scan("{-# UNKNOWN foo #-} bar");
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.attrs, TokenAttrs::Text("bar".to_string()));
    }
}
