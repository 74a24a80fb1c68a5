//! Literate preprocessor (C3, §4.1): strips literate markers from `.lcurry`
//! sources and enforces the Program/Comment adjacency rule.

use curry_span::Position;

use crate::error::{LiterateError, LiterateErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Program,
    Blank,
    Comment,
}

const LEAD: char = '>';

fn classify(line: &str) -> LineKind {
    if line.starts_with(LEAD) {
        LineKind::Program
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Comment
    }
}

/// Strip literate markers from `source`, given the file name it came from
/// (used only to position diagnostics). Non-literate callers should not
/// invoke this at all -- see [`crate::is_literate_extension`].
pub fn delitter(source: &str, file: &str) -> Result<String, LiterateError> {
    let lines: Vec<&str> = source.lines().collect();
    let kinds: Vec<LineKind> = lines.iter().map(|l| classify(l)).collect();

    let mut saw_program = false;
    for (i, kind) in kinds.iter().enumerate() {
        if *kind != LineKind::Program {
            continue;
        }
        saw_program = true;
        let pos = Position::at(file, i as u32 + 1, 1);
        if i > 0 && kinds[i - 1] == LineKind::Comment {
            return Err(LiterateError::new(LiterateErrorKind::PrecededByComment, pos));
        }
        if i + 1 < kinds.len() && kinds[i + 1] == LineKind::Comment {
            return Err(LiterateError::new(LiterateErrorKind::FollowedByComment, pos));
        }
    }

    if !saw_program {
        return Err(LiterateError::new(
            LiterateErrorKind::NoCode,
            Position::first(file),
        ));
    }

    let payload: Vec<&str> = lines
        .iter()
        .zip(kinds.iter())
        .filter_map(|(line, kind)| {
            if *kind == LineKind::Program {
                Some(&line[LEAD.len_utf8()..])
            } else {
                None
            }
        })
        .collect();

    Ok(payload.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_like_result_for_simple_program() {
        let src = "> f = 1\n\n> g = 2\n";
        let out = delitter(src, "M.lcurry").unwrap();
        assert_eq!(out, " f = 1\n g = 2");
    }

    #[test]
    fn empty_script_is_fatal() {
        let err = delitter("just a comment\nanother\n", "M.lcurry").unwrap_err();
        assert_eq!(err.kind, LiterateErrorKind::NoCode);
        assert_eq!(err.position, Position::first("M.lcurry"));
    }

    #[test]
    fn program_followed_by_comment_is_fatal_at_program_line() {
        let src = "> f = 1\na comment with no blank line above\n> g = 2\n";
        let err = delitter(src, "M.lcurry").unwrap_err();
        assert_eq!(err.kind, LiterateErrorKind::FollowedByComment);
        assert_eq!(err.position, Position::at("M.lcurry", 1, 1));
    }

    #[test]
    fn program_preceded_by_comment_is_fatal() {
        let src = "a comment\n> f = 1\n";
        let err = delitter(src, "M.lcurry").unwrap_err();
        assert_eq!(err.kind, LiterateErrorKind::PrecededByComment);
        assert_eq!(err.position, Position::at("M.lcurry", 2, 1));
    }

    #[test]
    fn blank_lines_do_not_violate_adjacency() {
        let src = "a comment\n\n> f = 1\n\n> g = 2\n";
        let out = delitter(src, "M.lcurry").unwrap();
        assert_eq!(out, " f = 1\n g = 2");
    }
}
