//! Source positions and opaque back-reference tags.
//!
//! A [`Position`] is either a concrete `(file, line, column)` triple, an
//! "ast-only" position carrying nothing but a [`SourceRef`], or no position
//! at all. Two concrete positions compare equal (and order) by
//! file/line/column alone -- the attached [`SourceRef`] is never inspected,
//! because [`SourceRef`]'s own `PartialEq`/`Ord` are constant.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// An opaque integer-list tag threaded through positions for later
/// back-mapping to original source locations by an external collaborator
/// (the source-reference injector, out of scope here).
///
/// `SourceRef` is deliberately inert: every `SourceRef` equals every other,
/// orders equal to every other, and displays as the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRef(pub Vec<u32>);

impl SourceRef {
    /// The reference carried by positions before injection has run.
    pub fn none() -> Self {
        SourceRef(Vec::new())
    }

    pub fn tagged(tags: Vec<u32>) -> Self {
        SourceRef(tags)
    }
}

impl PartialEq for SourceRef {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}
impl Eq for SourceRef {}

impl PartialOrd for SourceRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for SourceRef {
    fn cmp(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

/// A source position: concrete, ast-only, or absent.
///
/// Derived `PartialEq`/`Ord` are correct as written because `SourceRef`'s own
/// comparisons are constant -- two `Concrete` positions compare equal iff
/// their file/line/column agree, regardless of `source_ref`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    /// A position with a known file, 1-based line, and 1-based column.
    Concrete {
        file: Rc<str>,
        line: u32,
        column: u32,
        source_ref: SourceRef,
    },
    /// A position carrying nothing but a back-reference tag, used for
    /// AST nodes synthesized after parsing.
    AstOnly { source_ref: SourceRef },
    /// No position information at all.
    None,
}

impl Position {
    /// The initial position at the start of `file`: line 1, column 1.
    pub fn first(file: impl Into<Rc<str>>) -> Self {
        Position::Concrete {
            file: file.into(),
            line: 1,
            column: 1,
            source_ref: SourceRef::none(),
        }
    }

    /// A concrete position at an arbitrary line/column, with no back-reference.
    pub fn at(file: impl Into<Rc<str>>, line: u32, column: u32) -> Self {
        Position::Concrete {
            file: file.into(),
            line,
            column,
            source_ref: SourceRef::none(),
        }
    }

    pub fn file(&self) -> Option<&str> {
        match self {
            Position::Concrete { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn line(&self) -> Option<u32> {
        match self {
            Position::Concrete { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn column(&self) -> Option<u32> {
        match self {
            Position::Concrete { column, .. } => Some(*column),
            _ => None,
        }
    }

    pub fn source_ref(&self) -> &SourceRef {
        static NONE: SourceRef = SourceRef(Vec::new());
        match self {
            Position::Concrete { source_ref, .. } => source_ref,
            Position::AstOnly { source_ref } => source_ref,
            Position::None => &NONE,
        }
    }

    /// Advance the column of a concrete position by `n`; identity otherwise.
    pub fn incr(&self, n: u32) -> Self {
        match self {
            Position::Concrete {
                file,
                line,
                column,
                source_ref,
            } => Position::Concrete {
                file: file.clone(),
                line: *line,
                column: column + n,
                source_ref: source_ref.clone(),
            },
            other => other.clone(),
        }
    }

    /// Advance the column to the next multiple of 8, plus 1 (tab stops every
    /// 8th column); identity on non-concrete positions.
    pub fn tab(&self) -> Self {
        match self {
            Position::Concrete {
                file,
                line,
                column,
                source_ref,
            } => {
                let next = ((column - 1) / 8 + 1) * 8 + 1;
                Position::Concrete {
                    file: file.clone(),
                    line: *line,
                    column: next,
                    source_ref: source_ref.clone(),
                }
            }
            other => other.clone(),
        }
    }

    /// Reset the column to 1 and advance the line by one; identity on
    /// non-concrete positions.
    pub fn nl(&self) -> Self {
        match self {
            Position::Concrete {
                file,
                line,
                source_ref,
                ..
            } => Position::Concrete {
                file: file.clone(),
                line: line + 1,
                column: 1,
                source_ref: source_ref.clone(),
            },
            other => other.clone(),
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, Position::Concrete { .. })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Concrete {
                file, line, column, ..
            } => write!(f, "{file}:{line}.{column}"),
            Position::AstOnly { .. } | Position::None => write!(f, "<no position>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(line: u32, column: u32) -> Position {
        Position::Concrete {
            file: Rc::from("Test.curry"),
            line,
            column,
            source_ref: SourceRef::none(),
        }
    }

    #[test]
    fn first_is_line_1_column_1() {
        let pos = Position::first("Test.curry");
        assert_eq!(pos.line(), Some(1));
        assert_eq!(pos.column(), Some(1));
    }

    #[test]
    fn incr_advances_column() {
        let pos = p(3, 5).incr(4);
        assert_eq!(pos.line(), Some(3));
        assert_eq!(pos.column(), Some(9));
    }

    #[test]
    fn incr_is_identity_on_non_concrete() {
        let pos = Position::None.incr(4);
        assert_eq!(pos, Position::None);
    }

    #[test]
    fn nl_resets_column_and_advances_line() {
        let pos = p(3, 17).nl();
        assert_eq!(pos.column(), Some(1));
        assert_eq!(pos.line(), Some(4));
    }

    #[test]
    fn tab_advances_to_next_multiple_of_8_plus_1() {
        assert_eq!(p(1, 1).tab().column(), Some(9));
        assert_eq!(p(1, 8).tab().column(), Some(9));
        assert_eq!(p(1, 9).tab().column(), Some(17));
    }

    #[test]
    fn position_arithmetic_invariants() {
        for col in 1..40u32 {
            let pos = p(1, col);
            assert_eq!(pos.nl().column(), Some(1));
            assert_eq!(pos.nl().line(), pos.line().map(|l| l + 1));
            assert_eq!((pos.tab().column().unwrap() - 1) % 8, 0);
        }
    }

    #[test]
    fn equality_ignores_source_ref() {
        let a = Position::Concrete {
            file: Rc::from("M.curry"),
            line: 1,
            column: 1,
            source_ref: SourceRef::none(),
        };
        let b = Position::Concrete {
            file: Rc::from("M.curry"),
            line: 1,
            column: 1,
            source_ref: SourceRef::tagged(vec![1, 2, 3]),
        };
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
    }

    #[test]
    fn source_ref_display_is_empty() {
        assert_eq!(SourceRef::tagged(vec![1, 2]).to_string(), "");
    }

    #[test]
    fn position_display_format() {
        assert_eq!(p(4, 7).to_string(), "Test.curry:4.7");
    }
}
