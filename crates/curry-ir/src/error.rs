//! Errors raised by the traversal framework (§4.7/§4.7a).

use std::fmt;

/// Failure from a per-variant selector applied to the wrong variant. The
/// message is always `"Goodies.<op>: <reason>"`, preserved verbatim since
/// downstream tooling matches on the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrError {
    SelectorMismatch { op: &'static str, reason: String },
}

impl fmt::Display for IrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrError::SelectorMismatch { op, reason } => write!(f, "Goodies.{op}: {reason}"),
        }
    }
}

impl std::error::Error for IrError {}

impl IrError {
    pub fn selector_mismatch(op: &'static str, reason: impl Into<String>) -> Self {
        IrError::SelectorMismatch { op, reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_the_documented_goodies_shape() {
        let e = IrError::selector_mismatch("asVariable", "not a variable");
        assert_eq!(e.to_string(), "Goodies.asVariable: not a variable");
    }
}
