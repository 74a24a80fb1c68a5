//! Identifiers and module names.

use curry_span::Position;
use serde::{Deserialize, Serialize};

/// A dotted module name, e.g. `Data.List`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleIdent {
    pub components: Vec<String>,
    pub position: Position,
}

impl ModuleIdent {
    pub fn new(components: Vec<String>, position: Position) -> Self {
        ModuleIdent { components, position }
    }

    pub fn dotted(&self) -> String {
        self.components.join(".")
    }
}

/// A single unqualified name occurrence (variable, constructor, type name,
/// operator symbol, field label, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    pub position: Position,
}

impl Ident {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Ident { name: name.into(), position }
    }
}

/// A name that may carry an explicit module qualifier, e.g. `Prelude.map`
/// versus plain `map`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedIdent {
    pub module: Option<ModuleIdent>,
    pub ident: Ident,
}

impl QualifiedIdent {
    pub fn unqualified(ident: Ident) -> Self {
        QualifiedIdent { module: None, ident }
    }

    pub fn qualified(module: ModuleIdent, ident: Ident) -> Self {
        QualifiedIdent { module: Some(module), ident }
    }

    pub fn is_qualified(&self) -> bool {
        self.module.is_some()
    }

    pub fn name(&self) -> &str {
        &self.ident.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::first("T.curry")
    }

    #[test]
    fn module_ident_dotted_joins_components() {
        let m = ModuleIdent::new(vec!["Data".into(), "List".into()], pos());
        assert_eq!(m.dotted(), "Data.List");
    }

    #[test]
    fn qualified_ident_reports_qualification() {
        let plain = QualifiedIdent::unqualified(Ident::new("map", pos()));
        assert!(!plain.is_qualified());
        let qual = QualifiedIdent::qualified(
            ModuleIdent::new(vec!["Prelude".into()], pos()),
            Ident::new("map", pos()),
        );
        assert!(qual.is_qualified());
        assert_eq!(qual.name(), "map");
    }
}
