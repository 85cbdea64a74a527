use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Range {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

/// Pointer to a syntax node: file plus the node's range.
/// Two refs are the same node iff path and range agree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct SyntaxRef {
    pub path: String,
    pub range: Range,
}

impl SyntaxRef {
    pub fn new(path: impl Into<String>, range: Range) -> Self {
        Self {
            path: path.into(),
            range,
        }
    }
}

impl fmt::Display for SyntaxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.path,
            self.range.start_line + 1,
            self.range.start_col + 1
        )
    }
}

/// Index of a declaration in the resolution stage's storage.
/// Projections hold this instead of the declaration itself.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
#[serde(transparent)]
pub struct DeclarationId(pub u32);

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Property,
    Function,
    Parameter,
    EnumConstant,
    Accessor,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    #[default]
    Final,
    Open,
    Abstract,
    Sealed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

fn default_true() -> bool {
    true
}

/// A resolved program entity. Immutable once produced by the resolver.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Declaration {
    pub id: DeclarationId,
    pub name: String,
    pub kind: DeclarationKind,
    /// Syntax node the declaration was written at. `None` for synthesized
    /// declarations (generated accessors, implicit enum members, ...).
    #[serde(default)]
    pub origin: Option<SyntaxRef>,
    #[serde(default)]
    pub parent: Option<DeclarationId>,
    #[serde(default)]
    pub modality: Modality,
    #[serde(default)]
    pub visibility: Visibility,
    /// Whether the origin node carries any annotation entries at all.
    #[serde(default = "default_true")]
    pub annotated_in_source: bool,
}

impl Declaration {
    pub fn new(id: DeclarationId, name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            origin: None,
            parent: None,
            modality: Modality::default(),
            visibility: Visibility::default(),
            annotated_in_source: true,
        }
    }

    pub fn with_origin(mut self, origin: SyntaxRef) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_parent(mut self, parent: DeclarationId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn is_synthesized(&self) -> bool {
        self.origin.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_defaults_from_json() {
        let decl: Declaration =
            serde_json::from_str(r#"{"id": 7, "name": "count", "kind": "property"}"#).unwrap();
        assert_eq!(decl.id, DeclarationId(7));
        assert!(decl.is_synthesized());
        assert!(decl.annotated_in_source);
        assert_eq!(decl.modality, Modality::Final);
    }
}
