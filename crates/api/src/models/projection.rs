use super::declaration::DeclarationId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Constructor,
    Getter,
    Setter,
    Ordinary,
}

/// Parameter kind, named after the method that owns the parameter.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Ordinary,
    Setter,
    Constructor,
}

/// Shape a declaration takes when exposed to editor tooling.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    Class {
        #[serde(default)]
        annotation_type: bool,
    },
    Field {
        #[serde(default)]
        enum_constant: bool,
    },
    Method(MethodKind),
    Parameter(ParameterKind),
}

impl ProjectionKind {
    pub const FIELD: ProjectionKind = ProjectionKind::Field {
        enum_constant: false,
    };
    pub const ENUM_CONSTANT: ProjectionKind = ProjectionKind::Field {
        enum_constant: true,
    };
    pub const CLASS: ProjectionKind = ProjectionKind::Class {
        annotation_type: false,
    };
    pub const ANNOTATION_CLASS: ProjectionKind = ProjectionKind::Class {
        annotation_type: true,
    };

    /// Members and parameters, minus enum constants: the projections that
    /// carry a synthesized nullability annotation.
    pub fn carries_nullability(&self) -> bool {
        match self {
            ProjectionKind::Field { enum_constant } => !enum_constant,
            ProjectionKind::Method(_) | ProjectionKind::Parameter(_) => true,
            ProjectionKind::Class { .. } => false,
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectionKind::Class {
                annotation_type: false,
            } => "class",
            ProjectionKind::Class {
                annotation_type: true,
            } => "annotation class",
            ProjectionKind::Field {
                enum_constant: false,
            } => "field",
            ProjectionKind::Field {
                enum_constant: true,
            } => "enum constant",
            ProjectionKind::Method(MethodKind::Constructor) => "constructor",
            ProjectionKind::Method(MethodKind::Getter) => "getter",
            ProjectionKind::Method(MethodKind::Setter) => "setter",
            ProjectionKind::Method(MethodKind::Ordinary) => "method",
            ProjectionKind::Parameter(ParameterKind::Ordinary) => "parameter",
            ProjectionKind::Parameter(ParameterKind::Setter) => "setter parameter",
            ProjectionKind::Parameter(ParameterKind::Constructor) => "constructor parameter",
        };
        f.write_str(s)
    }
}

/// A tooling-facing view of one declaration. Holds the declaration's id,
/// not the declaration: storage stays with the resolution stage.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub struct LightDeclarationProjection {
    pub owner: DeclarationId,
    pub kind: ProjectionKind,
}

impl LightDeclarationProjection {
    pub fn new(owner: DeclarationId, kind: ProjectionKind) -> Self {
        Self { owner, kind }
    }
}

impl fmt::Display for LightDeclarationProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.kind, self.owner)
    }
}
