use super::annotation::AnnotationDescriptor;
use super::declaration::DeclarationKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inferred nullability of the type a declaration exposes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Nullability {
    NotNull,
    Nullable,
    /// Primitive, `Unit` or platform types: nothing to annotate.
    #[default]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct FunctionDescriptor {
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
    /// Nullability of the return type.
    #[serde(default)]
    pub nullability: Nullability,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct ClassDescriptor {
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
    #[serde(default)]
    pub is_annotation_class: bool,
    #[serde(default)]
    pub primary_constructor: Option<FunctionDescriptor>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct AccessorDescriptor {
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
    #[serde(default)]
    pub nullability: Nullability,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct PropertyDescriptor {
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
    #[serde(default)]
    pub getter: Option<AccessorDescriptor>,
    /// Absent for read-only properties.
    #[serde(default)]
    pub setter: Option<AccessorDescriptor>,
    #[serde(default)]
    pub nullability: Nullability,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct ParameterDescriptor {
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
    #[serde(default)]
    pub nullability: Nullability,
    /// Property declared by a `val`/`var` primary-constructor parameter.
    #[serde(default)]
    pub property: Option<PropertyDescriptor>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct EnumConstantDescriptor {
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
}

/// Resolved semantic view of a declaration, closed over the declaration kinds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Descriptor {
    Class(ClassDescriptor),
    Property(PropertyDescriptor),
    Function(FunctionDescriptor),
    Parameter(ParameterDescriptor),
    EnumConstant(EnumConstantDescriptor),
    Accessor(AccessorDescriptor),
}

impl Descriptor {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Descriptor::Class(_) => DeclarationKind::Class,
            Descriptor::Property(_) => DeclarationKind::Property,
            Descriptor::Function(_) => DeclarationKind::Function,
            Descriptor::Parameter(_) => DeclarationKind::Parameter,
            Descriptor::EnumConstant(_) => DeclarationKind::EnumConstant,
            Descriptor::Accessor(_) => DeclarationKind::Accessor,
        }
    }

    pub fn annotations(&self) -> &[AnnotationDescriptor] {
        match self {
            Descriptor::Class(d) => &d.annotations,
            Descriptor::Property(d) => &d.annotations,
            Descriptor::Function(d) => &d.annotations,
            Descriptor::Parameter(d) => &d.annotations,
            Descriptor::EnumConstant(d) => &d.annotations,
            Descriptor::Accessor(d) => &d.annotations,
        }
    }

    pub fn nullability(&self) -> Nullability {
        match self {
            Descriptor::Property(d) => d.nullability,
            Descriptor::Function(d) => d.nullability,
            Descriptor::Parameter(d) => d.nullability,
            Descriptor::Accessor(d) => d.nullability,
            Descriptor::Class(_) | Descriptor::EnumConstant(_) => Nullability::Unknown,
        }
    }
}
