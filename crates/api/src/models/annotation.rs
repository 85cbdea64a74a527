use super::declaration::SyntaxRef;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::collections::BTreeSet;
use std::fmt;

/// Fully qualified name of an annotation class, e.g. `kotlin.jvm.JvmField`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema)]
#[serde(transparent)]
pub struct FqName(#[schemars(with = "String")] SmolStr);

impl FqName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(SmolStr::new(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FqName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FqName {
    fn from(s: String) -> Self {
        Self(SmolStr::from(s))
    }
}

impl PartialEq<str> for FqName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FqName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Use-site target written (or implied by the language's default-target
/// rules) in front of an annotation, e.g. `@field:Foo` or `@setparam:Bar`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UseSiteTarget {
    Field,
    File,
    Property,
    PropertyGetter,
    PropertySetter,
    Receiver,
    ConstructorParameter,
    SetterParameter,
    PropertyDelegateField,
}

impl UseSiteTarget {
    /// Keyword used in source before the colon.
    pub fn render_name(&self) -> &'static str {
        match self {
            UseSiteTarget::Field => "field",
            UseSiteTarget::File => "file",
            UseSiteTarget::Property => "property",
            UseSiteTarget::PropertyGetter => "get",
            UseSiteTarget::PropertySetter => "set",
            UseSiteTarget::Receiver => "receiver",
            UseSiteTarget::ConstructorParameter => "param",
            UseSiteTarget::SetterParameter => "setparam",
            UseSiteTarget::PropertyDelegateField => "delegate",
        }
    }
}

/// Artifact kinds an annotation class allows itself to be placed on.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicableTarget {
    Class,
    AnnotationClass,
    TypeParameter,
    Property,
    Field,
    LocalVariable,
    ValueParameter,
    Constructor,
    Function,
    PropertyGetter,
    PropertySetter,
    Type,
    Expression,
    File,
    Typealias,
}

impl ApplicableTarget {
    /// Targets assumed for an annotation class that declares none.
    pub fn language_default() -> BTreeSet<ApplicableTarget> {
        [
            ApplicableTarget::Class,
            ApplicableTarget::Property,
            ApplicableTarget::Field,
            ApplicableTarget::LocalVariable,
            ApplicableTarget::ValueParameter,
            ApplicableTarget::Constructor,
            ApplicableTarget::Function,
            ApplicableTarget::PropertyGetter,
            ApplicableTarget::PropertySetter,
        ]
        .into_iter()
        .collect()
    }
}

/// One annotation application as reported by the resolver.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct AnnotationDescriptor {
    /// `None` when the annotation class itself did not resolve.
    pub fq_name: Option<FqName>,
    /// Explicit target, or the target the resolver assigned while splitting
    /// annotations between a declaration's artifacts.
    #[serde(default)]
    pub use_site_target: Option<UseSiteTarget>,
    /// Declaration-site targets of the annotation class. `None` when the
    /// class carries no target metadata.
    #[serde(default)]
    pub applicable_targets: Option<BTreeSet<ApplicableTarget>>,
    /// Annotation entry in source this application came from.
    #[serde(default)]
    pub source: Option<SyntaxRef>,
}

impl AnnotationDescriptor {
    pub fn new(fq_name: impl Into<FqName>) -> Self {
        Self {
            fq_name: Some(fq_name.into()),
            use_site_target: None,
            applicable_targets: None,
            source: None,
        }
    }

    pub fn with_target(mut self, target: UseSiteTarget) -> Self {
        self.use_site_target = Some(target);
        self
    }

    pub fn with_applicable_targets(
        mut self,
        targets: impl IntoIterator<Item = ApplicableTarget>,
    ) -> Self {
        self.applicable_targets = Some(targets.into_iter().collect());
        self
    }

    pub fn with_source(mut self, source: SyntaxRef) -> Self {
        self.source = Some(source);
        self
    }

    pub fn has_fq_name(&self, name: &str) -> bool {
        self.fq_name.as_ref().is_some_and(|fq| fq == name)
    }
}

/// Value of a single annotation attribute in the compiled view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Class(FqName),
    Enum { class: FqName, entry: String },
    Array(Vec<AttributeValue>),
    Annotation(Box<CompiledAnnotation>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct AnnotationAttribute {
    pub name: String,
    pub value: AttributeValue,
}

/// Annotation as it appears in the compiled (binary-level) view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct CompiledAnnotation {
    pub qualified_name: FqName,
    #[serde(default)]
    pub attributes: Vec<AnnotationAttribute>,
}

impl CompiledAnnotation {
    pub fn new(qualified_name: impl Into<FqName>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.push(AnnotationAttribute {
            name: name.into(),
            value,
        });
        self
    }

    pub fn find_attribute_value(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_json_shape() {
        let json = r#"{
            "fq_name": "kotlin.jvm.JvmField",
            "use_site_target": "setter_parameter",
            "applicable_targets": ["FIELD"]
        }"#;
        let descriptor: AnnotationDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.use_site_target, Some(UseSiteTarget::SetterParameter));
        assert!(descriptor.has_fq_name("kotlin.jvm.JvmField"));
        assert!(
            descriptor
                .applicable_targets
                .as_ref()
                .unwrap()
                .contains(&ApplicableTarget::Field)
        );
        assert!(descriptor.source.is_none());
    }

    #[test]
    fn test_compiled_attribute_lookup() {
        let ann = CompiledAnnotation::new("kotlin.Deprecated")
            .with_attribute("message", AttributeValue::Str("use bar".to_string()));
        assert_eq!(
            ann.find_attribute_value("message"),
            Some(&AttributeValue::Str("use bar".to_string()))
        );
        assert!(ann.find_attribute_value("level").is_none());
    }
}
