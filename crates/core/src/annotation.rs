use lightscope_api::{
    AttributeValue, CompiledAnnotation, FqName, LightDeclarationProjection, Nullability,
    SyntaxRef, UseSiteTarget,
};

/// Compiled-view counterpart of a source annotation entry.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledDelegate {
    Compiled(CompiledAnnotation),
    /// The compiled view had fewer same-named entries than the source.
    /// Inert: every query on it answers with a default.
    NonExistent,
}

impl CompiledDelegate {
    pub fn as_compiled(&self) -> Option<&CompiledAnnotation> {
        match self {
            CompiledDelegate::Compiled(ann) => Some(ann),
            CompiledDelegate::NonExistent => None,
        }
    }
}

/// Annotation written in source, paired by ordinal with the compiled view.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntryAnnotation {
    pub qualified_name: FqName,
    pub entry: SyntaxRef,
    pub use_site_target: Option<UseSiteTarget>,
    /// Position among same-named entries on the declaration.
    pub ordinal: usize,
    pub delegate: CompiledDelegate,
}

/// Inferred nullability, attributed to the projection it was computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct NullabilityAnnotation {
    pub owner: LightDeclarationProjection,
    pub nullability: Nullability,
    /// `None` when the nullability is unknown.
    pub qualified_name: Option<FqName>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LightAnnotation {
    SourceEntry(SourceEntryAnnotation),
    /// Present only in the compiled view (implicit annotations on
    /// annotation classes).
    NonSource(CompiledAnnotation),
    Nullability(NullabilityAnnotation),
}

impl LightAnnotation {
    pub fn qualified_name(&self) -> Option<&FqName> {
        match self {
            LightAnnotation::SourceEntry(ann) => Some(&ann.qualified_name),
            LightAnnotation::NonSource(ann) => Some(&ann.qualified_name),
            LightAnnotation::Nullability(ann) => ann.qualified_name.as_ref(),
        }
    }

    pub fn has_qualified_name(&self, name: &str) -> bool {
        self.qualified_name().is_some_and(|fq| fq == name)
    }

    pub fn find_attribute_value(&self, name: &str) -> Option<&AttributeValue> {
        match self {
            LightAnnotation::SourceEntry(ann) => ann
                .delegate
                .as_compiled()
                .and_then(|c| c.find_attribute_value(name)),
            LightAnnotation::NonSource(ann) => ann.find_attribute_value(name),
            LightAnnotation::Nullability(_) => None,
        }
    }

    /// Source entry this annotation was written at, if any.
    pub fn source_entry(&self) -> Option<&SyntaxRef> {
        match self {
            LightAnnotation::SourceEntry(ann) => Some(&ann.entry),
            _ => None,
        }
    }

    pub fn is_non_existent(&self) -> bool {
        matches!(
            self,
            LightAnnotation::SourceEntry(SourceEntryAnnotation {
                delegate: CompiledDelegate::NonExistent,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightscope_api::{DeclarationId, ProjectionKind, Range};

    fn entry(delegate: CompiledDelegate) -> LightAnnotation {
        LightAnnotation::SourceEntry(SourceEntryAnnotation {
            qualified_name: FqName::new("test.Tag"),
            entry: SyntaxRef::new("A.kt", Range::new(0, 0, 0, 4)),
            use_site_target: None,
            ordinal: 0,
            delegate,
        })
    }

    #[test]
    fn test_non_existent_delegate_is_inert() {
        let ann = entry(CompiledDelegate::NonExistent);
        assert!(ann.is_non_existent());
        assert!(ann.has_qualified_name("test.Tag"));
        assert!(ann.find_attribute_value("value").is_none());
    }

    #[test]
    fn test_attribute_delegates_to_compiled() {
        let compiled = CompiledAnnotation::new("test.Tag")
            .with_attribute("value", AttributeValue::Int(3));
        let ann = entry(CompiledDelegate::Compiled(compiled));
        assert!(!ann.is_non_existent());
        assert_eq!(ann.find_attribute_value("value"), Some(&AttributeValue::Int(3)));
    }

    #[test]
    fn test_unknown_nullability_has_no_name() {
        let ann = LightAnnotation::Nullability(NullabilityAnnotation {
            owner: LightDeclarationProjection::new(DeclarationId(1), ProjectionKind::FIELD),
            nullability: Nullability::Unknown,
            qualified_name: None,
        });
        assert!(ann.qualified_name().is_none());
        assert!(ann.source_entry().is_none());
    }
}
