use lightscope_api::{
    AnnotationDescriptor, ApplicableTarget, ParameterKind, ProjectionKind, UseSiteTarget,
};
use std::collections::BTreeSet;
use tracing::trace;

/// Decides whether `annotation` binds to a projection of the given kind.
///
/// Backing fields only take `@field:` annotations, or unmarked ones whose
/// annotation class is applicable to fields but not to properties. Setter
/// and constructor parameters only take annotations aimed at them. Every
/// other projection takes everything.
///
/// `default_targets` stands in for annotation classes that carry no
/// applicable-target metadata.
pub fn matches(
    annotation: &AnnotationDescriptor,
    kind: ProjectionKind,
    default_targets: &BTreeSet<ApplicableTarget>,
) -> bool {
    let target = annotation.use_site_target;
    let matched = match kind {
        ProjectionKind::Field {
            enum_constant: false,
        } => match target {
            Some(UseSiteTarget::Field) => true,
            Some(_) => false,
            None => {
                let applicable = annotation
                    .applicable_targets
                    .as_ref()
                    .unwrap_or(default_targets);
                applicable.contains(&ApplicableTarget::Field)
                    && !applicable.contains(&ApplicableTarget::Property)
            }
        },
        ProjectionKind::Parameter(ParameterKind::Setter) => {
            target == Some(UseSiteTarget::SetterParameter)
        }
        ProjectionKind::Parameter(ParameterKind::Constructor) => {
            target == Some(UseSiteTarget::ConstructorParameter)
        }
        _ => true,
    };

    trace!(
        annotation = ?annotation.fq_name,
        ?target,
        %kind,
        matched,
        "use-site target check"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightscope_api::MethodKind;

    fn defaults() -> BTreeSet<ApplicableTarget> {
        ApplicableTarget::language_default()
    }

    fn field_only(name: &str) -> AnnotationDescriptor {
        AnnotationDescriptor::new(name).with_applicable_targets([ApplicableTarget::Field])
    }

    #[test]
    fn test_field_takes_explicit_field_target() {
        let ann = AnnotationDescriptor::new("a.B").with_target(UseSiteTarget::Field);
        assert!(matches(&ann, ProjectionKind::FIELD, &defaults()));
    }

    #[test]
    fn test_field_rejects_other_targets() {
        for target in [
            UseSiteTarget::Property,
            UseSiteTarget::PropertyGetter,
            UseSiteTarget::SetterParameter,
        ] {
            let ann = field_only("a.B").with_target(target);
            assert!(!matches(&ann, ProjectionKind::FIELD, &defaults()));
        }
    }

    #[test]
    fn test_unmarked_field_only_annotation_lands_on_field() {
        assert!(matches(&field_only("a.B"), ProjectionKind::FIELD, &defaults()));

        let both = AnnotationDescriptor::new("a.C")
            .with_applicable_targets([ApplicableTarget::Field, ApplicableTarget::Property]);
        assert!(!matches(&both, ProjectionKind::FIELD, &defaults()));
    }

    #[test]
    fn test_unmarked_without_metadata_uses_defaults() {
        let ann = AnnotationDescriptor::new("a.B");
        // The language default set contains PROPERTY.
        assert!(!matches(&ann, ProjectionKind::FIELD, &defaults()));

        let field_default: BTreeSet<_> = [ApplicableTarget::Field].into_iter().collect();
        assert!(matches(&ann, ProjectionKind::FIELD, &field_default));
    }

    #[test]
    fn test_enum_constant_field_takes_everything() {
        let ann = AnnotationDescriptor::new("a.B").with_target(UseSiteTarget::Property);
        assert!(matches(&ann, ProjectionKind::ENUM_CONSTANT, &defaults()));
    }

    #[test]
    fn test_parameter_targets() {
        let setparam = AnnotationDescriptor::new("a.B").with_target(UseSiteTarget::SetterParameter);
        let param =
            AnnotationDescriptor::new("a.B").with_target(UseSiteTarget::ConstructorParameter);
        let field = AnnotationDescriptor::new("a.B").with_target(UseSiteTarget::Field);
        let unmarked = AnnotationDescriptor::new("a.B");

        let setter = ProjectionKind::Parameter(ParameterKind::Setter);
        assert!(matches(&setparam, setter, &defaults()));
        assert!(!matches(&field, setter, &defaults()));
        assert!(!matches(&unmarked, setter, &defaults()));

        let ctor = ProjectionKind::Parameter(ParameterKind::Constructor);
        assert!(matches(&param, ctor, &defaults()));
        assert!(!matches(&setparam, ctor, &defaults()));

        let ordinary = ProjectionKind::Parameter(ParameterKind::Ordinary);
        assert!(matches(&unmarked, ordinary, &defaults()));
        assert!(matches(&field, ordinary, &defaults()));
    }

    #[test]
    fn test_methods_and_classes_take_everything() {
        let ann = AnnotationDescriptor::new("a.B").with_target(UseSiteTarget::Field);
        assert!(matches(&ann, ProjectionKind::Method(MethodKind::Getter), &defaults()));
        assert!(matches(&ann, ProjectionKind::CLASS, &defaults()));
    }
}
