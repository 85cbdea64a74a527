use crate::annotation::{
    CompiledDelegate, LightAnnotation, NullabilityAnnotation, SourceEntryAnnotation,
};
use crate::matcher;
use crate::session::LightSession;
use indexmap::IndexMap;
use lightscope_api::{
    AnnotationDescriptor, Cancelled, CompiledAnnotation, CompiledView, Declaration, Descriptor,
    FqName, LightDeclarationProjection, MethodKind, Nullability, OriginKind, ParameterKind,
    ProjectionKind, PropertyDescriptor, SyntaxRef,
};
use std::collections::HashSet;
use tracing::debug;

/// Descriptor whose annotations a projection reads, picked out of the
/// descriptor its declaration resolved to.
#[derive(Debug, Clone, Copy)]
struct Selected<'a> {
    annotations: &'a [AnnotationDescriptor],
    nullability: Nullability,
    /// Property the selection was made from, if any.
    property: Option<&'a PropertyDescriptor>,
}

impl<'a> Selected<'a> {
    fn of(descriptor: &'a Descriptor) -> Self {
        Self {
            annotations: descriptor.annotations(),
            nullability: descriptor.nullability(),
            property: match descriptor {
                Descriptor::Property(p) => Some(p),
                _ => None,
            },
        }
    }

    fn of_property(property: &'a PropertyDescriptor, kind: ProjectionKind) -> Option<Self> {
        let (annotations, nullability) = match kind {
            ProjectionKind::Method(MethodKind::Getter) => {
                let getter = property.getter.as_ref()?;
                (getter.annotations.as_slice(), getter.nullability)
            }
            ProjectionKind::Method(MethodKind::Setter) => {
                let setter = property.setter.as_ref()?;
                (setter.annotations.as_slice(), setter.nullability)
            }
            _ => (property.annotations.as_slice(), property.nullability),
        };
        Some(Self {
            annotations,
            nullability,
            property: Some(property),
        })
    }
}

fn select(descriptor: &Descriptor, kind: ProjectionKind) -> Option<Selected<'_>> {
    match descriptor {
        Descriptor::Class(class) if kind == ProjectionKind::Method(MethodKind::Constructor) => {
            let ctor = class.primary_constructor.as_ref()?;
            Some(Selected {
                annotations: &ctor.annotations,
                nullability: ctor.nullability,
                property: None,
            })
        }
        Descriptor::Parameter(param) => match (&param.property, kind) {
            // A `val`/`var` parameter: the constructor parameter reads the
            // value parameter, every other projection reads the property.
            (Some(property), kind)
                if kind != ProjectionKind::Parameter(ParameterKind::Constructor) =>
            {
                Selected::of_property(property, kind)
            }
            _ => Some(Selected::of(descriptor)),
        },
        Descriptor::Property(property) => Selected::of_property(property, kind),
        _ => Some(Selected::of(descriptor)),
    }
}

/// Computes the annotation list of one light element.
pub struct AnnotationProjector<'a> {
    session: &'a LightSession,
    compiled: &'a dyn CompiledView,
}

impl<'a> AnnotationProjector<'a> {
    pub fn new(session: &'a LightSession, compiled: &'a dyn CompiledView) -> Self {
        Self { session, compiled }
    }

    /// Annotations visible on `projection`, in output order: source entries
    /// grouped by name in first-seen order, then compiled-only additions,
    /// then the nullability annotation.
    ///
    /// `given` replaces the annotations read from source entries.
    /// Lookup failures contribute nothing; only cancellation is an error.
    pub fn project(
        &self,
        projection: &LightDeclarationProjection,
        given: Option<&[LightAnnotation]>,
    ) -> Result<Vec<LightAnnotation>, Cancelled> {
        let Some(declaration) = self.source_declaration(projection) else {
            return Ok(Vec::new());
        };
        let Some(origin) = declaration.origin.as_ref() else {
            return Ok(Vec::new());
        };
        let Some(descriptor) = self.session.resolver.resolve(origin)? else {
            debug!(%projection, node = %origin, "declaration did not resolve");
            return Ok(Vec::new());
        };
        let Some(selected) = select(&descriptor, projection.kind) else {
            debug!(%projection, "no descriptor for this projection");
            return Ok(Vec::new());
        };

        let mut annotations = match given {
            Some(given) => given.to_vec(),
            None if declaration.annotated_in_source => {
                self.annotations_for_entries(projection.kind, selected)
            }
            None => Vec::new(),
        };

        if projection.kind == ProjectionKind::ANNOTATION_CLASS {
            self.append_compiled_only(&mut annotations);
        } else if projection.kind.carries_nullability() {
            annotations.push(LightAnnotation::Nullability(NullabilityAnnotation {
                owner: *projection,
                nullability: selected.nullability,
                qualified_name: self
                    .session
                    .config
                    .nullability_annotation(selected.nullability)
                    .cloned(),
            }));
        }

        Ok(annotations)
    }

    /// Owning declaration, if it exists and is not known to be synthesized.
    fn source_declaration(
        &self,
        projection: &LightDeclarationProjection,
    ) -> Option<&'a Declaration> {
        let Some(declaration) = self.session.declarations.declaration(projection.owner) else {
            debug!(%projection, "owning declaration is gone");
            return None;
        };
        if declaration.is_synthesized() {
            return None;
        }
        if self.session.origins.nearest_origin_kind(declaration.id) == OriginKind::Synthesized {
            debug!(%projection, "enclosing declaration is synthesized");
            return None;
        }
        Some(declaration)
    }

    fn annotations_for_entries(
        &self,
        kind: ProjectionKind,
        selected: Selected<'_>,
    ) -> Vec<LightAnnotation> {
        let config = &self.session.config;
        let mut retained: Vec<&AnnotationDescriptor> = selected
            .annotations
            .iter()
            .filter(|ann| matcher::matches(ann, kind, &config.default_applicable_targets))
            .collect();

        // The JVM-default marker binds regardless of its use-site target.
        // Without a source entry it is a compiled-view addition, appended
        // after the source-derived groups.
        let mut compiled_marker = None;
        if let Some(marker) = selected.property.and_then(|p| {
            p.annotations
                .iter()
                .find(|ann| ann.has_fq_name(config.jvm_default_annotation.as_str()))
        }) {
            if marker.source.is_some() {
                if !retained.contains(&marker) {
                    retained.push(marker);
                }
            } else {
                compiled_marker = Some(&config.jvm_default_annotation);
            }
        }

        let mut groups: IndexMap<&FqName, Vec<(&SyntaxRef, &AnnotationDescriptor)>> =
            IndexMap::new();
        for ann in retained {
            // Unresolved annotation classes and entries without a source
            // node have nothing to pair.
            let (Some(fq_name), Some(entry)) = (ann.fq_name.as_ref(), ann.source.as_ref()) else {
                continue;
            };
            groups.entry(fq_name).or_default().push((entry, ann));
        }
        if groups.is_empty() && compiled_marker.is_none() {
            return Vec::new();
        }

        let compiled = self.compiled.modifier_annotations();
        let mut result = Vec::new();
        for (fq_name, entries) in groups {
            let mut counterparts = compiled.iter().filter(|c| &c.qualified_name == fq_name);
            for (ordinal, (entry, ann)) in entries.into_iter().enumerate() {
                let delegate = counterparts
                    .next()
                    .cloned()
                    .map(CompiledDelegate::Compiled)
                    .unwrap_or(CompiledDelegate::NonExistent);
                result.push(LightAnnotation::SourceEntry(SourceEntryAnnotation {
                    qualified_name: fq_name.clone(),
                    entry: entry.clone(),
                    use_site_target: ann.use_site_target,
                    ordinal,
                    delegate,
                }));
            }
        }

        if let Some(marker) = compiled_marker {
            if !result.iter().any(|ann| ann.has_qualified_name(marker.as_str())) {
                let annotation = compiled
                    .iter()
                    .find(|c| &c.qualified_name == marker)
                    .cloned()
                    .unwrap_or_else(|| CompiledAnnotation::new(marker.clone()));
                result.push(LightAnnotation::NonSource(annotation));
            }
        }
        result
    }

    /// Annotation classes get the compiled view's implicit annotations too.
    fn append_compiled_only(&self, annotations: &mut Vec<LightAnnotation>) {
        let mut seen: HashSet<FqName> = annotations
            .iter()
            .filter_map(|ann| ann.qualified_name().cloned())
            .collect();
        for compiled in self.compiled.modifier_annotations() {
            if seen.insert(compiled.qualified_name.clone()) {
                annotations.push(LightAnnotation::NonSource(compiled));
            }
        }
    }
}
