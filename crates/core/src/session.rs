use crate::config::LightConfig;
use crate::modifier_list::{LightModifierList, ModifierSet};
use lightscope_api::{
    Cancelled, CompiledView, CompiledViewProvider, Declaration, DeclarationKind,
    DeclarationProvider, Descriptor, DescriptorResolver, EmptyCompiledView,
    LightDeclarationProjection, MethodKind, ParameterKind, ParentChain, ProjectionKind,
};
use std::sync::Arc;

/// The collaborators a light element needs, bundled for one tooling session.
#[derive(Clone)]
pub struct LightSession {
    pub declarations: Arc<dyn DeclarationProvider>,
    pub resolver: Arc<dyn DescriptorResolver>,
    pub origins: Arc<dyn ParentChain>,
    pub compiled: Arc<dyn CompiledViewProvider>,
    pub config: Arc<LightConfig>,
}

impl LightSession {
    /// Session over a single model that answers every collaborator query.
    pub fn from_model<M>(model: Arc<M>) -> Self
    where
        M: DeclarationProvider
            + DescriptorResolver
            + ParentChain
            + CompiledViewProvider
            + 'static,
    {
        Self {
            declarations: model.clone(),
            resolver: model.clone(),
            origins: model.clone(),
            compiled: model,
            config: Arc::new(LightConfig::default()),
        }
    }

    pub fn with_config(mut self, config: LightConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Compiled view for `projection`, or an empty one when none was generated.
    pub fn compiled_view(&self, projection: &LightDeclarationProjection) -> Arc<dyn CompiledView> {
        self.compiled
            .compiled_view(projection)
            .unwrap_or_else(|| Arc::new(EmptyCompiledView))
    }

    /// Modifier list whose modifier queries go to the compiled view.
    pub fn modifier_list(
        self: &Arc<Self>,
        projection: LightDeclarationProjection,
    ) -> LightModifierList {
        let compiled = self.compiled_view(&projection);
        LightModifierList::new(projection, self.clone(), compiled)
    }

    /// Modifier list with modifiers derived from the owning declaration.
    pub fn simple_modifier_list(
        self: &Arc<Self>,
        projection: LightDeclarationProjection,
    ) -> LightModifierList {
        let modifiers = self
            .declarations
            .declaration(projection.owner)
            .map(ModifierSet::from_declaration)
            .unwrap_or_default();
        let compiled = self.compiled_view(&projection);
        LightModifierList::simple(projection, self.clone(), compiled, modifiers)
    }

    /// Projection tooling asks for when it only has the declaration.
    /// A class projects as an annotation class when its descriptor says so;
    /// an unresolved class is a plain class.
    pub fn natural_projection(
        &self,
        declaration: &Declaration,
    ) -> Result<ProjectionKind, Cancelled> {
        let kind = match declaration.kind {
            DeclarationKind::Class => {
                let descriptor = match declaration.origin.as_ref() {
                    Some(origin) => self.resolver.resolve(origin)?,
                    None => None,
                };
                match descriptor.as_deref() {
                    Some(Descriptor::Class(class)) if class.is_annotation_class => {
                        ProjectionKind::ANNOTATION_CLASS
                    }
                    _ => ProjectionKind::CLASS,
                }
            }
            DeclarationKind::Property => ProjectionKind::FIELD,
            DeclarationKind::Function | DeclarationKind::Accessor => {
                ProjectionKind::Method(MethodKind::Ordinary)
            }
            DeclarationKind::Parameter => ProjectionKind::Parameter(ParameterKind::Ordinary),
            DeclarationKind::EnumConstant => ProjectionKind::ENUM_CONSTANT,
        };
        Ok(kind)
    }
}
