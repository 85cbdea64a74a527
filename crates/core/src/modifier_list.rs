use crate::annotation::LightAnnotation;
use crate::projector::AnnotationProjector;
use crate::session::LightSession;
use lightscope_api::{
    ApiResult, Cancelled, CompiledAnnotation, CompiledView, Declaration, FqName,
    LightDeclarationProjection, Modality, Visibility,
};
use once_cell::sync::OnceCell;
use smol_str::SmolStr;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub mod names {
    pub const PUBLIC: &str = "public";
    pub const PROTECTED: &str = "protected";
    pub const PRIVATE: &str = "private";
    pub const FINAL: &str = "final";
    pub const ABSTRACT: &str = "abstract";
    pub const STATIC: &str = "static";
}

/// Fixed set of modifier names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSet(BTreeSet<SmolStr>);

impl ModifierSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(names.into_iter().map(|n| SmolStr::new(n.as_ref())).collect())
    }

    /// Binary-level modifiers implied by a declaration's modality and
    /// visibility. `internal` compiles to `public`; sealed and abstract
    /// both compile to `abstract`; open leaves `final` off.
    pub fn from_declaration(declaration: &Declaration) -> Self {
        let mut set = BTreeSet::new();
        set.insert(SmolStr::new_static(match declaration.visibility {
            Visibility::Public | Visibility::Internal => names::PUBLIC,
            Visibility::Protected => names::PROTECTED,
            Visibility::Private => names::PRIVATE,
        }));
        match declaration.modality {
            Modality::Final => {
                set.insert(SmolStr::new_static(names::FINAL));
            }
            Modality::Abstract | Modality::Sealed => {
                set.insert(SmolStr::new_static(names::ABSTRACT));
            }
            Modality::Open => {}
        }
        Self(set)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }
}

enum Modifiers {
    Fixed(ModifierSet),
    Compiled,
}

/// Modifier list of a light element: annotations plus modifier flags.
///
/// Annotations are projected on first access and kept for the lifetime of
/// the instance. A cancelled projection leaves nothing cached, so the next
/// access projects again.
pub struct LightModifierList {
    owner: LightDeclarationProjection,
    session: Arc<LightSession>,
    compiled: Arc<dyn CompiledView>,
    modifiers: Modifiers,
    given: Option<Vec<LightAnnotation>>,
    annotations: OnceCell<Vec<LightAnnotation>>,
}

impl LightModifierList {
    /// Modifier queries delegate to the compiled view.
    pub fn new(
        owner: LightDeclarationProjection,
        session: Arc<LightSession>,
        compiled: Arc<dyn CompiledView>,
    ) -> Self {
        Self {
            owner,
            session,
            compiled,
            modifiers: Modifiers::Compiled,
            given: None,
            annotations: OnceCell::new(),
        }
    }

    /// Modifier queries answer from `modifiers`, captured here.
    pub fn simple(
        owner: LightDeclarationProjection,
        session: Arc<LightSession>,
        compiled: Arc<dyn CompiledView>,
        modifiers: ModifierSet,
    ) -> Self {
        Self {
            modifiers: Modifiers::Fixed(modifiers),
            ..Self::new(owner, session, compiled)
        }
    }

    pub fn with_given_annotations(mut self, given: Vec<LightAnnotation>) -> Self {
        self.given = Some(given);
        self
    }

    pub fn owner(&self) -> &LightDeclarationProjection {
        &self.owner
    }

    pub fn annotations(&self) -> Result<&[LightAnnotation], Cancelled> {
        self.annotations
            .get_or_try_init(|| {
                AnnotationProjector::new(&self.session, self.compiled.as_ref())
                    .project(&self.owner, self.given.as_deref())
            })
            .map(Vec::as_slice)
    }

    pub fn find_annotation(
        &self,
        qualified_name: &str,
    ) -> Result<Option<&LightAnnotation>, Cancelled> {
        Ok(self
            .annotations()?
            .iter()
            .find(|ann| ann.has_qualified_name(qualified_name)))
    }

    pub fn has_annotation(&self, qualified_name: &str) -> Result<bool, Cancelled> {
        Ok(self.find_annotation(qualified_name)?.is_some())
    }

    pub fn has_modifier_property(&self, name: &str) -> bool {
        match &self.modifiers {
            Modifiers::Fixed(set) => set.contains(name),
            Modifiers::Compiled => self.compiled.has_modifier_property(name),
        }
    }

    pub fn has_explicit_modifier(&self, name: &str) -> bool {
        self.has_modifier_property(name)
    }

    /// Writes through to the compiled view. The memoized annotation list
    /// of this instance is not touched.
    pub fn add_annotation(&self, qualified_name: &FqName) -> ApiResult<CompiledAnnotation> {
        self.compiled.add_annotation(qualified_name)
    }

    pub fn set_modifier_property(&self, name: &str, value: bool) -> ApiResult<()> {
        self.compiled.set_modifier_property(name, value)
    }
}

impl PartialEq for LightModifierList {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner
    }
}

impl Eq for LightModifierList {}

impl Hash for LightModifierList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
    }
}

impl fmt::Debug for LightModifierList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightModifierList")
            .field("owner", &self.owner)
            .field("computed", &self.annotations.get().is_some())
            .finish()
    }
}
