//! JSON snapshot of an analysed program and an in-memory model over it.
//!
//! The model answers every collaborator query the light-element layer makes,
//! which makes it the backing store for the inspection CLI and for tests.

use crate::error::{LightscopeError, Result};
use lightscope_api::{
    ApiError, ApiResult, Cancelled, CompiledAnnotation, CompiledView, CompiledViewProvider,
    Declaration, DeclarationId, DeclarationProvider, Descriptor, DescriptorResolver, FqName,
    LightDeclarationProjection, OriginKind, ParentChain, SyntaxRef,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DescriptorEntry {
    pub node: SyntaxRef,
    pub descriptor: Descriptor,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OriginEntry {
    pub declaration: DeclarationId,
    pub kind: OriginKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompiledEntry {
    pub projection: LightDeclarationProjection,
    #[serde(default)]
    pub annotations: Vec<CompiledAnnotation>,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub descriptors: Vec<DescriptorEntry>,
    #[serde(default)]
    pub origins: Vec<OriginEntry>,
    #[serde(default)]
    pub compiled: Vec<CompiledEntry>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Compiled modifier list with interior mutability for write-through edits.
#[derive(Debug, Default)]
pub struct CompiledModifierList {
    annotations: RwLock<Vec<CompiledAnnotation>>,
    modifiers: RwLock<BTreeSet<String>>,
}

impl CompiledModifierList {
    pub fn new(
        annotations: Vec<CompiledAnnotation>,
        modifiers: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            annotations: RwLock::new(annotations),
            modifiers: RwLock::new(modifiers.into_iter().collect()),
        }
    }
}

impl CompiledView for CompiledModifierList {
    fn modifier_annotations(&self) -> Vec<CompiledAnnotation> {
        self.annotations
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn has_modifier_property(&self, name: &str) -> bool {
        self.modifiers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(name)
    }

    fn add_annotation(&self, name: &FqName) -> ApiResult<CompiledAnnotation> {
        if name.as_str().is_empty() {
            return Err(ApiError::InvalidArgument(
                "annotation name must not be empty".to_string(),
            ));
        }
        let annotation = CompiledAnnotation::new(name.clone());
        self.annotations
            .write()
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .push(annotation.clone());
        Ok(annotation)
    }

    fn set_modifier_property(&self, name: &str, value: bool) -> ApiResult<()> {
        let mut modifiers = self
            .modifiers
            .write()
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        if value {
            modifiers.insert(name.to_string());
        } else {
            modifiers.remove(name);
        }
        Ok(())
    }
}

pub struct SnapshotModel {
    declarations: HashMap<DeclarationId, Declaration>,
    descriptors: HashMap<SyntaxRef, Arc<Descriptor>>,
    origins: HashMap<DeclarationId, OriginKind>,
    compiled: HashMap<LightDeclarationProjection, Arc<CompiledModifierList>>,
    cancellation: RwLock<CancellationToken>,
}

impl SnapshotModel {
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut declarations = HashMap::with_capacity(snapshot.declarations.len());
        for decl in snapshot.declarations {
            let id = decl.id;
            if declarations.insert(id, decl).is_some() {
                return Err(LightscopeError::Snapshot(format!(
                    "declaration {id} is defined twice"
                )));
            }
        }
        for decl in declarations.values() {
            if let Some(parent) = decl.parent {
                if !declarations.contains_key(&parent) {
                    warn!(
                        declaration = %decl.id,
                        %parent,
                        "parent declaration is not in the snapshot"
                    );
                }
            }
        }

        let mut descriptors = HashMap::with_capacity(snapshot.descriptors.len());
        for entry in snapshot.descriptors {
            if descriptors.contains_key(&entry.node) {
                return Err(LightscopeError::Snapshot(format!(
                    "node {} has more than one descriptor",
                    entry.node
                )));
            }
            descriptors.insert(entry.node, Arc::new(entry.descriptor));
        }

        let mut origins = HashMap::new();
        for entry in snapshot.origins {
            if !declarations.contains_key(&entry.declaration) {
                warn!(declaration = %entry.declaration, "origin recorded for unknown declaration");
            }
            origins.insert(entry.declaration, entry.kind);
        }

        let mut compiled = HashMap::new();
        for entry in snapshot.compiled {
            if !declarations.contains_key(&entry.projection.owner) {
                warn!(
                    projection = %entry.projection,
                    "compiled view recorded for unknown declaration"
                );
            }
            compiled.insert(
                entry.projection,
                Arc::new(CompiledModifierList::new(entry.annotations, entry.modifiers)),
            );
        }

        debug!(
            declarations = declarations.len(),
            descriptors = descriptors.len(),
            compiled = compiled.len(),
            "snapshot model ready"
        );

        Ok(Self {
            declarations,
            descriptors,
            origins,
            compiled,
            cancellation: RwLock::new(CancellationToken::new()),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_snapshot(Snapshot::load(path)?)
    }

    /// Declarations ordered by id.
    pub fn declarations(&self) -> Vec<&Declaration> {
        let mut decls: Vec<_> = self.declarations.values().collect();
        decls.sort_by_key(|d| d.id);
        decls
    }

    /// Projections that have a compiled view, ordered by owner.
    pub fn projections(&self) -> Vec<LightDeclarationProjection> {
        let mut projections: Vec<_> = self.compiled.keys().copied().collect();
        projections.sort_by_key(|p| p.owner);
        projections
    }

    /// Token observed by [`DescriptorResolver::resolve`]. Cancelling it makes
    /// every resolution fail with [`Cancelled`] until
    /// [`SnapshotModel::reset_cancellation`] installs a fresh one.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn cancel(&self) {
        self.cancellation_token().cancel();
    }

    pub fn reset_cancellation(&self) {
        *self
            .cancellation
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = CancellationToken::new();
    }
}

impl DeclarationProvider for SnapshotModel {
    fn declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        self.declarations.get(&id)
    }
}

impl DescriptorResolver for SnapshotModel {
    fn resolve(&self, node: &SyntaxRef) -> std::result::Result<Option<Arc<Descriptor>>, Cancelled> {
        if self.cancellation_token().is_cancelled() {
            return Err(Cancelled);
        }
        Ok(self.descriptors.get(node).cloned())
    }
}

impl ParentChain for SnapshotModel {
    fn nearest_origin_kind(&self, id: DeclarationId) -> OriginKind {
        let mut visited = HashSet::new();
        let mut current = Some(id);
        while let Some(id) = current {
            if !visited.insert(id) {
                warn!(declaration = %id, "cycle in parent chain");
                break;
            }
            if let Some(kind) = self.origins.get(&id) {
                return *kind;
            }
            current = self.declarations.get(&id).and_then(|d| d.parent);
        }
        OriginKind::Unknown
    }
}

impl CompiledViewProvider for SnapshotModel {
    fn compiled_view(
        &self,
        projection: &LightDeclarationProjection,
    ) -> Option<Arc<dyn CompiledView>> {
        self.compiled
            .get(projection)
            .map(|view| view.clone() as Arc<dyn CompiledView>)
    }
}
