use crate::error::{ApiError, ApiResult, Cancelled};
use crate::models::{
    CompiledAnnotation, Declaration, DeclarationId, Descriptor, FqName,
    LightDeclarationProjection, SyntaxRef,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Collaborators consumed by the light-element layer
// ============================================================================

/// Storage of resolved declarations, owned by the resolution stage.
pub trait DeclarationProvider: Send + Sync {
    fn declaration(&self, id: DeclarationId) -> Option<&Declaration>;
}

/// Maps a syntax node to its semantic descriptor.
pub trait DescriptorResolver: Send + Sync {
    /// `Ok(None)` when the node is stale or does not resolve.
    /// `Err(Cancelled)` when the underlying analysis was cancelled.
    fn resolve(&self, node: &SyntaxRef) -> Result<Option<Arc<Descriptor>>, Cancelled>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OriginKind {
    /// Light member backed by a source declaration.
    SourceBacked,
    /// Light member generated from compiled output only.
    Synthesized,
    Unknown,
}

/// Walks the enclosing-declaration chain.
pub trait ParentChain: Send + Sync {
    /// Origin kind of the nearest enclosing declaration that has one.
    fn nearest_origin_kind(&self, id: DeclarationId) -> OriginKind;
}

/// Binary-level modifier list of a light element.
pub trait CompiledView: Send + Sync {
    fn modifier_annotations(&self) -> Vec<CompiledAnnotation>;

    fn has_modifier_property(&self, name: &str) -> bool;

    fn add_annotation(&self, _name: &FqName) -> ApiResult<CompiledAnnotation> {
        Err(ApiError::Unsupported {
            operation: "add_annotation",
        })
    }

    fn set_modifier_property(&self, _name: &str, _value: bool) -> ApiResult<()> {
        Err(ApiError::Unsupported {
            operation: "set_modifier_property",
        })
    }
}

/// Hands out the compiled view backing a projection, if one was generated.
pub trait CompiledViewProvider: Send + Sync {
    fn compiled_view(
        &self,
        projection: &LightDeclarationProjection,
    ) -> Option<Arc<dyn CompiledView>>;
}

/// Compiled view with no annotations and no modifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCompiledView;

impl CompiledView for EmptyCompiledView {
    fn modifier_annotations(&self) -> Vec<CompiledAnnotation> {
        Vec::new()
    }

    fn has_modifier_property(&self, _name: &str) -> bool {
        false
    }
}
