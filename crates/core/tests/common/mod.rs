use lightscope_api::{
    AnnotationDescriptor, CompiledAnnotation, Declaration, DeclarationId, DeclarationKind,
    Descriptor, LightDeclarationProjection, OriginKind, Range, SyntaxRef,
};
use lightscope_core::snapshot::{CompiledEntry, DescriptorEntry, OriginEntry};
use lightscope_core::{LightSession, Snapshot, SnapshotModel};
use std::sync::Arc;

pub const FILE: &str = "Sample.kt";

/// Builds a snapshot one declaration at a time. Every syntax node handed
/// out sits on its own line, so nodes never collide.
#[derive(Default)]
pub struct Fixture {
    snapshot: Snapshot,
    next_line: usize,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&mut self) -> SyntaxRef {
        let line = self.next_line;
        self.next_line += 1;
        SyntaxRef::new(FILE, Range::new(line, 0, line, 10))
    }

    /// Source-backed declaration resolving to `descriptor`.
    pub fn declare(
        &mut self,
        id: u32,
        name: &str,
        kind: DeclarationKind,
        descriptor: Descriptor,
    ) -> DeclarationId {
        let node = self.node();
        self.snapshot
            .declarations
            .push(Declaration::new(DeclarationId(id), name, kind).with_origin(node.clone()));
        self.snapshot.descriptors.push(DescriptorEntry { node, descriptor });
        DeclarationId(id)
    }

    pub fn push(&mut self, declaration: Declaration) -> DeclarationId {
        let id = declaration.id;
        self.snapshot.declarations.push(declaration);
        id
    }

    pub fn descriptor(&mut self, node: SyntaxRef, descriptor: Descriptor) {
        self.snapshot.descriptors.push(DescriptorEntry { node, descriptor });
    }

    pub fn origin(&mut self, declaration: DeclarationId, kind: OriginKind) {
        self.snapshot.origins.push(OriginEntry { declaration, kind });
    }

    pub fn compiled(
        &mut self,
        projection: LightDeclarationProjection,
        annotations: Vec<CompiledAnnotation>,
        modifiers: &[&str],
    ) {
        self.snapshot.compiled.push(CompiledEntry {
            projection,
            annotations,
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
        });
    }

    /// Annotation application written at a fresh source entry.
    pub fn entry(&mut self, name: &str) -> AnnotationDescriptor {
        AnnotationDescriptor::new(name).with_source(self.node())
    }

    pub fn build(self) -> (Arc<SnapshotModel>, Arc<LightSession>) {
        let model = Arc::new(SnapshotModel::from_snapshot(self.snapshot).expect("valid fixture"));
        let session = Arc::new(LightSession::from_model(model.clone()));
        (model, session)
    }
}

#[allow(dead_code)]
pub fn names(annotations: &[lightscope_core::LightAnnotation]) -> Vec<String> {
    annotations
        .iter()
        .map(|ann| {
            ann.qualified_name()
                .map(|fq| fq.to_string())
                .unwrap_or_else(|| "<unnamed>".to_string())
        })
        .collect()
}
