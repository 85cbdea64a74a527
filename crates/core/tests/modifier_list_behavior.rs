mod common;

use common::{Fixture, names};
use lightscope_api::{
    Cancelled, CompiledAnnotation, Declaration, DeclarationId, DeclarationKind, Descriptor,
    FqName, FunctionDescriptor, LightDeclarationProjection, MethodKind, Modality, Nullability,
    ProjectionKind, PropertyDescriptor, Visibility,
};
use lightscope_core::{LightAnnotation, LightElementCache, LightModifierList};
use std::sync::Arc;

fn method_fixture() -> (Fixture, LightDeclarationProjection) {
    let mut fx = Fixture::new();
    let deprecated = fx.entry("kotlin.Deprecated");
    let id = fx.declare(
        1,
        "legacy",
        DeclarationKind::Function,
        Descriptor::Function(FunctionDescriptor {
            annotations: vec![deprecated],
            nullability: Nullability::NotNull,
        }),
    );
    let projection =
        LightDeclarationProjection::new(id, ProjectionKind::Method(MethodKind::Ordinary));
    fx.compiled(
        projection,
        vec![CompiledAnnotation::new("kotlin.Deprecated")],
        &["public", "final"],
    );
    (fx, projection)
}

#[test]
fn test_annotations_are_memoized() {
    let (fx, projection) = method_fixture();
    let (_, session) = fx.build();
    let list = session.modifier_list(projection);

    let first = list.annotations().unwrap();
    let second = list.annotations().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(
        names(first),
        vec!["kotlin.Deprecated", "org.jetbrains.annotations.NotNull"]
    );
}

#[test]
fn test_add_annotation_does_not_touch_memoized_list() {
    let (fx, projection) = method_fixture();
    let (_, session) = fx.build();
    let list = session.modifier_list(projection);
    let before = list.annotations().unwrap().len();

    let added = list.add_annotation(&FqName::new("test.Added")).unwrap();
    assert_eq!(added.qualified_name, "test.Added");
    assert_eq!(list.annotations().unwrap().len(), before);

    // A new instance sees the write-through.
    let fresh = session.modifier_list(projection);
    assert!(
        session
            .compiled_view(fresh.owner())
            .modifier_annotations()
            .iter()
            .any(|c| c.qualified_name == "test.Added")
    );
}

#[test]
fn test_cancellation_propagates_and_is_not_cached() {
    let (fx, projection) = method_fixture();
    let (model, session) = fx.build();
    let list = session.modifier_list(projection);

    model.cancel();
    assert_eq!(list.annotations().unwrap_err(), Cancelled);
    assert_eq!(list.find_annotation("kotlin.Deprecated").unwrap_err(), Cancelled);
    assert_eq!(list.has_annotation("kotlin.Deprecated").unwrap_err(), Cancelled);

    model.reset_cancellation();
    let annotations = list.annotations().unwrap();
    assert_eq!(annotations.len(), 2);
    assert!(list.has_annotation("kotlin.Deprecated").unwrap());

    // Once computed, later cancellation no longer matters.
    model.cancel();
    assert!(list.annotations().is_ok());
}

#[test]
fn test_concurrent_readers_see_one_list() {
    let (fx, projection) = method_fixture();
    let (_, session) = fx.build();
    let list = Arc::new(session.modifier_list(projection));

    let addresses: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let list = list.clone();
                scope.spawn(move || list.annotations().unwrap().as_ptr() as usize)
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(addresses[0], list.annotations().unwrap().as_ptr() as usize);
}

#[test]
fn test_general_list_delegates_modifiers_to_compiled_view() {
    let (fx, projection) = method_fixture();
    let (_, session) = fx.build();
    let list = session.modifier_list(projection);

    assert!(list.has_modifier_property("final"));
    assert!(list.has_explicit_modifier("public"));
    assert!(!list.has_modifier_property("abstract"));

    list.set_modifier_property("final", false).unwrap();
    assert!(!list.has_modifier_property("final"));
}

#[test]
fn test_simple_list_answers_from_captured_set() {
    let mut fx = Fixture::new();
    let node = fx.node();
    let id = fx.push(
        Declaration::new(DeclarationId(5), "Shape", DeclarationKind::Class)
            .with_origin(node)
            .with_modality(Modality::Sealed)
            .with_visibility(Visibility::Internal),
    );
    let (_, session) = fx.build();
    let list =
        session.simple_modifier_list(LightDeclarationProjection::new(id, ProjectionKind::CLASS));

    assert!(list.has_modifier_property("abstract"));
    assert!(list.has_modifier_property("public"));
    assert!(!list.has_modifier_property("final"));

    // No compiled view was generated for this class, so writes have
    // nowhere to go; the captured set stays as it was.
    assert!(list.set_modifier_property("final", true).is_err());
    assert!(!list.has_modifier_property("final"));
}

#[test]
fn test_equality_follows_owner() {
    let (fx, projection) = method_fixture();
    let (_, session) = fx.build();

    let a = session.modifier_list(projection);
    let b = session.modifier_list(projection);
    assert_eq!(a, b);

    let field = session.modifier_list(LightDeclarationProjection::new(
        projection.owner,
        ProjectionKind::FIELD,
    ));
    assert_ne!(a, field);
}

#[test]
fn test_given_annotations_replace_source_entries() {
    let mut fx = Fixture::new();
    let original = fx.entry("test.Original");
    let id = fx.declare(
        1,
        "copy",
        DeclarationKind::Property,
        Descriptor::Property(PropertyDescriptor {
            annotations: vec![original],
            getter: None,
            setter: None,
            nullability: Nullability::Nullable,
        }),
    );
    let (_, session) = fx.build();
    let projection = LightDeclarationProjection::new(id, ProjectionKind::FIELD);

    let given = vec![LightAnnotation::NonSource(CompiledAnnotation::new("test.Copied"))];
    let compiled = session.compiled_view(&projection);
    let list =
        LightModifierList::new(projection, session.clone(), compiled).with_given_annotations(given);
    assert_eq!(
        names(list.annotations().unwrap()),
        vec!["test.Copied", "org.jetbrains.annotations.Nullable"]
    );
}

#[test]
fn test_cache_shares_instances_until_invalidated() {
    let (fx, projection) = method_fixture();
    let (_, session) = fx.build();
    let cache = LightElementCache::new(session);

    let a = cache.modifier_list(projection);
    let b = cache.modifier_list(projection);
    assert!(Arc::ptr_eq(&a, &b));
    assert!(std::ptr::eq(a.annotations().unwrap(), b.annotations().unwrap()));

    let field = cache.modifier_list(LightDeclarationProjection::new(
        projection.owner,
        ProjectionKind::FIELD,
    ));
    assert_eq!(cache.len(), 2);
    assert!(!Arc::ptr_eq(&a, &field));

    cache.invalidate(projection.owner);
    assert!(cache.is_empty());
    let c = cache.modifier_list(projection);
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(*a, *c);

    cache.clear();
    assert!(cache.is_empty());
}
