use super::*;
use redio_common::{HierarchyNode, HierarchyStore};

/// Leaf extends Mid<Listener>, Mid<X> extends Base<X>, Base<T> implements Sink<T>
struct Layers {
    store: HierarchyStore,
    listener: DefId,
    sink: DefId,
    base: DefId,
    mid: DefId,
    leaf: DefId,
}

fn layers() -> Layers {
    let store = HierarchyStore::new();
    let listener = store.register(HierarchyNode::interface("Listener", &[]));
    let sink = store.register(HierarchyNode::interface("Sink", &["E"]));
    let base = store.register_with(|this| {
        HierarchyNode::class("Base", &["T"])
            .implementing(Instantiation::new(sink, vec![TypeDescriptor::param(this, 0)]))
    });
    let mid = store.register_with(|this| {
        HierarchyNode::class("Mid", &["X"])
            .with_extends(Instantiation::new(base, vec![TypeDescriptor::param(this, 0)]))
    });
    let leaf = store.register(
        HierarchyNode::class("Leaf", &[])
            .with_extends(Instantiation::new(mid, vec![TypeDescriptor::concrete(listener)])),
    );
    Layers {
        store,
        listener,
        sink,
        base,
        mid,
        leaf,
    }
}

#[test]
fn test_expand_preorder() {
    let l = layers();
    let ancestry = Ancestry::expand(&l.store, l.leaf);

    let nodes: Vec<DefId> = ancestry.nodes().collect();
    assert_eq!(nodes, vec![l.leaf, l.mid, l.base, l.sink]);
    assert!(!ancestry.contains(l.listener));

    let raws: Vec<DefId> = ancestry.edges().iter().map(|e| e.raw).collect();
    assert_eq!(raws, vec![l.mid, l.base, l.sink]);

    assert_eq!(
        ancestry.params(),
        &[
            ParamRef::new(l.mid, 0),
            ParamRef::new(l.base, 0),
            ParamRef::new(l.sink, 0)
        ]
    );
    assert!(!ancestry.is_truncated());
}

#[test]
fn test_bindings_follow_chains() {
    let l = layers();
    let ancestry = Ancestry::expand(&l.store, l.leaf);

    assert_eq!(
        ancestry.bindings(),
        vec![
            (ParamRef::new(l.mid, 0), l.listener),
            (ParamRef::new(l.base, 0), l.listener),
            (ParamRef::new(l.sink, 0), l.listener),
        ]
    );
    assert_eq!(ancestry.bind(ParamRef::new(l.sink, 0)), Some(l.listener));
}

#[test]
fn test_open_generic_leaves_chain_unbound() {
    let l = layers();
    let ancestry = Ancestry::expand(&l.store, l.mid);

    assert!(ancestry.bindings().is_empty());
    assert_eq!(ancestry.bind(ParamRef::new(l.sink, 0)), None);
}

#[test]
fn test_shared_interface_visited_once() {
    let store = HierarchyStore::new();
    let marker = store.register(HierarchyNode::interface("Marker", &[]));
    let left = store.register(
        HierarchyNode::interface("Left", &[]).implementing(Instantiation::plain(marker)),
    );
    let right = store.register(
        HierarchyNode::interface("Right", &[]).implementing(Instantiation::plain(marker)),
    );
    let both = store.register(
        HierarchyNode::class("Both", &[])
            .implementing(Instantiation::plain(left))
            .implementing(Instantiation::plain(right)),
    );

    let nodes: Vec<DefId> = Ancestry::expand(&store, both).nodes().collect();
    assert_eq!(nodes, vec![both, left, marker, right]);
}

#[test]
fn test_cyclic_declaration_terminates() {
    let store = HierarchyStore::new();
    let a = store.register(HierarchyNode::class("A", &["X"]));
    let b = store.register(HierarchyNode::class("B", &["Y"]));
    store.set_heritage(
        a,
        Some(Instantiation::new(b, vec![TypeDescriptor::param(a, 0)])),
        vec![],
    );
    store.set_heritage(
        b,
        Some(Instantiation::new(a, vec![TypeDescriptor::param(b, 0)])),
        vec![],
    );

    let ancestry = Ancestry::expand(&store, a);
    assert_eq!(ancestry.nodes().count(), 2);
    assert!(ancestry.bindings().is_empty());
}

#[test]
fn test_unknown_root_is_empty() {
    let store = HierarchyStore::new();
    let ancestry = Ancestry::expand(&store, DefId(999));

    assert_eq!(ancestry.nodes().count(), 0);
    assert!(ancestry.edges().is_empty());
}
