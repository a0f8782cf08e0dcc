//! End-to-end: JSON declarations, shape resolution, and delegate invocation.

use redio::{
    Callable, DeclarationError, Delegate, DelegateContext, DelegateError, HierarchyMetadata,
    HierarchyStore, ParamRef, ResolveError, Shape,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

const EVENTS: &str = r#"{
  "types": [
    { "name": "Event" },
    { "name": "String" },
    { "name": "EventListener", "kind": "interface",
      "methods": [
        { "name": "handle", "arity": 1 },
        { "name": "name", "kind": "default" },
        { "name": "noop", "kind": "static" }
      ] },
    { "name": "Supplier", "kind": "interface", "params": ["T"],
      "methods": [ { "name": "get" } ] },
    { "name": "AbstractDelegate", "params": ["T"],
      "extends": { "type": "Delegate", "args": ["T"] } },
    { "name": "KeyedDelegate", "params": ["K", "V"],
      "extends": { "type": "AbstractDelegate", "args": ["V"] } },
    { "name": "EventDelegate",
      "extends": { "type": "KeyedDelegate", "args": ["String", "EventListener"] } },
    { "name": "SupplierDelegate",
      "extends": { "type": "Delegate", "args": [ { "type": "Supplier", "args": ["String"] } ] } }
  ]
}"#;

struct OnEvent;

impl Shape for OnEvent {
    const INTERFACE: &'static str = "EventListener";
    type Args = str;
    type Output = usize;
    type Error = String;
}

struct Supply;

impl Shape for Supply {
    const INTERFACE: &'static str = "Supplier";
    type Args = ();
    type Output = String;
    type Error = std::convert::Infallible;
}

fn context() -> DelegateContext {
    let store = Arc::new(HierarchyStore::new());
    let ctx = DelegateContext::new(Arc::clone(&store));
    store.declare_json(EVENTS).expect("valid declarations");
    ctx
}

fn lookup(ctx: &DelegateContext, name: &str) -> redio::DefId {
    ctx.store()
        .lookup(name)
        .unwrap_or_else(|| panic!("`{name}` declared"))
}

#[test]
fn test_declared_hierarchy_drives_delegate() {
    let ctx = context();
    let event_delegate = lookup(&ctx, "EventDelegate");

    let mut delegate = Delegate::<OnEvent>::new(&ctx, event_delegate).expect("delegate");
    assert_eq!(delegate.shape().to_string(), "EventListener::handle/1");

    let seen = Rc::new(RefCell::new(Vec::new()));
    for prefix in ["audit", "metrics"] {
        let seen = Rc::clone(&seen);
        delegate
            .add(Callable::<OnEvent>::new(move |event: &str| {
                seen.borrow_mut().push(format!("{prefix}:{event}"));
                Ok(event.len())
            }))
            .expect("entry");
    }

    assert_eq!(delegate.invoke().call("click"), Ok(5));
    assert_eq!(*seen.borrow(), vec!["audit:click", "metrics:click"]);
}

#[test]
fn test_generic_shape_collapses_to_raw_interface() {
    let ctx = context();
    let supplier_delegate = lookup(&ctx, "SupplierDelegate");

    let mut delegate = Delegate::<Supply>::new(&ctx, supplier_delegate).expect("delegate");
    assert_eq!(delegate.shape().interface(), lookup(&ctx, "Supplier"));

    delegate
        .add(Callable::<Supply>::new(|_: &()| Ok("first".to_string())))
        .expect("entry");
    delegate
        .add(Callable::<Supply>::new(|_: &()| Ok("second".to_string())))
        .expect("entry");
    assert_eq!(delegate.invoke().call(&()), Ok("second".to_string()));
}

#[test]
fn test_bindings_shared_across_delegates() {
    let ctx = context();
    let event_delegate = lookup(&ctx, "EventDelegate");
    let abstract_delegate = lookup(&ctx, "AbstractDelegate");
    let keyed_delegate = lookup(&ctx, "KeyedDelegate");

    Delegate::<OnEvent>::new(&ctx, event_delegate).expect("first");
    let recorded = ctx.resolver().bindings().len();
    Delegate::<OnEvent>::new(&ctx, event_delegate).expect("second");

    assert_eq!(ctx.resolver().bindings().len(), recorded);
    let bindings = ctx.resolver().bindings();
    assert_eq!(
        bindings.get(event_delegate, ParamRef::new(ctx.delegate_base(), 0)),
        Some(lookup(&ctx, "EventListener"))
    );
    assert_eq!(
        bindings.get(event_delegate, ParamRef::new(abstract_delegate, 0)),
        Some(lookup(&ctx, "EventListener"))
    );
    assert_eq!(
        bindings.get(event_delegate, ParamRef::new(keyed_delegate, 0)),
        Some(lookup(&ctx, "String"))
    );
}

#[test]
fn test_differently_shaped_delegates_share_context() {
    let ctx = context();
    let event_delegate = lookup(&ctx, "EventDelegate");
    let supplier_delegate = lookup(&ctx, "SupplierDelegate");

    let events = Delegate::<OnEvent>::new(&ctx, event_delegate).expect("event delegate");
    let suppliers = Delegate::<Supply>::new(&ctx, supplier_delegate).expect("supplier delegate");
    assert_eq!(events.shape().interface(), lookup(&ctx, "EventListener"));
    assert_eq!(suppliers.shape().interface(), lookup(&ctx, "Supplier"));

    // Warm cache, same answers.
    let events_again = Delegate::<OnEvent>::new(&ctx, event_delegate).expect("event delegate");
    assert_eq!(events_again.shape().interface(), lookup(&ctx, "EventListener"));

    let delegate_m = ParamRef::new(ctx.delegate_base(), 0);
    let bindings = ctx.resolver().bindings();
    assert_eq!(bindings.get(event_delegate, delegate_m), Some(lookup(&ctx, "EventListener")));
    assert_eq!(bindings.get(supplier_delegate, delegate_m), Some(lookup(&ctx, "Supplier")));
}

#[test]
fn test_wrong_rust_shape_is_rejected() {
    let ctx = context();
    let supplier_delegate = lookup(&ctx, "SupplierDelegate");

    let err = Delegate::<OnEvent>::new(&ctx, supplier_delegate).unwrap_err();
    assert_eq!(
        err.to_string(),
        "delegate shape resolved to `Supplier`, expected `EventListener`"
    );
}

#[test]
fn test_unbound_abstract_delegate_fails() {
    let ctx = context();
    let abstract_delegate = lookup(&ctx, "AbstractDelegate");

    let err = Delegate::<OnEvent>::new(&ctx, abstract_delegate).unwrap_err();
    assert!(matches!(
        err,
        DelegateError::Resolve(ResolveError::TypeResolution { .. })
    ));
}

/// A delegate subclass whose shape is named by `shape`.
fn orphan_declaration(shape: &str) -> String {
    serde_json::json!({
        "types": [
            { "name": "Orphan", "extends": { "type": "Delegate", "args": [shape] } }
        ]
    })
    .to_string()
}

#[test]
fn test_generated_declarations_drive_delegate() {
    let ctx = context();
    ctx.store()
        .declare_json(&orphan_declaration("EventListener"))
        .expect("valid declaration");

    let delegate = Delegate::<OnEvent>::new(&ctx, lookup(&ctx, "Orphan")).expect("delegate");
    assert_eq!(delegate.shape().interface(), lookup(&ctx, "EventListener"));
}

#[test]
fn test_rejected_declarations_leave_store_untouched() {
    let ctx = context();
    let before = ctx.store().len();

    let err = ctx
        .store()
        .declare_json(&orphan_declaration("Nowhere"))
        .unwrap_err();

    assert!(matches!(err, DeclarationError::UnknownType { .. }));
    assert_eq!(ctx.store().len(), before);
    assert!(ctx.store().lookup("Orphan").is_none());
}

#[test]
fn test_contexts_resolve_from_many_threads() {
    let ctx = context();
    let event_delegate = lookup(&ctx, "EventDelegate");
    let listener = lookup(&ctx, "EventListener");

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let delegate = Delegate::<OnEvent>::new(&ctx, event_delegate).expect("delegate");
                assert_eq!(delegate.shape().interface(), listener);
            });
        }
    });
}

#[test]
fn test_init_tracing_without_env_is_noop() {
    // Neither variable is set by the test harness.
    if std::env::var("REDIO_LOG").is_err() && std::env::var("RUST_LOG").is_err() {
        redio::init_tracing();
    }
}
