use super::*;

#[test]
fn test_enter_leave_tracks_depth() {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::BindingChain);

    assert!(guard.enter(1u32).is_entered());
    assert!(guard.enter(2u32).is_entered());
    assert_eq!(guard.depth(), 2);

    guard.leave(2);
    guard.leave(1);
    assert_eq!(guard.depth(), 0);
    assert_eq!(guard.iterations(), 2);
}

#[test]
fn test_cycle_detected() {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::HierarchyWalk);

    assert!(guard.enter(7u32).is_entered());
    assert!(guard.enter(7u32).is_cycle());
    assert!(!guard.is_exceeded());
    guard.leave(7);
}

#[test]
fn test_depth_limit_is_sticky() {
    let mut guard = RecursionGuard::new(2, 100);

    assert!(guard.enter(1u32).is_entered());
    assert!(guard.enter(2u32).is_entered());
    assert_eq!(guard.enter(3u32), RecursionResult::DepthExceeded);
    guard.leave(2);
    guard.leave(1);

    assert!(guard.is_exceeded());
}

#[test]
fn test_iteration_limit() {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::Custom {
        max_depth: 10,
        max_iterations: 3,
    });

    for key in 0u32..3 {
        assert!(guard.enter(key).is_entered());
        guard.leave(key);
    }
    assert!(guard.enter(99u32).is_exceeded());
}

#[test]
fn test_scope_leaves_on_success() {
    let mut guard = RecursionGuard::new(4, 100);

    let inner = guard.scope(1u32, |g| g.scope(1u32, |_| ()).unwrap_err());
    assert_eq!(inner, Ok(RecursionResult::Cycle));
    assert_eq!(guard.depth(), 0);
}
