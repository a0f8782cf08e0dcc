//! Centralized limits and thresholds.
//!
//! Declared hierarchies are finite and acyclic when they come from real
//! code, but declarations are data and can be malformed. These limits bound
//! every recursive walk so that a cyclic or absurdly deep declaration ends
//! in an unresolved binding instead of a stack overflow.
//!
//! The resolver consumes them through its `RecursionProfile` presets rather
//! than using the raw numbers at call sites.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth when walking a type's ancestry.
///
/// Each superclass or interface hop adds one level. Real hierarchies rarely
/// exceed ten levels; 64 leaves plenty of headroom.
pub const MAX_HIERARCHY_DEPTH: u32 = 64;

/// Maximum number of parameter-to-parameter hops followed when resolving
/// a binding.
///
/// ```text
/// Leaf extends Mid<Listener>
/// Mid<X> extends Base<X>        // Base.T -> Mid.X
/// Base<T> extends Delegate<T>   // Delegate.M -> Base.T -> Mid.X -> Listener
/// ```
///
/// Every hop moves one layer down the hierarchy, so the chain length is
/// bounded by the hierarchy depth in well-formed input.
pub const MAX_BINDING_CHAIN_DEPTH: u32 = 64;

/// Maximum number of interface levels inspected when counting the abstract
/// methods of a functional shape.
pub const MAX_INTERFACE_DEPTH: u32 = 32;

// =============================================================================
// Operation Counts
// =============================================================================

/// Maximum number of nodes visited in a single ancestry expansion.
pub const MAX_ANCESTRY_NODES: u32 = 4_096;

/// Maximum number of chain steps taken during one expansion, across all
/// parameters.
pub const MAX_BINDING_STEPS: u32 = 100_000;
