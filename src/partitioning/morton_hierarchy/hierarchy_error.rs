/// Indicated an inconsistency while computing the array layout of a hierarchy.
///
/// Any of these errors is an arithmetic defect of the placement: a well-formed layout exists
/// for every leaf count between 1 and [`MAX_LEAF_COUNT`](super::MAX_LEAF_COUNT).
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// A layout needs at least one leaf.
    #[error("a tree layout needs at least one leaf.")]
    ZeroLeaves,
    /// The leaf count does not fit the `u32` node indices of the layout.
    #[error("{count} leaves exceed the maximum supported leaf count.")]
    TooManyLeaves {
        /// The requested leaf count.
        count: usize,
    },
    /// A nominal index fell outside of the advance table.
    #[error("the nominal index {index} is out of the placement tables.")]
    NominalIndexOutOfBounds {
        /// The faulty nominal index.
        index: usize,
    },
    /// A computed slot fell outside of the `2N - 1` slots of the array.
    #[error("the slot {slot} is out of the node array.")]
    SlotOutOfBounds {
        /// The faulty slot.
        slot: usize,
    },
    /// Two nodes were placed on the same slot.
    #[error("the slot {slot} was assigned twice.")]
    SlotAssignedTwice {
        /// The slot assigned twice.
        slot: usize,
    },
    /// A slot was left without any node.
    #[error("the slot {slot} was never assigned.")]
    UnassignedSlot {
        /// The first slot left empty.
        slot: usize,
    },
    /// The number of leaves placed differs from the requested leaf count.
    #[error("placed {found} leaves instead of {expected}.")]
    PlacedLeafCount {
        /// The requested leaf count.
        expected: usize,
        /// The number of leaves actually placed.
        found: usize,
    },
}

/// Indicated a failure while building a [`MortonHierarchy`](super::MortonHierarchy).
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum HierarchyBuildError {
    /// A hierarchy must contain at least one box.
    #[error("a hierarchy must contain at least one box.")]
    EmptyInput,
    /// The number of boxes does not fit the `u32` node indices of the hierarchy.
    #[error("{count} boxes exceed the maximum supported box count.")]
    TooManyBoxes {
        /// The number of input boxes.
        count: usize,
    },
    /// The Morton resolution is outside of `1..=21` bits per axis.
    #[error("{bits} bits per axis is not a supported Morton resolution.")]
    InvalidResolution {
        /// The requested resolution.
        bits: u32,
    },
    /// A box has a min bound greater than its max bound (strict mode only).
    #[error("the box {index} has inverted bounds along the axis {axis}.")]
    MalformedBox {
        /// Position of the box in the input slice.
        index: usize,
        /// The first inverted axis (0 for `x`, 1 for `y`, 2 for `z`).
        axis: usize,
    },
    /// A box has an infinite or NaN bound (strict mode only).
    #[error("the box {index} has non-finite bounds.")]
    NonFiniteBox {
        /// Position of the box in the input slice.
        index: usize,
    },
    /// The array layout could not be computed.
    #[error("Placement Error: {0}")]
    Placement(#[from] PlacementError),
}

/// A violated structural property of a [`MortonHierarchy`](super::MortonHierarchy), as reported
/// by [`MortonHierarchy::check_well_formed`](super::MortonHierarchy::check_well_formed).
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum HierarchyDefect {
    /// The hierarchy has no node at all.
    #[error("the hierarchy has no node.")]
    Empty,
    /// The node array length is not `2N - 1` for `N` leaves.
    #[error("{nodes} nodes cannot hold a binary tree with {leaves} leaves.")]
    NodeCountMismatch {
        /// Length of the node array.
        nodes: usize,
        /// Number of input boxes.
        leaves: usize,
    },
    /// A child index points outside of the node array, or before its parent.
    #[error("the node {parent} has an invalid child index {child}.")]
    ChildIndexOutOfBounds {
        /// The parent node.
        parent: usize,
        /// The faulty child index.
        child: usize,
    },
    /// The box of an internal node does not enclose the box of one of its children.
    #[error("the node {parent} does not contain its child {child}.")]
    ParentDoesNotContainChild {
        /// The parent node.
        parent: usize,
        /// The child escaping its parent.
        child: usize,
    },
    /// A node is reachable through two different paths.
    #[error("detected loop: node {node} visited twice.")]
    NodeVisitedTwice {
        /// The node visited twice.
        node: usize,
    },
    /// Some nodes of the array cannot be reached from the root.
    #[error("{unreachable} nodes cannot be reached from the root.")]
    UnreachableNodes {
        /// The number of unreachable nodes.
        unreachable: usize,
    },
    /// The number of leaves reachable from the root differs from the input box count.
    #[error("found {found} leaves instead of {expected}.")]
    LeafCountMismatch {
        /// The number of input boxes.
        expected: usize,
        /// The number of leaves reachable from the root.
        found: usize,
    },
    /// The same input box is referenced by two leaves.
    #[error("the input box {input_index} appears at several leaves.")]
    DuplicateLeaf {
        /// Position of the duplicated box in the input slice.
        input_index: u32,
    },
    /// An input box is referenced by no leaf.
    #[error("the input box {input_index} appears at no leaf.")]
    MissingLeaf {
        /// Position of the missing box in the input slice.
        input_index: u32,
    },
    /// Leaves sit on depths more than one level apart.
    #[error("leaf depths range from {min} to {max}.")]
    UnbalancedDepths {
        /// The smallest leaf depth.
        min: u32,
        /// The largest leaf depth.
        max: u32,
    },
}
