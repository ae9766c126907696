//! Spatial partitioning tools.

pub use self::brute_force::BruteForceSearcher;
pub use self::morton_hierarchy::{
    morton_sort_boxes, HierarchyBuildError, HierarchyBuildOptions, HierarchyDefect,
    HierarchyNode, Leaves, MortonHierarchy, PlacementError, Slot, TraversalAction, TreeLayout,
};
pub use self::overlap_searcher::{MortonHierarchySearcher, OverlapSearcher};

pub mod morton_hierarchy;

mod brute_force;
mod overlap_searcher;
