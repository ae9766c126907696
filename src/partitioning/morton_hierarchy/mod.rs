//! A static bounding volume hierarchy laid out along a Morton curve.

pub use hierarchy_build::{morton_sort_boxes, HierarchyBuildOptions};
pub use hierarchy_error::{HierarchyBuildError, HierarchyDefect, PlacementError};
pub use hierarchy_placement::{Slot, TreeLayout, MAX_LEAF_COUNT};
pub use hierarchy_traverse::{Leaves, TraversalAction};
pub use hierarchy_tree::{HierarchyNode, MortonHierarchy};

pub mod hierarchy_placement;

mod hierarchy_build;
mod hierarchy_error;
mod hierarchy_queries;
mod hierarchy_traverse;
mod hierarchy_tree;
mod hierarchy_validation;
