use crate::bounding_volume::BoundingBox;
use crate::partitioning::{HierarchyBuildError, MortonHierarchy};

/// A structure answering box overlap queries over a fixed set of boxes.
///
/// Results are reported as box identifiers: the id of a box, or its position in the slice the
/// searcher was built from if it has none. The order of the results is unspecified.
pub trait OverlapSearcher: Sized {
    /// Builds the searcher over `boxes`.
    fn build(boxes: &[BoundingBox]) -> Result<Self, HierarchyBuildError>;

    /// Appends to `out` the identifiers of the boxes overlapping `query`.
    fn get_overlaps_into(&self, query: &BoundingBox, out: &mut Vec<u32>);

    /// The identifiers of the boxes overlapping `query`.
    fn get_overlaps(&self, query: &BoundingBox) -> Vec<u32> {
        let mut result = Vec::new();
        self.get_overlaps_into(query, &mut result);
        result
    }
}

/// The overlap searcher backed by a [`MortonHierarchy`].
pub type MortonHierarchySearcher = MortonHierarchy;

impl OverlapSearcher for MortonHierarchy {
    fn build(boxes: &[BoundingBox]) -> Result<Self, HierarchyBuildError> {
        MortonHierarchy::build(boxes)
    }

    fn get_overlaps_into(&self, query: &BoundingBox, out: &mut Vec<u32>) {
        self.overlaps_into(query, out)
    }
}
