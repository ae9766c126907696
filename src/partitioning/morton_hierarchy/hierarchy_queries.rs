use super::{HierarchyNode, MortonHierarchy, TraversalAction};
use crate::bounding_volume::BoundingBox;
use crate::math::{Point, Real};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl MortonHierarchy {
    /// Iterates through the input indices of all the boxes overlapping `query`.
    ///
    /// Boxes touching `query` count as overlapping.
    pub fn intersect_box<'a>(&'a self, query: &'a BoundingBox) -> impl Iterator<Item = u32> + 'a {
        self.leaves(|node: &HierarchyNode| node.bbox().overlap(query))
    }

    /// The identifiers of all the boxes overlapping `query`, in Morton order.
    ///
    /// A box is identified by its id, or by its position in the input slice if it has none.
    pub fn overlaps(&self, query: &BoundingBox) -> Vec<u32> {
        let mut result = Vec::new();
        self.overlaps_into(query, &mut result);
        result
    }

    /// Appends to `out` the identifiers of all the boxes overlapping `query`.
    ///
    /// `out` is not cleared first, so that the same buffer can be reused across queries.
    pub fn overlaps_into(&self, query: &BoundingBox, out: &mut Vec<u32>) {
        self.traverse(|node| {
            if !node.bbox().overlap(query) {
                return TraversalAction::Prune;
            }

            if let Some(id) = node.leaf_id() {
                out.push(id);
            }

            TraversalAction::Continue
        });
    }

    /// The identifiers of all the boxes containing `point`, boundary included.
    pub fn overlaps_point(&self, point: &Point<Real>) -> Vec<u32> {
        let mut result = Vec::new();

        self.traverse(|node| {
            if !node.bbox().overlap_point(point) {
                return TraversalAction::Prune;
            }

            if let Some(id) = node.leaf_id() {
                result.push(id);
            }

            TraversalAction::Continue
        });

        result
    }

    /// Runs [`Self::overlaps`] for each of the `queries` in parallel.
    ///
    /// The `i`-th entry of the result lists the boxes overlapping `queries[i]`.
    #[cfg(feature = "parallel")]
    pub fn par_overlaps(&self, queries: &[BoundingBox]) -> Vec<Vec<u32>> {
        queries
            .par_iter()
            .map(|query| self.overlaps(query))
            .collect()
    }
}
