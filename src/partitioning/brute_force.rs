use crate::bounding_volume::BoundingBox;
use crate::partitioning::{HierarchyBuildError, OverlapSearcher};

/// An overlap searcher testing every box against every query.
///
/// Queries run in linear time. This is mostly useful as a reference to check the results of
/// the other searchers.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BruteForceSearcher {
    boxes: Vec<BoundingBox>,
}

impl BruteForceSearcher {
    /// Creates a searcher over a copy of `boxes`.
    ///
    /// Unlike a hierarchy, a brute-force searcher can be empty.
    pub fn new(boxes: &[BoundingBox]) -> Self {
        Self {
            boxes: boxes.to_vec(),
        }
    }

    /// The boxes of this searcher.
    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }
}

impl OverlapSearcher for BruteForceSearcher {
    fn build(boxes: &[BoundingBox]) -> Result<Self, HierarchyBuildError> {
        Ok(Self::new(boxes))
    }

    fn get_overlaps_into(&self, query: &BoundingBox, out: &mut Vec<u32>) {
        out.extend(
            self.boxes
                .iter()
                .enumerate()
                .filter(|(_, bbox)| bbox.overlap(query))
                .map(|(i, bbox)| bbox.id().unwrap_or(i as u32)),
        );
    }
}
