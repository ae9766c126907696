use super::HierarchyBuildOptions;
use crate::bounding_volume::BoundingBox;

/// A node of a [`MortonHierarchy`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum HierarchyNode {
    /// A leaf, holding one of the input boxes.
    Leaf {
        /// The input box, with its original identifier.
        bbox: BoundingBox,
        /// Position of the box in the slice the hierarchy was built from.
        input_index: u32,
    },
    /// An internal node, bounding both of its children.
    ///
    /// Its left child is stored right after it in the node array.
    Internal {
        /// The union of the boxes of both children.
        bbox: BoundingBox,
        /// Index of the right child in the node array.
        right_child: u32,
    },
}

impl HierarchyNode {
    /// The box bounding this node and all its descendants.
    #[inline]
    pub fn bbox(&self) -> &BoundingBox {
        match self {
            HierarchyNode::Leaf { bbox, .. } | HierarchyNode::Internal { bbox, .. } => bbox,
        }
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, HierarchyNode::Leaf { .. })
    }

    /// The input index of this node if it is a leaf, `None` otherwise.
    #[inline]
    pub fn leaf_data(&self) -> Option<u32> {
        match self {
            HierarchyNode::Leaf { input_index, .. } => Some(*input_index),
            HierarchyNode::Internal { .. } => None,
        }
    }

    /// The identifier reported for this leaf: the id of its box, or its input index if the box
    /// has none. `None` for internal nodes.
    #[inline]
    pub fn leaf_id(&self) -> Option<u32> {
        match self {
            HierarchyNode::Leaf { bbox, input_index } => Some(bbox.id().unwrap_or(*input_index)),
            HierarchyNode::Internal { .. } => None,
        }
    }
}

/// A static bounding volume hierarchy over axis-aligned boxes, sorted along a Morton curve.
///
/// The tree is stored in pre-order in a flat array of `2N - 1` nodes for `N` boxes. The root is
/// the node `0`, the left child of an internal node `i` is the node `i + 1`, and its right child
/// index is stored in the node. Leaves sit on at most two adjacent depths and their left-to-right
/// order follows the Morton order of the boxes.
///
/// The hierarchy is immutable once built. It can be shared across threads and queried
/// concurrently.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use mortonbvh3d::bounding_volume::BoundingBox;
/// use mortonbvh3d::partitioning::MortonHierarchy;
///
/// let boxes = [
///     BoundingBox::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0).with_id(10),
///     BoundingBox::new(5.0, 6.0, 0.0, 1.0, 0.0, 1.0).with_id(11),
///     BoundingBox::new(10.0, 11.0, 0.0, 1.0, 0.0, 1.0).with_id(12),
/// ];
///
/// let hierarchy = MortonHierarchy::build(&boxes).unwrap();
/// assert_eq!(hierarchy.leaf_count(), 3);
/// assert_eq!(hierarchy.node_count(), 5);
///
/// let query = BoundingBox::new(0.5, 5.5, 0.5, 0.6, 0.5, 0.6);
/// let mut hits = hierarchy.overlaps(&query);
/// hits.sort_unstable();
/// assert_eq!(hits, [10, 11]);
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MortonHierarchy {
    pub(super) nodes: Vec<HierarchyNode>,
    pub(super) options: HierarchyBuildOptions,
}

impl MortonHierarchy {
    /// The number of leaves, i.e., the number of boxes this hierarchy was built from.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.nodes.len().div_ceil(2)
    }

    /// The number of internal nodes.
    #[inline]
    pub fn internal_count(&self) -> usize {
        self.nodes.len() / 2
    }

    /// The total number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node at index `id` of the node array, if it exists.
    #[inline]
    pub fn node(&self, id: u32) -> Option<&HierarchyNode> {
        self.nodes.get(id as usize)
    }

    /// All the nodes, in array order.
    #[inline]
    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    /// The options this hierarchy was built with.
    #[inline]
    pub fn options(&self) -> &HierarchyBuildOptions {
        &self.options
    }

    /// The box bounding every box of this hierarchy.
    pub fn root_box(&self) -> BoundingBox {
        self.nodes
            .first()
            .map(|root| *root.bbox())
            .unwrap_or_else(BoundingBox::new_invalid)
    }

    /// The indices of the left and right children of the node `id`.
    ///
    /// Returns `None` if `id` is a leaf or is out of bounds.
    #[inline]
    pub fn children(&self, id: u32) -> Option<(u32, u32)> {
        match self.nodes.get(id as usize)? {
            HierarchyNode::Leaf { .. } => None,
            HierarchyNode::Internal { right_child, .. } => Some((id + 1, *right_child)),
        }
    }

    /// The identifier of the leaf at index `id`: the id of its box, or the box's input index if
    /// the box has none.
    ///
    /// Returns `None` if `id` is an internal node or is out of bounds.
    #[inline]
    pub fn leaf_id(&self, id: u32) -> Option<u32> {
        self.nodes.get(id as usize)?.leaf_id()
    }

    /// The identifiers of all the leaves, from left to right (i.e. in Morton order).
    pub fn leaf_ids(&self) -> Vec<u32> {
        self.nodes.iter().filter_map(HierarchyNode::leaf_id).collect()
    }

    /// The depth of every node, the root being at depth 0.
    ///
    /// Children are stored after their parent, so a single forward pass is enough. Out of bounds
    /// child indices are ignored.
    fn node_depths(&self) -> Vec<u32> {
        let mut depths = vec![0; self.nodes.len()];

        for id in 0..self.nodes.len() {
            if let HierarchyNode::Internal { right_child, .. } = self.nodes[id] {
                let child_depth = depths[id] + 1;
                for child in [id + 1, right_child as usize] {
                    if let Some(depth) = depths.get_mut(child) {
                        *depth = child_depth;
                    }
                }
            }
        }

        depths
    }

    /// The depth of every leaf, from left to right.
    pub fn leaf_depths(&self) -> Vec<u32> {
        self.node_depths()
            .into_iter()
            .zip(self.nodes.iter())
            .filter(|(_, node)| node.is_leaf())
            .map(|(depth, _)| depth)
            .collect()
    }

    /// The depth of the deepest leaf. A hierarchy with a single box has a depth of 0.
    pub fn depth(&self) -> u32 {
        self.node_depths().into_iter().max().unwrap_or(0)
    }
}
