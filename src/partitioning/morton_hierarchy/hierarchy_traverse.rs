use super::{HierarchyNode, MortonHierarchy};
use smallvec::SmallVec;

// Leaf depths grow like log2(N): 32 entries cover any hierarchy this crate can build.
const TRAVERSAL_STACK_SIZE: usize = 32;

/// Iterator over the leaves of a [`MortonHierarchy`] accepted by a node predicate.
///
/// See [`MortonHierarchy::leaves`].
pub struct Leaves<'a, Check: Fn(&HierarchyNode) -> bool> {
    tree: &'a MortonHierarchy,
    stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]>,
    check: Check,
}

impl<'a, Check: Fn(&HierarchyNode) -> bool> Leaves<'a, Check> {
    /// Starts iterating from the root of `tree`.
    pub fn new(tree: &'a MortonHierarchy, check: Check) -> Leaves<'a, Check> {
        let mut stack = SmallVec::new();

        if !tree.nodes.is_empty() {
            stack.push(0);
        }

        Leaves { tree, stack, check }
    }
}

impl<Check: Fn(&HierarchyNode) -> bool> Iterator for Leaves<'_, Check> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            let node = &self.tree.nodes[id as usize];

            if !(self.check)(node) {
                continue;
            }

            match node {
                HierarchyNode::Leaf { input_index, .. } => return Some(*input_index),
                HierarchyNode::Internal { right_child, .. } => {
                    self.stack.push(*right_child);
                    self.stack.push(id + 1);
                }
            }
        }
    }
}

/// Controls the execution flow of [`MortonHierarchy::traverse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraversalAction {
    /// The traversal will continue on the children of the tested node.
    Continue,
    /// The traversal will skip all descendants of the tested node.
    Prune,
    /// The traversal will exit immediately.
    EarlyExit,
}

impl MortonHierarchy {
    #[inline(always)]
    pub(crate) fn traversal_stack() -> SmallVec<[u32; TRAVERSAL_STACK_SIZE]> {
        Default::default()
    }

    /// Iterates through the input indices of the leaves, from left to right.
    ///
    /// The `check_node` closure is called on every traversed node. If it returns `false` then the
    /// node and all its descendants won’t be iterated on. This is useful for pruning whole
    /// sub-trees based on a geometric predicate on the node’s box.
    pub fn leaves<F: Fn(&HierarchyNode) -> bool>(&self, check_node: F) -> Leaves<'_, F> {
        Leaves::new(self, check_node)
    }

    /// Traverses the hierarchy in depth-first order with full control over traversal.
    ///
    /// The closure is called on every visited node, internal nodes and leaves alike, and decides
    /// whether the traversal descends into the node’s children, skips them, or stops right away.
    /// Left children are visited before right children, so leaves are reached in Morton order.
    ///
    /// # Example
    ///
    /// ```rust
    /// # #[cfg(feature = "f32")] {
    /// use mortonbvh3d::bounding_volume::BoundingBox;
    /// use mortonbvh3d::partitioning::{MortonHierarchy, TraversalAction};
    ///
    /// let boxes: Vec<_> = (0..10)
    ///     .map(|i| {
    ///         let x = i as f32;
    ///         BoundingBox::new(x, x + 0.5, 0.0, 1.0, 0.0, 1.0)
    ///     })
    ///     .collect();
    /// let hierarchy = MortonHierarchy::build(&boxes).unwrap();
    ///
    /// let region = BoundingBox::new(-1.0, 3.2, 0.0, 1.0, 0.0, 1.0);
    /// let mut count = 0;
    /// hierarchy.traverse(|node| {
    ///     if !node.bbox().overlap(&region) {
    ///         return TraversalAction::Prune;
    ///     }
    ///     if node.is_leaf() {
    ///         count += 1;
    ///     }
    ///     TraversalAction::Continue
    /// });
    ///
    /// assert_eq!(count, 4);
    /// # }
    /// ```
    pub fn traverse(&self, mut check_node: impl FnMut(&HierarchyNode) -> TraversalAction) {
        let mut stack = Self::traversal_stack();

        if self.nodes.is_empty() {
            return;
        }

        stack.push(0);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];

            match check_node(node) {
                TraversalAction::Continue => {
                    if let HierarchyNode::Internal { right_child, .. } = node {
                        stack.push(*right_child);
                        stack.push(id + 1);
                    }
                }
                TraversalAction::Prune => {}
                TraversalAction::EarlyExit => return,
            }
        }
    }
}
