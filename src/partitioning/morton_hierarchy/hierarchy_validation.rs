use super::{HierarchyDefect, HierarchyNode, MortonHierarchy};
use crate::bounding_volume::BoundingBox;

impl MortonHierarchy {
    /// Checks that this hierarchy is well-formed.
    ///
    /// The hierarchy is well-formed if:
    /// - its `2N - 1` nodes are all reachable from the root exactly once,
    /// - every child index is valid and greater than the index of its parent,
    /// - the box of every internal node contains the boxes of both its children,
    /// - every input index in `0..N` appears at exactly one leaf,
    /// - all the leaf depths are within one level of each other.
    ///
    /// Returns the first defect found otherwise.
    pub fn check_well_formed(&self) -> Result<(), HierarchyDefect> {
        let num_nodes = self.nodes.len();
        if num_nodes == 0 {
            return Err(HierarchyDefect::Empty);
        }

        let num_leaf_entries = self.nodes.iter().filter(|node| node.is_leaf()).count();
        if 2 * num_leaf_entries != num_nodes + 1 {
            return Err(HierarchyDefect::NodeCountMismatch {
                nodes: num_nodes,
                leaves: num_leaf_entries,
            });
        }

        let expected_leaves = num_leaf_entries;
        let mut visited = vec![false; num_nodes];
        let mut seen_inputs = vec![false; expected_leaves];
        let mut num_visited = 0;
        let mut found_leaves = 0;
        let mut min_depth = u32::MAX;
        let mut max_depth = 0;
        let mut stack = vec![(0u32, 0u32)];

        while let Some((id, depth)) = stack.pop() {
            if std::mem::replace(&mut visited[id as usize], true) {
                return Err(HierarchyDefect::NodeVisitedTwice { node: id as usize });
            }
            num_visited += 1;

            match &self.nodes[id as usize] {
                HierarchyNode::Leaf { input_index, .. } => {
                    found_leaves += 1;
                    min_depth = min_depth.min(depth);
                    max_depth = max_depth.max(depth);

                    // Out of range indices leave an input index unseen, reported below.
                    if let Some(seen) = seen_inputs.get_mut(*input_index as usize) {
                        if std::mem::replace(seen, true) {
                            return Err(HierarchyDefect::DuplicateLeaf {
                                input_index: *input_index,
                            });
                        }
                    }
                }
                HierarchyNode::Internal { bbox, right_child } => {
                    let left_child = id + 1;

                    for child in [left_child, *right_child] {
                        let child_node = self
                            .nodes
                            .get(child as usize)
                            .filter(|_| child >= left_child)
                            .ok_or(HierarchyDefect::ChildIndexOutOfBounds {
                                parent: id as usize,
                                child: child as usize,
                            })?;

                        if !bbox.contains(child_node.bbox()) {
                            return Err(HierarchyDefect::ParentDoesNotContainChild {
                                parent: id as usize,
                                child: child as usize,
                            });
                        }
                    }

                    stack.push((*right_child, depth + 1));
                    stack.push((left_child, depth + 1));
                }
            }
        }

        if found_leaves != expected_leaves {
            return Err(HierarchyDefect::LeafCountMismatch {
                expected: expected_leaves,
                found: found_leaves,
            });
        }

        if num_visited != num_nodes {
            return Err(HierarchyDefect::UnreachableNodes {
                unreachable: num_nodes - num_visited,
            });
        }

        if let Some(missing) = seen_inputs.iter().position(|seen| !seen) {
            return Err(HierarchyDefect::MissingLeaf {
                input_index: missing as u32,
            });
        }

        if max_depth - min_depth > 1 {
            return Err(HierarchyDefect::UnbalancedDepths {
                min: min_depth,
                max: max_depth,
            });
        }

        Ok(())
    }

    /// Returns `true` if this hierarchy is well-formed.
    ///
    /// See [`Self::check_well_formed`] for the checked properties. The defect found, if any, is
    /// logged at the `debug` level.
    pub fn confirm_hierarchy_properties(&self) -> bool {
        match self.check_well_formed() {
            Ok(()) => true,
            Err(defect) => {
                log::debug!("Malformed Morton hierarchy: {}", defect);
                false
            }
        }
    }

    /// Panics if this hierarchy isn’t well-formed.
    ///
    /// See [`Self::check_well_formed`] for the checked properties.
    pub fn assert_well_formed(&self) {
        if let Err(defect) = self.check_well_formed() {
            panic!("Malformed Morton hierarchy: {}", defect);
        }
    }

    /// Checks that the multiset of leaf identifiers equals the multiset of identifiers of
    /// `input`, a box without id being identified by its position in `input`.
    pub fn confirm_leaf_ids(&self, input: &[BoundingBox]) -> bool {
        let mut leaf_ids = self.leaf_ids();
        let mut input_ids: Vec<u32> = input
            .iter()
            .enumerate()
            .map(|(i, bbox)| bbox.id().unwrap_or(i as u32))
            .collect();

        leaf_ids.sort_unstable();
        input_ids.sort_unstable();

        if leaf_ids != input_ids {
            log::debug!(
                "Leaf identifiers differ from the input identifiers ({} leaves, {} input boxes).",
                leaf_ids.len(),
                input_ids.len()
            );
            return false;
        }

        true
    }
}
