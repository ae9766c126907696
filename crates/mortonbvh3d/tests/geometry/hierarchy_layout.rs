use mortonbvh3d::bounding_volume::BoundingBox;
use mortonbvh3d::partitioning::morton_hierarchy::hierarchy_placement::{
    leaf_count_shape, smallest_two_powers, summed_smallest_two_powers,
};
use mortonbvh3d::partitioning::{
    HierarchyBuildOptions, HierarchyNode, MortonHierarchy, PlacementError, Slot, TreeLayout,
};
use mortonbvh3d::utils::MortonAnchor;

#[test]
fn layout_matches_the_built_hierarchy() {
    let boxes: Vec<_> = (0..23)
        .map(|i| {
            let x = (i * 7 % 23) as f32;
            BoundingBox::new(x, x + 1.0, 0.0, 1.0, 0.0, 1.0).with_id(1000 + i)
        })
        .collect();
    let hierarchy = MortonHierarchy::build(&boxes).unwrap();
    let layout = TreeLayout::new(boxes.len()).unwrap();

    assert_eq!(layout.shape(), leaf_count_shape(23));
    assert_eq!(layout.shape(), (4, 7));
    assert_eq!(hierarchy.node_count(), layout.slots().len());

    for (id, (node, slot)) in hierarchy.nodes().iter().zip(layout.slots()).enumerate() {
        match (node, slot) {
            (HierarchyNode::Leaf { .. }, Slot::Leaf { .. }) => {
                assert_eq!(hierarchy.children(id as u32), None);
            }
            (HierarchyNode::Internal { right_child, .. }, Slot::Internal { right_child: r }) => {
                assert_eq!(right_child, r);
                assert_eq!(hierarchy.children(id as u32), Some((id as u32 + 1, *r)));
            }
            _ => panic!("node {} differs from its layout slot", id),
        }
    }

    assert_eq!(hierarchy.leaf_depths(), layout.leaf_depths());
    assert!(hierarchy.confirm_hierarchy_properties());
    assert!(hierarchy.confirm_leaf_ids(&boxes));

    // Boxes on a line are sorted by their position along it.
    let xs: Vec<_> = hierarchy
        .nodes()
        .iter()
        .filter(|node| node.is_leaf())
        .map(|node| node.bbox().x_min())
        .collect();
    assert!(xs.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn ruler_sequence_prefix_sums() {
    let smallest = smallest_two_powers(4);
    assert_eq!(smallest, [0, 0, 1, 0, 2, 0, 1, 0, 3, 0, 1, 0, 2, 0, 1, 0]);
    assert_eq!(
        summed_smallest_two_powers(&smallest),
        [0, 0, 1, 1, 3, 3, 4, 4, 7, 7, 8, 8, 10, 10, 11, 11]
    );
}

#[test]
fn empty_layouts_are_rejected() {
    assert_eq!(TreeLayout::new(0), Err(PlacementError::ZeroLeaves));
}

#[test]
fn resolution_and_anchor_do_not_change_the_shape() {
    let boxes: Vec<_> = (0..50)
        .map(|i| {
            let t = i as f32 * 0.37;
            BoundingBox::new(t.sin(), t.sin() + 0.2, t.cos(), t.cos() + 0.1, t, t + 0.3)
        })
        .collect();

    for anchor in [MortonAnchor::MinCorner, MortonAnchor::Center] {
        for bits in [1, 4, 10, 21] {
            let options = HierarchyBuildOptions::default()
                .with_anchor(anchor)
                .with_bits_per_axis(bits);
            let hierarchy = MortonHierarchy::build_with_options(&boxes, options).unwrap();
            hierarchy.assert_well_formed();
            assert_eq!(hierarchy.depth(), 6);
            assert_eq!(hierarchy.options().bits_per_axis, bits);
        }
    }
}
