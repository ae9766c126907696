use approx::assert_relative_eq;
use mortonbvh3d::bounding_volume::{BoundingBox, BoundingVolume};
use na::Point3;

fn octant_boxes() -> [BoundingBox; 8] {
    [
        BoundingBox::new(0.0, 0.45, 0.0, 0.45, 0.0, 0.45),
        BoundingBox::new(0.55, 1.0, 0.0, 0.45, 0.0, 0.45),
        BoundingBox::new(0.0, 0.45, 0.55, 1.0, 0.0, 0.45),
        BoundingBox::new(0.55, 1.0, 0.55, 1.0, 0.0, 0.45),
        BoundingBox::new(0.0, 0.45, 0.0, 0.45, 0.55, 1.0),
        BoundingBox::new(0.55, 1.0, 0.0, 0.45, 0.55, 1.0),
        BoundingBox::new(0.0, 0.45, 0.55, 1.0, 0.55, 1.0),
        BoundingBox::new(0.55, 1.0, 0.55, 1.0, 0.55, 1.0),
    ]
}

#[test]
fn octants_overlap_and_containment() {
    let inner = BoundingBox::new(0.25, 0.75, 0.25, 0.75, 0.25, 0.75);
    let loose = BoundingBox::new(-0.1, 1.1, -0.1, 1.1, -0.1, 1.1);
    let tight = BoundingBox::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
    let octants = octant_boxes();

    for (i, a) in octants.iter().enumerate() {
        for (j, b) in octants.iter().enumerate() {
            assert_eq!(a.overlap(b), i == j);
            assert_eq!(a.contains(b), i == j);
        }

        assert!(loose.contains(a));
        assert!(tight.contains(a));
        assert!(!a.contains(&loose));
        assert!(!a.contains(&tight));

        assert!(a.overlap(&inner));
        assert!(inner.overlap(a));
        assert!(!a.contains(&inner));
        assert!(!inner.contains(a));
    }

    assert_eq!(BoundingBox::from_boxes(&octants), tight);
}

#[test]
fn growing_past_the_enclosing_box() {
    let mut small = BoundingBox::new(0.4, 0.45, 0.2, 0.25, 0.1, 0.15);
    let big = BoundingBox::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);

    assert!(big.overlap(&small));
    assert!(big.contains(&small));

    small.grow_in_each_axial_direction(0.09);
    assert!(big.overlap(&small));
    assert!(big.contains(&small));

    small.grow_in_each_axial_direction(0.02);
    assert!(big.overlap(&small));
    assert!(!big.contains(&small));

    let expected = BoundingBox::new(
        0.4 - 0.11,
        0.45 + 0.11,
        0.2 - 0.11,
        0.25 + 0.11,
        0.1 - 0.11,
        0.15 + 0.11,
    );
    assert_relative_eq!(small, expected, epsilon = 1.0e-6);
}

#[test]
fn loosening_matches_growing() {
    let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).with_id(3);
    let mut grown = bbox;
    grown.grow_in_each_axial_direction(0.5);

    assert_eq!(bbox.loosened(0.5), grown);
    assert_eq!(grown.id(), Some(3));
    assert_eq!(grown.center(), bbox.center());
    assert_eq!(grown.center(), Point3::new(1.5, 3.5, 5.5));
    assert!(grown.intersects(&bbox));
    assert!(BoundingVolume::contains(&grown, &bbox));
}
