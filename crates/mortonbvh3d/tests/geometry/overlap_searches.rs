use mortonbvh3d::bounding_volume::BoundingBox;
use mortonbvh3d::math::Real;
use mortonbvh3d::partitioning::{BruteForceSearcher, MortonHierarchySearcher, OverlapSearcher};
use na::Vector3;

fn random_boxes_in_unit_cube(rng: &mut oorandom::Rand32, count: usize) -> Vec<BoundingBox> {
    (0..count)
        .map(|i| {
            let x0 = rng.rand_float() as Real;
            let y0 = rng.rand_float() as Real;
            let z0 = rng.rand_float() as Real;
            let x1 = x0 + 0.1 * rng.rand_float() as Real;
            let y1 = y0 + 0.1 * rng.rand_float() as Real;
            let z1 = z0 + 0.1 * rng.rand_float() as Real;
            BoundingBox::new(x0, x1, y0, y1, z0, z1).with_id(i as u32)
        })
        .collect()
}

fn rigorous_search_comparison<S: OverlapSearcher>() {
    let mut rng = oorandom::Rand32::new(42);
    let queries = random_boxes_in_unit_cube(&mut rng, 100);
    let boxes = random_boxes_in_unit_cube(&mut rng, 100);
    let searcher = S::build(&boxes).unwrap();

    for query in &queries {
        let expected: Vec<u32> = boxes
            .iter()
            .enumerate()
            .filter(|(_, bbox)| query.overlap(bbox))
            .map(|(j, _)| j as u32)
            .collect();

        let mut found = searcher.get_overlaps(query);
        found.sort_unstable();
        assert_eq!(found, expected);
    }
}

#[test]
fn rigorous_morton_hierarchy() {
    rigorous_search_comparison::<MortonHierarchySearcher>();
}

#[test]
fn rigorous_brute_force() {
    rigorous_search_comparison::<BruteForceSearcher>();
}

struct Cylinder {
    base: Vector3<f64>,
    dir: Vector3<f64>,
    perp1: Vector3<f64>,
    perp2: Vector3<f64>,
}

impl Cylinder {
    /// Boxes bounding the quads of a tessellated cylinder side.
    fn boxes(
        &self,
        layer_len: f64,
        radius: f64,
        num_layers: usize,
        num_sectors: usize,
    ) -> Vec<BoundingBox> {
        let mut result = Vec::with_capacity(num_layers * num_sectors);
        let rim = |layer: usize, sector: usize| {
            let angle = sector as f64 * std::f64::consts::PI * 2.0 / num_sectors as f64;
            self.base
                + self.dir * (layer as f64 * layer_len)
                + self.perp1 * (radius * angle.cos())
                + self.perp2 * (radius * angle.sin())
        };

        for zi in 0..num_layers {
            for ti in 0..num_sectors {
                let corners = [
                    rim(zi, ti),
                    rim(zi, ti + 1),
                    rim(zi + 1, ti + 1),
                    rim(zi + 1, ti),
                ];
                let mins = corners.iter().fold(corners[0], |acc, c| acc.inf(c));
                let maxs = corners.iter().fold(corners[0], |acc, c| acc.sup(c));
                let id = result.len() as u32;
                result.push(
                    BoundingBox::new(
                        mins.x as Real,
                        maxs.x as Real,
                        mins.y as Real,
                        maxs.y as Real,
                        mins.z as Real,
                        maxs.z as Real,
                    )
                    .with_id(id),
                );
            }
        }

        result
    }
}

fn cylinder_search<S: OverlapSearcher>() {
    let num_layers = 100;
    let num_sectors = 15;
    let length = 25.0;
    let layer_len = length / num_layers as f64;
    let radius = 10.0;

    let first = Cylinder {
        base: Vector3::zeros(),
        dir: Vector3::z(),
        perp1: Vector3::x(),
        perp2: Vector3::y(),
    };
    let second = Cylinder {
        base: Vector3::new(0.5 * length, 0.0, 0.5 * length),
        dir: -Vector3::x(),
        perp1: Vector3::y(),
        perp2: Vector3::z(),
    };

    let first_boxes = first.boxes(layer_len, radius, num_layers, num_sectors);
    let second_boxes = second.boxes(layer_len, radius, num_layers, num_sectors);
    let searcher = S::build(&first_boxes).unwrap();
    let mut num_overlaps = 0;

    for (j, query) in second_boxes.iter().enumerate() {
        assert_eq!(query.id(), Some(j as u32));

        let found = searcher.get_overlaps(query);
        num_overlaps += found.len();

        for id in found {
            let hit = &first_boxes[id as usize];
            assert_eq!(hit.id(), Some(id));
            assert!(query.overlap(hit));
        }
    }

    // The two cylinders cross each other.
    assert!(num_overlaps > 0);
}

#[test]
fn cylinder_morton_hierarchy() {
    cylinder_search::<MortonHierarchySearcher>();
}

#[test]
fn cylinder_brute_force() {
    cylinder_search::<BruteForceSearcher>();
}

#[test]
fn cylinder_searchers_agree() {
    let cylinder = Cylinder {
        base: Vector3::zeros(),
        dir: Vector3::z(),
        perp1: Vector3::x(),
        perp2: Vector3::y(),
    };
    let boxes = cylinder.boxes(0.25, 10.0, 100, 15);
    let hierarchy = MortonHierarchySearcher::build(&boxes).unwrap();
    let brute_force = BruteForceSearcher::new(&boxes);

    for query in &boxes {
        let mut expected = brute_force.get_overlaps(query);
        let mut found = hierarchy.get_overlaps(query);
        expected.sort_unstable();
        found.sort_unstable();
        assert_eq!(found, expected);
        assert!(found.contains(&query.id().unwrap()));
    }
}
