//! Axis Aligned Bounding Box carrying an optional identifier.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real, Vector, DIM};
use approx::{AbsDiffEq, RelativeEq};
use core::fmt;
use num::Bounded;

/// An Axis-Aligned Bounding Box (AABB) tagged with an optional integer identifier.
///
/// The box is defined by its minimum and maximum corners. The identifier is used by the
/// spatial structures of this crate to report which input box a query hit. When it is `None`,
/// structures built from a slice of boxes fall back to the position of the box in that slice.
///
/// # Invariant
///
/// For each axis, the min bound should be less than or equal to the max bound. This is a
/// precondition the caller is responsible for: constructors do not check it, and the
/// predicates of a box violating it compare its bounds as they are (see
/// [`HierarchyBuildOptions::with_strict`](crate::partitioning::HierarchyBuildOptions::with_strict)
/// for an opt-in check at hierarchy construction).
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use mortonbvh3d::bounding_volume::BoundingBox;
///
/// let unit = BoundingBox::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
/// let small = BoundingBox::new(0.25, 0.75, 0.25, 0.75, 0.25, 0.75).with_id(7);
///
/// assert!(unit.contains(&small));
/// assert!(small.overlap(&unit));
/// assert_eq!(small.id(), Some(7));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct BoundingBox {
    mins: Point<Real>,
    maxs: Point<Real>,
    id: Option<u32>,
}

impl Default for BoundingBox {
    /// A degenerate box located at the origin, without identifier.
    fn default() -> Self {
        Self::from_corners(Point::origin(), Point::origin())
    }
}

impl BoundingBox {
    /// Creates a new box from its six bounds, without identifier.
    #[inline]
    pub fn new(
        x_min: Real,
        x_max: Real,
        y_min: Real,
        y_max: Real,
        z_min: Real,
        z_max: Real,
    ) -> Self {
        Self::from_corners(
            Point::new(x_min, y_min, z_min),
            Point::new(x_max, y_max, z_max),
        )
    }

    /// Creates a new box from its minimum and maximum corners, without identifier.
    #[inline]
    pub fn from_corners(mins: Point<Real>, maxs: Point<Real>) -> Self {
        Self {
            mins,
            maxs,
            id: None,
        }
    }

    /// Creates a degenerate box reduced to the single point `point`.
    #[inline]
    pub fn from_point(point: Point<Real>, id: Option<u32>) -> Self {
        Self {
            mins: point,
            maxs: point,
            id,
        }
    }

    /// The smallest box enclosing both `a` and `b`.
    ///
    /// The result has no identifier.
    #[inline]
    pub fn from_union(a: &Self, b: &Self) -> Self {
        Self::from_corners(a.mins.inf(&b.mins), a.maxs.sup(&b.maxs))
    }

    /// The smallest box enclosing every box yielded by `boxes`.
    ///
    /// Returns [`Self::new_invalid`] if the iterator is empty.
    pub fn from_boxes<'a, I>(boxes: I) -> Self
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes
            .into_iter()
            .fold(Self::new_invalid(), |acc, bbox| Self::from_union(&acc, bbox))
    }

    /// Creates an invalid box with inverted bounds.
    ///
    /// The resulting box has its mins set to maximum values and its maxs set to
    /// minimum values. This is useful as an initial value for merging
    /// algorithms (similar to starting a min operation with infinity).
    #[inline]
    pub fn new_invalid() -> Self {
        Self::from_corners(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Returns `self` with its identifier replaced by `id`.
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the identifier of this box.
    #[inline]
    pub fn set_id(&mut self, id: Option<u32>) {
        self.id = id;
    }

    /// The identifier of this box, if any.
    #[inline]
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    /// The point with minimum coordinates.
    #[inline]
    pub fn mins(&self) -> Point<Real> {
        self.mins
    }

    /// The point with maximum coordinates.
    #[inline]
    pub fn maxs(&self) -> Point<Real> {
        self.maxs
    }

    /// The min bound along the `x` axis.
    #[inline]
    pub fn x_min(&self) -> Real {
        self.mins.x
    }

    /// The max bound along the `x` axis.
    #[inline]
    pub fn x_max(&self) -> Real {
        self.maxs.x
    }

    /// The min bound along the `y` axis.
    #[inline]
    pub fn y_min(&self) -> Real {
        self.mins.y
    }

    /// The max bound along the `y` axis.
    #[inline]
    pub fn y_max(&self) -> Real {
        self.maxs.y
    }

    /// The min bound along the `z` axis.
    #[inline]
    pub fn z_min(&self) -> Real {
        self.mins.z
    }

    /// The max bound along the `z` axis.
    #[inline]
    pub fn z_max(&self) -> Real {
        self.maxs.z
    }

    /// The center of this box.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The extents of this box, i.e., its size along each axis.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Index of the first axis (0 for `x`, 1 for `y`, 2 for `z`) with a min bound greater
    /// than its max bound, or with a non-comparable (NaN) bound.
    pub fn first_inverted_axis(&self) -> Option<usize> {
        (0..DIM).find(|&i| !(self.mins[i] <= self.maxs[i]))
    }

    /// Are all six bounds of this box finite?
    pub fn is_finite(&self) -> bool {
        self.mins.iter().chain(self.maxs.iter()).all(|x| x.is_finite())
    }

    /// Checks if this box and `other` intersect.
    ///
    /// The extents are closed intervals: two boxes sharing only a face, an edge, or a
    /// vertex overlap.
    #[inline]
    pub fn overlap(&self, other: &Self) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    /// Checks if this box and `other` intersect once `other` has been enlarged by
    /// `tolerance` in every direction.
    #[inline]
    pub fn overlap_within_tolerance(&self, other: &Self, tolerance: Real) -> bool {
        let margin = Vector::repeat(tolerance);
        na::partial_le(&(self.mins - margin), &other.maxs)
            && na::partial_ge(&(self.maxs + margin), &other.mins)
    }

    /// Checks if `point` lies inside of this box, boundary included.
    #[inline]
    pub fn overlap_point(&self, point: &Point<Real>) -> bool {
        na::partial_le(&self.mins, point) && na::partial_ge(&self.maxs, point)
    }

    /// Checks if `point` lies inside of this box enlarged by `tolerance` in every direction.
    #[inline]
    pub fn overlap_point_within_tolerance(&self, point: &Point<Real>, tolerance: Real) -> bool {
        let margin = Vector::repeat(tolerance);
        na::partial_le(&(self.mins - margin), point) && na::partial_ge(&(self.maxs + margin), point)
    }

    /// Checks if `other` lies within this box, boundaries included.
    ///
    /// Every box contains itself.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    /// Moves each of the six faces of this box outward by `margin`.
    ///
    /// A negative `margin` shrinks the box.
    #[inline]
    pub fn grow_in_each_axial_direction(&mut self, margin: Real) {
        let margin = Vector::repeat(margin);
        self.mins -= margin;
        self.maxs += margin;
    }

    /// Enlarges this box, if needed, so that it encloses `point`.
    #[inline]
    pub fn grow_to_include(&mut self, point: &Point<Real>) {
        self.mins = self.mins.inf(point);
        self.maxs = self.maxs.sup(point);
    }

    /// Replaces this box by the degenerate box reduced to `point`, with the given identifier.
    #[inline]
    pub fn set_from_point(&mut self, point: &Point<Real>, id: Option<u32>) {
        *self = Self::from_point(*point, id);
    }
}

impl BoundingVolume for BoundingBox {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn intersects(&self, other: &BoundingBox) -> bool {
        self.overlap(other)
    }

    #[inline]
    fn contains(&self, other: &BoundingBox) -> bool {
        self.contains(other)
    }

    #[inline]
    fn merge(&mut self, other: &BoundingBox) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &BoundingBox) -> BoundingBox {
        Self::from_union(self, other)
    }

    #[inline]
    fn loosen(&mut self, amount: Real) {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        self.grow_in_each_axial_direction(amount);
    }

    #[inline]
    fn loosened(&self, amount: Real) -> BoundingBox {
        let mut result = *self;
        result.loosen(amount);
        result
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.x_min(),
            self.x_max(),
            self.y_min(),
            self.y_max(),
            self.z_min(),
            self.z_max()
        )
    }
}

impl AbsDiffEq for BoundingBox {
    type Epsilon = Real;

    fn default_epsilon() -> Real {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
        self.id == other.id
            && self.mins.abs_diff_eq(&other.mins, epsilon)
            && self.maxs.abs_diff_eq(&other.maxs, epsilon)
    }
}

impl RelativeEq for BoundingBox {
    fn default_max_relative() -> Real {
        Real::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Real, max_relative: Real) -> bool {
        self.id == other.id
            && self.mins.relative_eq(&other.mins, epsilon, max_relative)
            && self.maxs.relative_eq(&other.maxs, epsilon, max_relative)
    }
}
