use crate::math::{Point, Real};

/// Trait of the volumes stored at the nodes of a hierarchy.
///
/// A bounding volume supports cheap overlap and containment tests, and two bounding volumes can
/// be merged into one enclosing both.
pub trait BoundingVolume {
    /// A point inside of this bounding volume, ideally its center.
    fn center(&self) -> Point<Real>;

    /// Checks if this bounding volume and `other` share at least one point.
    fn intersects(&self, other: &Self) -> bool;

    /// Checks if `other` lies entirely inside of this bounding volume.
    fn contains(&self, other: &Self) -> bool;

    /// Enlarges this bounding volume in-place so that it also encloses `other`.
    fn merge(&mut self, other: &Self);

    /// The smallest bounding volume enclosing both `self` and `other`.
    fn merged(&self, other: &Self) -> Self;

    /// Enlarges this bounding volume by `amount` in every direction.
    fn loosen(&mut self, amount: Real);

    /// A copy of this bounding volume enlarged by `amount` in every direction.
    fn loosened(&self, amount: Real) -> Self;
}
