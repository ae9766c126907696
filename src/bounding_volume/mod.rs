//! Bounding volumes.

#[doc(inline)]
pub use crate::bounding_volume::bounding_box::BoundingBox;
#[doc(inline)]
pub use crate::bounding_volume::bounding_volume::BoundingVolume;

#[doc(hidden)]
pub mod bounding_box;
#[doc(hidden)]
pub mod bounding_volume;
