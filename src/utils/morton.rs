//! Morton encoding of 3D vectors.

// Bit spreading from https://github.com/DGriffin91/obvhs/tree/main/src/ploc/morton.rs
// MIT/Apache 2 license.

use crate::bounding_volume::BoundingBox;
use crate::math::{Point, Real, Vector};

/// The largest supported quantization resolution, in bits per axis.
///
/// Three axes of 21 bits fill 63 bits of a `u64` code.
pub const MAX_BITS_PER_AXIS: u32 = 21;

/// The default quantization resolution, in bits per axis: a grid of 1024 cells per axis and
/// 30-bit codes.
pub const DEFAULT_BITS_PER_AXIS: u32 = 10;

/// Minimum extent given to each axis of a Morton frame so that normalization never divides by
/// zero.
pub const DEGENERATE_EXTENT_GUARD: f64 = 1.0e-4;

//---------------------------------------------------
// --- 21 bit resolution per channel morton curve ---
//---------------------------------------------------

#[inline]
fn split_by_3_u64(a: u32) -> u64 {
    let mut x = a as u64 & 0x1fffff; // we only look at the first 21 bits
    x = (x | x << 32) & 0x1f00000000ffff;
    x = (x | x << 16) & 0x1f0000ff0000ff;
    x = (x | x << 8) & 0x100f00f00f00f00f;
    x = (x | x << 4) & 0x10c30c30c30c30c3;
    x = (x | x << 2) & 0x1249249249249249;
    x
}

#[inline]
fn compact_by_3_u64(a: u64) -> u32 {
    let mut x = a & 0x1249249249249249;
    x = (x | x >> 2) & 0x10c30c30c30c30c3;
    x = (x | x >> 4) & 0x100f00f00f00f00f;
    x = (x | x >> 8) & 0x1f0000ff0000ff;
    x = (x | x >> 16) & 0x1f00000000ffff;
    x = (x | x >> 32) & 0x1fffff;
    x as u32
}

/// Interleaves the bits of the three given coordinates into a single Morton code.
///
/// Each bit triple of the result is ordered `x y z`, `x` being the most significant. Only the
/// 21 lowest bits of each coordinate are used.
#[inline]
pub fn morton_encode_u64(x: u32, y: u32, z: u32) -> u64 {
    split_by_3_u64(x) << 2 | split_by_3_u64(y) << 1 | split_by_3_u64(z)
}

/// Splits a Morton code produced by [`morton_encode_u64`] back into its three coordinates.
#[inline]
pub fn morton_decode_u64(code: u64) -> [u32; 3] {
    [
        compact_by_3_u64(code >> 2),
        compact_by_3_u64(code >> 1),
        compact_by_3_u64(code),
    ]
}

/// Maps a value of `0.0..=1.0` to one of the `2^bits` cells of an integer grid.
///
/// Values outside of the unit interval are clamped to the first or last cell.
#[inline]
pub fn quantize_unorm(value: f64, bits_per_axis: u32) -> u32 {
    let cells = (1u64 << bits_per_axis) as f64;
    (value * cells).clamp(0.0, cells - 1.0) as u32
}

/// Encode a 3D position into a u64 morton value.
/// Input should be 0.0..=1.0
#[inline]
pub fn morton_encode_u64_unorm(p: Vector<f64>, bits_per_axis: u32) -> u64 {
    morton_encode_u64(
        quantize_unorm(p.x, bits_per_axis),
        quantize_unorm(p.y, bits_per_axis),
        quantize_unorm(p.z, bits_per_axis),
    )
}

/// The point of a box used to compute its Morton code.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MortonAnchor {
    /// The corner with minimum coordinates.
    #[default]
    MinCorner,
    /// The center of the box.
    Center,
}

impl MortonAnchor {
    /// The representative point of `bbox` for this anchor.
    #[inline]
    pub fn point(self, bbox: &BoundingBox) -> Point<Real> {
        match self {
            MortonAnchor::MinCorner => bbox.mins(),
            MortonAnchor::Center => bbox.center(),
        }
    }
}

/// Quantizes points of a fixed frame onto an integer grid and interleaves the result into
/// Morton codes.
///
/// All computations happen in `f64` regardless of the scalar type of this crate, so that the
/// same inputs produce bit-identical codes on every platform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MortonCodec {
    origin: Point<f64>,
    inv_extents: Vector<f64>,
    bits_per_axis: u32,
}

impl MortonCodec {
    /// Creates a codec mapping the frame `[mins, maxs]` to the unit cube.
    ///
    /// Axes with an extent smaller than [`DEGENERATE_EXTENT_GUARD`] are widened to that
    /// extent. The resolution is clamped to `1..=MAX_BITS_PER_AXIS`.
    pub fn new(mins: Point<f64>, maxs: Point<f64>, bits_per_axis: u32) -> Self {
        let mut extents = maxs - mins;

        for (axis, extent) in extents.iter_mut().enumerate() {
            if !(*extent >= DEGENERATE_EXTENT_GUARD) {
                log::debug!(
                    "Widening degenerate Morton frame extent {} along axis {}.",
                    extent,
                    axis
                );
                *extent = DEGENERATE_EXTENT_GUARD;
            }
        }

        Self {
            origin: mins,
            inv_extents: extents.map(|e| 1.0 / e),
            bits_per_axis: bits_per_axis.clamp(1, MAX_BITS_PER_AXIS),
        }
    }

    /// Creates a codec whose frame is the bounding box of the anchor points of `boxes`.
    ///
    /// With [`MortonAnchor::MinCorner`], only the min corners contribute to the frame.
    pub fn from_boxes(boxes: &[BoundingBox], anchor: MortonAnchor, bits_per_axis: u32) -> Self {
        let mut anchors = boxes.iter().map(|bbox| anchor.point(bbox).cast::<f64>());

        let Some(first) = anchors.next() else {
            return Self::new(Point::origin(), Point::origin(), bits_per_axis);
        };

        let (mins, maxs) = anchors.fold((first, first), |(mins, maxs), pt| {
            (mins.inf(&pt), maxs.sup(&pt))
        });

        log::trace!(
            "Morton frame: mins {:?}, maxs {:?}, {} bits per axis.",
            mins,
            maxs,
            bits_per_axis
        );

        Self::new(mins, maxs, bits_per_axis)
    }

    /// The number of bits each axis is quantized to.
    #[inline]
    pub fn bits_per_axis(&self) -> u32 {
        self.bits_per_axis
    }

    /// The point mapped to the first cell of the grid.
    #[inline]
    pub fn origin(&self) -> Point<f64> {
        self.origin
    }

    /// Normalizes `point` to the unit cube of this codec's frame.
    ///
    /// Points outside of the frame are not clamped here.
    #[inline]
    pub fn normalize(&self, point: &Point<Real>) -> Vector<f64> {
        (point.cast::<f64>() - self.origin).component_mul(&self.inv_extents)
    }

    /// The Morton code of `point`.
    #[inline]
    pub fn encode(&self, point: &Point<Real>) -> u64 {
        morton_encode_u64_unorm(self.normalize(point), self.bits_per_axis)
    }

    /// The Morton code of the `anchor` point of `bbox`.
    #[inline]
    pub fn encode_box(&self, bbox: &BoundingBox, anchor: MortonAnchor) -> u64 {
        self.encode(&anchor.point(bbox))
    }
}
