use super::hierarchy_placement::{Slot, TreeLayout, MAX_LEAF_COUNT};
use super::{HierarchyBuildError, HierarchyNode, MortonHierarchy};
use crate::bounding_volume::BoundingBox;
use crate::utils::morton::{MortonAnchor, MortonCodec, DEFAULT_BITS_PER_AXIS, MAX_BITS_PER_AXIS};

/// Parameters of the construction of a [`MortonHierarchy`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HierarchyBuildOptions {
    /// The point of each box the Morton code is computed from.
    pub anchor: MortonAnchor,
    /// The quantization resolution of the Morton codes, in `1..=21`.
    pub bits_per_axis: u32,
    /// If `true`, boxes with inverted or non-finite bounds are rejected.
    pub strict: bool,
}

impl Default for HierarchyBuildOptions {
    fn default() -> Self {
        Self {
            anchor: MortonAnchor::default(),
            bits_per_axis: DEFAULT_BITS_PER_AXIS,
            strict: false,
        }
    }
}

impl HierarchyBuildOptions {
    /// Sets the point of each box the Morton code is computed from.
    #[must_use]
    pub fn with_anchor(mut self, anchor: MortonAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the quantization resolution of the Morton codes.
    #[must_use]
    pub fn with_bits_per_axis(mut self, bits_per_axis: u32) -> Self {
        self.bits_per_axis = bits_per_axis;
        self
    }

    /// Enables or disables the validation of the input boxes.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Sorts the boxes along a Morton curve.
///
/// Returns the input indices of the boxes in ascending order of the key `(code, id, index)`,
/// where `id` is the box identifier (or its index if it has none). The result only depends on
/// the boxes and the options, never on the sorting algorithm.
pub fn morton_sort_boxes(boxes: &[BoundingBox], options: &HierarchyBuildOptions) -> Vec<usize> {
    let codec = MortonCodec::from_boxes(boxes, options.anchor, options.bits_per_axis);
    let mut keyed: Vec<_> = boxes
        .iter()
        .enumerate()
        .map(|(i, bbox)| {
            let code = codec.encode_box(bbox, options.anchor);
            (code, bbox.id().unwrap_or(i as u32), i)
        })
        .collect();

    keyed.sort_unstable();
    keyed.into_iter().map(|(_, _, i)| i).collect()
}

impl MortonHierarchy {
    /// Builds a hierarchy over `boxes` with the default options.
    ///
    /// Each leaf keeps track of the position of its box in `boxes`.
    pub fn build(boxes: &[BoundingBox]) -> Result<Self, HierarchyBuildError> {
        Self::build_with_options(boxes, HierarchyBuildOptions::default())
    }

    /// Builds a hierarchy over `boxes`.
    ///
    /// Fails if `boxes` is empty, if the resolution is not supported, or, in strict mode, if a
    /// box is malformed.
    pub fn build_with_options(
        boxes: &[BoundingBox],
        options: HierarchyBuildOptions,
    ) -> Result<Self, HierarchyBuildError> {
        if boxes.is_empty() {
            return Err(HierarchyBuildError::EmptyInput);
        }
        if boxes.len() > MAX_LEAF_COUNT {
            return Err(HierarchyBuildError::TooManyBoxes { count: boxes.len() });
        }
        if options.bits_per_axis == 0 || options.bits_per_axis > MAX_BITS_PER_AXIS {
            return Err(HierarchyBuildError::InvalidResolution {
                bits: options.bits_per_axis,
            });
        }
        if options.strict {
            validate_boxes(boxes)?;
        }

        let layout = TreeLayout::new(boxes.len())?;
        let (n, m) = layout.shape();
        log::debug!(
            "Building a Morton hierarchy over {} boxes (n = {}, m = {}).",
            boxes.len(),
            n,
            m
        );

        let sorted_indices = morton_sort_boxes(boxes, &options);
        let slots = layout.slots();
        let mut node_boxes = vec![BoundingBox::new_invalid(); slots.len()];

        // Leaves first.
        for (id, slot) in slots.iter().enumerate() {
            if let Slot::Leaf { sorted_position } = slot {
                node_boxes[id] = boxes[sorted_indices[*sorted_position as usize]];
            }
        }

        // Then internal nodes, bottom-up. Children are always stored after their parent.
        for (id, slot) in slots.iter().enumerate().rev() {
            if let Slot::Internal { right_child } = slot {
                node_boxes[id] =
                    BoundingBox::from_union(&node_boxes[id + 1], &node_boxes[*right_child as usize]);
            }
        }

        let nodes = slots
            .iter()
            .zip(node_boxes)
            .map(|(slot, bbox)| match *slot {
                Slot::Leaf { sorted_position } => HierarchyNode::Leaf {
                    bbox,
                    input_index: sorted_indices[sorted_position as usize] as u32,
                },
                Slot::Internal { right_child } => HierarchyNode::Internal { bbox, right_child },
            })
            .collect();

        Ok(Self { nodes, options })
    }
}

fn validate_boxes(boxes: &[BoundingBox]) -> Result<(), HierarchyBuildError> {
    for (index, bbox) in boxes.iter().enumerate() {
        if !bbox.is_finite() {
            return Err(HierarchyBuildError::NonFiniteBox { index });
        }
        if let Some(axis) = bbox.first_inverted_axis() {
            return Err(HierarchyBuildError::MalformedBox { index, axis });
        }
    }

    Ok(())
}
