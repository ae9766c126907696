//! Array layout of a depth-balanced binary tree with an arbitrary number of leaves.
//!
//! Writing the leaf count as `N = 2^n + m` with `0 <= m < 2^n`, the tree is a perfect tree of
//! depth `n` where `m` of the `2^n` leaf slots are split into two leaves of depth `n + 1`. The
//! split slots are picked along the bit-reversal order of the slots (first the leftmost slot,
//! then the one at half the row, then the quarter points, etc.) so that the extra leaves are
//! spread evenly across the tree.
//!
//! The tree is stored in pre-order in a flat array of `2N - 1` slots: the left child of the
//! internal node at slot `i` is always at slot `i + 1`, only the right child index needs to be
//! stored. The placement is computed by first indexing every node of a perfect tree of depth
//! `n` in pre-order (its *nominal* index), then shifting those indices to make room for the
//! two extra leaves under each split slot.

use super::PlacementError;

/// The largest leaf count a layout can hold, so that its `2N - 1` slots are addressable with
/// `u32` indices.
pub const MAX_LEAF_COUNT: usize = 1 << 31;

/// Writes `num_leaves` as `2^n + m` with `n` as large as possible, and returns `(n, m)`.
///
/// `num_leaves` must not be zero.
#[inline]
pub fn leaf_count_shape(num_leaves: usize) -> (u32, usize) {
    debug_assert!(num_leaves > 0);
    let n = usize::BITS - 1 - num_leaves.leading_zeros();
    (n, num_leaves - (1 << n))
}

/// The exponent of the largest power of two dividing `i`, for every `i` in `0..2^n`.
///
/// This is the ruler sequence, with the convention that the entry for zero is zero.
pub fn smallest_two_powers(n: u32) -> Vec<u32> {
    let two_to_the_n = 1usize << n;
    let mut smallest_two_powers = vec![0; two_to_the_n];

    for (i, power) in smallest_two_powers.iter_mut().enumerate().skip(1) {
        *power = i.trailing_zeros();
    }

    smallest_two_powers
}

/// The inclusive prefix sums of `smallest_two_powers`.
pub fn summed_smallest_two_powers(smallest_two_powers: &[u32]) -> Vec<usize> {
    smallest_two_powers
        .iter()
        .scan(0, |sum, power| {
            *sum += *power as usize;
            Some(*sum)
        })
        .collect()
}

/// The `m` leaf slots of row `n` that hold two leaves instead of one, in priority order.
///
/// The sequence alternates between a jump of half the row and a jump of
/// `3 * 2^((n - 2) - v(k))` (with `v` the ruler sequence) modulo `2^n`, which enumerates the
/// slots in bit-reversal order: `0, 4, 2, 6, 1, 5, 3` for `n = 3`.
///
/// `m` must be smaller than `2^n`.
pub fn indexes_to_place_two_nodes(n: u32, m: usize, smallest_two_powers: &[u32]) -> Vec<usize> {
    if m == 0 {
        return Vec::new();
    }

    debug_assert!(m < (1 << n));
    let spacer = 1usize << (n - 1);
    let modulus = 1usize << n;
    let strides: Vec<usize> = (0..m / 2)
        .map(|k| 3 << (n - 2 - smallest_two_powers[k + 1]))
        .collect();

    let mut place_two_nodes = Vec::with_capacity(m);
    place_two_nodes.push(0);

    for i in 1..m {
        let jump = if i % 2 == 1 {
            spacer
        } else {
            strides[i / 2 - 1]
        };
        place_two_nodes.push((place_two_nodes[i - 1] + jump) % modulus);
    }

    place_two_nodes
}

/// Flags, among the `2^n` leaf slots of row `n`, the ones listed in `place_two_nodes`.
pub fn is_two_nodes_here(n: u32, place_two_nodes: &[usize]) -> Vec<bool> {
    let mut is_two_nodes_here = vec![false; 1 << n];

    for &slot in place_two_nodes {
        is_two_nodes_here[slot] = true;
    }

    is_two_nodes_here
}

/// Maps each nominal index of a perfect tree of depth `n` to its final index in the array.
///
/// Every split leaf slot pushes all the nodes that follow it in pre-order by two positions.
pub fn advanced_indexes_because_of_two_nodes(
    n: u32,
    summed_smallest_two_powers: &[usize],
    is_two_nodes_here: &[bool],
) -> Vec<usize> {
    let table_len = (1usize << (n + 1)) - 1;
    let mut shifts = vec![0; table_len];

    for (in_row, _) in is_two_nodes_here
        .iter()
        .enumerate()
        .filter(|(_, is_two)| **is_two)
    {
        shifts[nominal_leaf_index(n, in_row, summed_smallest_two_powers)] = 2;
    }

    let mut advanced = Vec::with_capacity(table_len);
    let mut shift = 0;

    for (nominal, extra) in shifts.into_iter().enumerate() {
        advanced.push(nominal + shift);
        shift += extra;
    }

    advanced
}

// Pre-order index, in a perfect tree of depth `n`, of the `in_row`-th leaf.
#[inline]
fn nominal_leaf_index(n: u32, in_row: usize, summed_smallest_two_powers: &[usize]) -> usize {
    n as usize + in_row + summed_smallest_two_powers[in_row]
}

/// The content of one slot of a [`TreeLayout`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A leaf, holding the box at position `sorted_position` of the Morton order.
    Leaf {
        /// Position of the leaf's box in the sorted input.
        sorted_position: u32,
    },
    /// An internal node. Its left child is the next slot.
    Internal {
        /// Slot of the right child.
        right_child: u32,
    },
}

impl Slot {
    /// Is this slot a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Slot::Leaf { .. })
    }
}

/// The placement of every node of a depth-balanced binary tree with a given number of leaves.
///
/// Leaves are laid out left to right in sorted order: the in-order sequence of leaves visits
/// `sorted_position` `0, 1, 2, ...`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeLayout {
    slots: Vec<Slot>,
    n: u32,
    m: usize,
}

impl TreeLayout {
    /// Computes the layout of a tree with `num_leaves` leaves.
    pub fn new(num_leaves: usize) -> Result<Self, PlacementError> {
        if num_leaves == 0 {
            return Err(PlacementError::ZeroLeaves);
        }
        if num_leaves > MAX_LEAF_COUNT {
            return Err(PlacementError::TooManyLeaves { count: num_leaves });
        }

        let (n, m) = leaf_count_shape(num_leaves);
        let smallest = smallest_two_powers(n);
        let summed = summed_smallest_two_powers(&smallest);
        let place_two_nodes = indexes_to_place_two_nodes(n, m, &smallest);
        let is_two = is_two_nodes_here(n, &place_two_nodes);
        let advanced = advanced_indexes_because_of_two_nodes(n, &summed, &is_two);

        let advance = |nominal: usize| {
            advanced
                .get(nominal)
                .copied()
                .ok_or(PlacementError::NominalIndexOutOfBounds { index: nominal })
        };

        let mut slots = vec![None; 2 * num_leaves - 1];
        let mut sorted_position = 0;
        let mut base_step = 1;
        let mut step_increment = 1;

        // Rows are processed bottom-up, each one from left to right.
        for row in (0..=n).rev() {
            for in_row in 0..(1usize << row) {
                let nominal = row as usize + in_row * base_step + summed[in_row];
                let slot = advance(nominal)?;

                if row == n {
                    if is_two[in_row] {
                        assign_slot(&mut slots, slot + 1, leaf(sorted_position))?;
                        assign_slot(&mut slots, slot + 2, leaf(sorted_position + 1))?;
                        assign_slot(&mut slots, slot, internal(slot + 2))?;
                        sorted_position += 2;
                    } else {
                        assign_slot(&mut slots, slot, leaf(sorted_position))?;
                        sorted_position += 1;
                    }
                } else {
                    let right_child = advance(nominal + step_increment)?;
                    assign_slot(&mut slots, slot, internal(right_child))?;
                }
            }

            step_increment *= 2;
            base_step += step_increment;
        }

        if sorted_position != num_leaves {
            return Err(PlacementError::PlacedLeafCount {
                expected: num_leaves,
                found: sorted_position,
            });
        }

        let slots = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.ok_or(PlacementError::UnassignedSlot { slot: i }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { slots, n, m })
    }

    /// The slots of this layout, in array order.
    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The number of leaves of this layout.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.slots.len().div_ceil(2)
    }

    /// The number of internal nodes of this layout.
    #[inline]
    pub fn internal_count(&self) -> usize {
        self.slots.len() / 2
    }

    /// The `(n, m)` decomposition `N = 2^n + m` of the leaf count.
    ///
    /// Leaves sit at depth `n`, except `2m` of them which sit at depth `n + 1`.
    #[inline]
    pub fn shape(&self) -> (u32, usize) {
        (self.n, self.m)
    }

    /// The two children slots of the internal node at `slot`, or `None` if it is a leaf.
    #[inline]
    pub fn children(&self, slot: usize) -> Option<(usize, usize)> {
        match self.slots[slot] {
            Slot::Leaf { .. } => None,
            Slot::Internal { right_child } => Some((slot + 1, right_child as usize)),
        }
    }

    /// For each position of the sorted input, the slot holding the corresponding leaf.
    pub fn leaf_slots(&self) -> Vec<u32> {
        let mut leaf_slots = vec![0; self.leaf_count()];

        for (i, slot) in self.slots.iter().enumerate() {
            if let Slot::Leaf { sorted_position } = slot {
                leaf_slots[*sorted_position as usize] = i as u32;
            }
        }

        leaf_slots
    }

    /// The depth of every slot, the root being at depth 0.
    pub fn depths(&self) -> Vec<u32> {
        let mut depths = vec![0; self.slots.len()];

        // Children are always stored after their parent.
        for i in 0..self.slots.len() {
            if let Some((left, right)) = self.children(i) {
                depths[left] = depths[i] + 1;
                depths[right] = depths[i] + 1;
            }
        }

        depths
    }

    /// The depth of every leaf, indexed by sorted position.
    pub fn leaf_depths(&self) -> Vec<u32> {
        let depths = self.depths();
        self.leaf_slots()
            .into_iter()
            .map(|slot| depths[slot as usize])
            .collect()
    }
}

#[inline]
fn leaf(sorted_position: usize) -> Slot {
    Slot::Leaf {
        sorted_position: sorted_position as u32,
    }
}

#[inline]
fn internal(right_child: usize) -> Slot {
    Slot::Internal {
        right_child: right_child as u32,
    }
}

fn assign_slot(slots: &mut [Option<Slot>], index: usize, slot: Slot) -> Result<(), PlacementError> {
    match slots.get_mut(index) {
        None => Err(PlacementError::SlotOutOfBounds { slot: index }),
        Some(Some(_)) => Err(PlacementError::SlotAssignedTwice { slot: index }),
        Some(entry) => {
            *entry = Some(slot);
            Ok(())
        }
    }
}
