//! Parity Group Combiner
//!
//! XOR-reduces configurable lane subsets into single group bits. A pure
//! reduction of already computed lanes: no new matrix rows.

use crate::types::{ConfigError, GroupBits, Lanes, GROUP_COUNT};

/// Up to eight lane masks. Groups may overlap; an empty mask yields `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParityGroupCombiner {
    groups: [Lanes; GROUP_COUNT],
}

impl ParityGroupCombiner {
    /// Combiner over the given group masks.
    #[must_use]
    pub const fn new(groups: [Lanes; GROUP_COUNT]) -> Self {
        Self { groups }
    }

    /// Set the member lanes of one group.
    ///
    /// # Errors
    /// `GroupIndex` past the last group.
    pub fn set_group(&mut self, group: usize, lanes: Lanes) -> Result<(), ConfigError> {
        let slot = self
            .groups
            .get_mut(group)
            .ok_or(ConfigError::GroupIndex {
                group: group as u64,
            })?;
        *slot = lanes;
        Ok(())
    }

    /// Group masks in group order.
    #[must_use]
    pub const fn masks(&self) -> &[Lanes; GROUP_COUNT] {
        &self.groups
    }

    /// Group bits for one lane vector.
    #[inline]
    #[must_use]
    pub fn combine(&self, lanes: Lanes) -> GroupBits {
        combine(lanes, &self.groups)
    }
}

/// `group_bit[g] = parity(lanes & groups[g])`.
#[inline]
#[must_use]
pub fn combine(lanes: Lanes, groups: &[Lanes; GROUP_COUNT]) -> GroupBits {
    groups
        .iter()
        .enumerate()
        .fold(0, |acc, (g, &mask)| acc | (parity(lanes & mask) << g))
}

/// XOR of all bits of `v`.
#[inline]
#[must_use]
pub const fn parity(v: u64) -> u8 {
    (v.count_ones() & 1) as u8
}
