//! Hash Matrix
//!
//! A 64 × 52 table of bit-selection masks. Lane `r` is the GF(2) parity of
//! `cell[r][c] & x[c]` over all slots `c`, i.e. the unit computes `y = M·x`
//! with `x` the bit expansion of the pre-mixed input.
//!
//! Besides the row view the matrix keeps a column view: for slot `c` and bit
//! `b`, the set of lanes whose cell selects that bit. Both views are updated
//! together on every cell write.

use crate::types::{
    word_mask, ConfigError, Lanes, Word, LANE_COUNT, MAX_WORD_WIDTH, SLOT_COUNT,
};

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

const COLUMN_BITS: usize = MAX_WORD_WIDTH as usize;

/// Cell table plus its column transpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashMatrix {
    word_width: u32,
    rows: Box<[[Word; SLOT_COUNT]; LANE_COUNT]>,
    columns: Box<[[Lanes; COLUMN_BITS]; SLOT_COUNT]>,
}

impl HashMatrix {
    /// All-zero matrix for slot words of `word_width` bits.
    ///
    /// # Errors
    /// `WordWidth` outside `1..=32`.
    pub fn new(word_width: u32) -> Result<Self, ConfigError> {
        if word_width == 0 || word_width > MAX_WORD_WIDTH {
            return Err(ConfigError::WordWidth {
                width: u64::from(word_width),
            });
        }
        Ok(Self {
            word_width,
            rows: Box::new([[0; SLOT_COUNT]; LANE_COUNT]),
            columns: Box::new([[0; COLUMN_BITS]; SLOT_COUNT]),
        })
    }

    /// Configured slot word width.
    #[must_use]
    pub const fn word_width(&self) -> u32 {
        self.word_width
    }

    /// Overwrite one cell.
    ///
    /// # Errors
    /// `LaneIndex`/`SlotIndex` for out-of-range coordinates, `MaskTooWide`
    /// when the mask selects bits above the word width. Masks are never
    /// truncated.
    pub fn set_cell(&mut self, lane: usize, slot: usize, mask: u64) -> Result<(), ConfigError> {
        if lane >= LANE_COUNT {
            return Err(ConfigError::LaneIndex { lane: lane as u64 });
        }
        if slot >= SLOT_COUNT {
            return Err(ConfigError::SlotIndex { slot: slot as u64 });
        }
        let cell = Word::try_from(mask)
            .ok()
            .filter(|m| m & !word_mask(self.word_width) == 0)
            .ok_or(ConfigError::MaskTooWide {
                lane,
                slot,
                mask,
                width: self.word_width,
            })?;

        self.rows[lane][slot] = cell;
        let lane_bit: Lanes = 1 << lane;
        for (bit, column) in self.columns[slot].iter_mut().enumerate() {
            if (cell >> bit) & 1 == 1 {
                *column |= lane_bit;
            } else {
                *column &= !lane_bit;
            }
        }
        Ok(())
    }

    /// Mask of one cell, `None` for out-of-range coordinates.
    #[must_use]
    pub fn cell(&self, lane: usize, slot: usize) -> Option<Word> {
        self.rows.get(lane).and_then(|row| row.get(slot)).copied()
    }

    /// All rows, lane order.
    #[must_use]
    pub fn rows(&self) -> &[[Word; SLOT_COUNT]; LANE_COUNT] {
        &self.rows
    }

    /// Lanes selecting bit `bit` of slot `slot`. Zero outside the word.
    #[inline]
    #[must_use]
    pub fn column(&self, slot: usize, bit: usize) -> Lanes {
        self.columns
            .get(slot)
            .and_then(|bits| bits.get(bit))
            .copied()
            .unwrap_or(0)
    }

    /// Non-zero cells as `(lane, slot, mask)`, lane-major.
    pub fn nonzero_cells(&self) -> impl Iterator<Item = (usize, usize, Word)> + '_ {
        self.rows.iter().enumerate().flat_map(|(lane, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &mask)| mask != 0)
                .map(move |(slot, &mask)| (lane, slot, mask))
        })
    }
}
