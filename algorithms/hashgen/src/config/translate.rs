//! Selector Translation
//!
//! Turns logical matrix intent into concrete cell writes. Pure: the same
//! selector and word width always yield the same updates, and nothing is
//! applied until the whole configuration validates.

use crate::types::{low_mask, ConfigError, Word, LANE_COUNT, SLOT_COUNT};

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// One matrix cell overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellUpdate {
    /// Output lane.
    pub lane: usize,
    /// Input slot.
    pub slot: usize,
    /// New bit-selection mask.
    pub mask: u64,
}

/// Logical description of matrix contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum LogicalSelector {
    /// Literal cell write.
    Cell {
        /// Output lane.
        lane: usize,
        /// Input slot.
        slot: usize,
        /// Bit-selection mask.
        mask: u64,
    },
    /// Route `count` bits of a slot word, from `lsb` upward, to consecutive
    /// lanes starting at `first_lane`.
    Identity {
        /// Source slot.
        slot: usize,
        /// First routed bit.
        lsb: u32,
        /// Number of routed bits.
        count: u32,
        /// Lane receiving bit `lsb`.
        first_lane: usize,
    },
    /// CRC of the listed slot words (zero initial value, MSB first, no
    /// reflection) on lanes `first_lane..first_lane + width`, lane
    /// `first_lane` holding the CRC's bit 0.
    Crc {
        /// Generator polynomial without its `x^width` term.
        polynomial: u64,
        /// CRC width in bits.
        width: u32,
        /// Slots in message order.
        slots: Vec<usize>,
        /// Lane receiving CRC bit 0.
        first_lane: usize,
    },
}

/// Expand one selector into cell writes for slot words of `word_width` bits.
///
/// # Errors
/// Index errors for slots/lanes out of range, `IdentityBits` for a bit range
/// outside the word, `CrcWidth`/`CrcPolynomial` for malformed CRCs.
pub fn translate(
    selector: &LogicalSelector,
    word_width: u32,
) -> Result<Vec<CellUpdate>, ConfigError> {
    match selector {
        LogicalSelector::Cell { lane, slot, mask } => Ok(vec![CellUpdate {
            lane: *lane,
            slot: *slot,
            mask: *mask,
        }]),
        LogicalSelector::Identity {
            slot,
            lsb,
            count,
            first_lane,
        } => identity(*slot, *lsb, *count, *first_lane, word_width),
        LogicalSelector::Crc {
            polynomial,
            width,
            slots,
            first_lane,
        } => crc(*polynomial, *width, slots, *first_lane, word_width),
    }
}

fn check_slot(slot: usize) -> Result<(), ConfigError> {
    if slot < SLOT_COUNT {
        Ok(())
    } else {
        Err(ConfigError::SlotIndex { slot: slot as u64 })
    }
}

/// `first_lane .. first_lane + count` must lie inside the 64 lanes; the error
/// names the last lane the range would touch.
fn check_lanes(first_lane: usize, count: u64) -> Result<(), ConfigError> {
    let first = first_lane as u64;
    match first.checked_add(count) {
        Some(end) if end <= LANE_COUNT as u64 => Ok(()),
        Some(end) => Err(ConfigError::LaneIndex { lane: end - 1 }),
        None => Err(ConfigError::LaneIndex { lane: first }),
    }
}

fn identity(
    slot: usize,
    lsb: u32,
    count: u32,
    first_lane: usize,
    word_width: u32,
) -> Result<Vec<CellUpdate>, ConfigError> {
    check_slot(slot)?;
    if count == 0 || u64::from(lsb) + u64::from(count) > u64::from(word_width) {
        return Err(ConfigError::IdentityBits { slot, lsb, count });
    }
    check_lanes(first_lane, u64::from(count))?;

    Ok((0..count)
        .map(|i| CellUpdate {
            lane: first_lane + i as usize,
            slot,
            mask: 1 << (lsb + i),
        })
        .collect())
}

/// CRC register after clocking one zero bit.
const fn clock_zero(reg: u64, polynomial: u64, width: u32) -> u64 {
    let feedback = (reg >> (width - 1)) & 1;
    let shifted = (reg << 1) & low_mask(width);
    if feedback == 1 {
        shifted ^ polynomial
    } else {
        shifted
    }
}

/// With zero initial value the CRC is linear in the message bits, so each
/// bit contributes a fixed register value: `polynomial` for the last bit,
/// clocked through one zero per following bit. Walking the message backward
/// produces those contributions in order.
fn crc(
    polynomial: u64,
    width: u32,
    slots: &[usize],
    first_lane: usize,
    word_width: u32,
) -> Result<Vec<CellUpdate>, ConfigError> {
    if width == 0 || width > u64::BITS {
        return Err(ConfigError::CrcWidth { width });
    }
    if polynomial == 0 || polynomial & !low_mask(width) != 0 {
        return Err(ConfigError::CrcPolynomial { polynomial, width });
    }
    check_lanes(first_lane, u64::from(width))?;
    for &slot in slots {
        check_slot(slot)?;
    }

    // acc[j][c]: bits of slot c selected by CRC bit j
    let mut acc: Vec<[Word; SLOT_COUNT]> = vec![[0; SLOT_COUNT]; width as usize];
    let mut contribution = polynomial;
    for &slot in slots.iter().rev() {
        for bit in 0..word_width {
            for (j, row) in acc.iter_mut().enumerate() {
                if (contribution >> j) & 1 == 1 {
                    row[slot] ^= 1 << bit;
                }
            }
            contribution = clock_zero(contribution, polynomial, width);
        }
    }

    let mut touched = [false; SLOT_COUNT];
    for &slot in slots {
        touched[slot] = true;
    }
    Ok(acc
        .iter()
        .enumerate()
        .flat_map(|(j, row)| {
            touched
                .iter()
                .enumerate()
                .filter(|&(_, &t)| t)
                .map(move |(slot, _)| CellUpdate {
                    lane: first_lane + j,
                    slot,
                    mask: u64::from(row[slot]),
                })
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn identity_routes_bits() {
        let updates = translate(
            &LogicalSelector::Identity {
                slot: 3,
                lsb: 2,
                count: 3,
                first_lane: 10,
            },
            16,
        )
        .unwrap();
        assert_eq!(
            updates,
            vec![
                CellUpdate { lane: 10, slot: 3, mask: 0b100 },
                CellUpdate { lane: 11, slot: 3, mask: 0b1000 },
                CellUpdate { lane: 12, slot: 3, mask: 0b1_0000 },
            ]
        );
    }

    #[test]
    fn identity_bounds() {
        let sel = |lsb, count, first_lane| LogicalSelector::Identity {
            slot: 0,
            lsb,
            count,
            first_lane,
        };
        assert_eq!(
            translate(&sel(6, 3, 0), 8),
            Err(ConfigError::IdentityBits { slot: 0, lsb: 6, count: 3 })
        );
        assert_eq!(
            translate(&sel(0, 8, 60), 8),
            Err(ConfigError::LaneIndex { lane: 67 })
        );
    }

    #[test]
    fn first_lane_near_usize_max_is_rejected() {
        let identity = LogicalSelector::Identity {
            slot: 0,
            lsb: 0,
            count: 1,
            first_lane: usize::MAX,
        };
        assert_eq!(
            translate(&identity, 8),
            Err(ConfigError::LaneIndex { lane: usize::MAX as u64 })
        );

        let crc = LogicalSelector::Crc {
            polynomial: 0x1021,
            width: 16,
            slots: vec![0, 1],
            first_lane: usize::MAX - 3,
        };
        assert_eq!(
            translate(&crc, 8),
            Err(ConfigError::LaneIndex { lane: (usize::MAX - 3) as u64 })
        );
    }

    #[test]
    fn crc_rejects_malformed_polynomials() {
        let sel = |polynomial, width| LogicalSelector::Crc {
            polynomial,
            width,
            slots: vec![0],
            first_lane: 0,
        };
        assert_eq!(translate(&sel(0x7, 0), 8), Err(ConfigError::CrcWidth { width: 0 }));
        assert_eq!(
            translate(&sel(0x1_0000, 16), 8),
            Err(ConfigError::CrcPolynomial { polynomial: 0x1_0000, width: 16 })
        );
        assert_eq!(
            translate(&sel(0, 16), 8),
            Err(ConfigError::CrcPolynomial { polynomial: 0, width: 16 })
        );
    }

    #[test]
    fn crc_last_bit_contributes_polynomial() {
        // The final message bit (bit 0 of the last slot) maps onto the
        // polynomial itself.
        let updates = translate(
            &LogicalSelector::Crc {
                polynomial: 0x07,
                width: 8,
                slots: vec![0],
                first_lane: 0,
            },
            8,
        )
        .unwrap();
        let lanes_with_bit0: Vec<usize> = updates
            .iter()
            .filter(|u| u.mask & 1 == 1)
            .map(|u| u.lane)
            .collect();
        assert_eq!(lanes_with_bit0, vec![0, 1, 2]);
    }
}
