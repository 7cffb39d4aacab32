//! Shared types used across the hashgen library.

use core::fmt;
use static_assertions::const_assert;
#[cfg(feature = "std")]
use std::error;

// =============================================================================
// UNIT GEOMETRY
// =============================================================================

/// Number of hash-input slots fed by the input crossbar.
pub const SLOT_COUNT: usize = 52;

/// Number of raw output lanes produced by the hash matrix.
pub const LANE_COUNT: usize = 64;

/// Number of parity groups the combiner can reduce lanes into.
pub const GROUP_COUNT: usize = 8;

/// Widest slot word the unit can be configured for.
pub const MAX_WORD_WIDTH: u32 = 32;

/// One resolved slot value.
pub type Word = u32;

/// The 64 raw output lanes, bit `r` holding lane `r`.
pub type Lanes = u64;

/// The 8 group-parity bits, bit `g` holding group `g`.
pub type GroupBits = u8;

const_assert!(LANE_COUNT == Lanes::BITS as usize);
const_assert!(GROUP_COUNT == GroupBits::BITS as usize);
const_assert!(MAX_WORD_WIDTH == Word::BITS);

/// Mask covering the low `width` bits of a slot word.
#[must_use]
pub const fn word_mask(width: u32) -> Word {
    if width >= Word::BITS {
        Word::MAX
    } else {
        (1 << width) - 1
    }
}

/// Mask covering the low `width` bits of a 64-bit value.
#[must_use]
pub const fn low_mask(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1 << width) - 1
    }
}

// =============================================================================
// KERNEL INTERFACE
// =============================================================================

/// Unified matrix kernel signature: `(matrix, premixed input) -> lanes`.
///
/// Every kernel computes the same GF(2) product so the dispatcher can swap
/// them freely.
pub type KernelFn = fn(&crate::unit::matrix::HashMatrix, &InputVector) -> Lanes;

/// Matrix evaluation strategy recorded in a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum KernelKind {
    /// XOR of precomputed bit columns, one per set input bit.
    #[default]
    Columnar,
    /// Row-by-row masked parity, straight from the definition.
    Reference,
}

// =============================================================================
// PHV CONTAINERS
// =============================================================================

/// Identifier of one packet header vector container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ContainerRef(pub u16);

impl ContainerRef {
    /// Container position inside the header vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phv[{}]", self.0)
    }
}

// =============================================================================
// INPUT VECTOR
// =============================================================================

/// The 52 slot words fed into the matrix for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputVector([Word; SLOT_COUNT]);

impl InputVector {
    /// The all-zero vector.
    pub const ZERO: Self = Self([0; SLOT_COUNT]);

    /// Wrap a full set of slot words.
    #[must_use]
    pub const fn from_words(words: [Word; SLOT_COUNT]) -> Self {
        Self(words)
    }

    /// Slot words in slot order.
    #[must_use]
    pub const fn words(&self) -> &[Word; SLOT_COUNT] {
        &self.0
    }

    /// Word of one slot, `None` past the last slot.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<Word> {
        self.0.get(slot).copied()
    }

    /// Overwrite one slot word. Indices past the last slot are ignored.
    pub fn set(&mut self, slot: usize, word: Word) {
        if let Some(w) = self.0.get_mut(slot) {
            *w = word;
        }
    }

    /// Elementwise XOR.
    #[must_use]
    pub fn xor(&self, other: &Self) -> Self {
        let mut out = *self;
        for (w, o) in out.0.iter_mut().zip(other.0.iter()) {
            *w ^= o;
        }
        out
    }

    /// True when every slot word is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }
}

impl Default for InputVector {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Rejected configuration intent.
///
/// Raised only while a configuration is being built; evaluation itself never
/// fails. Every variant names the slot, lane, group or view at fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Slot word width outside `1..=32`.
    WordWidth {
        /// Requested width.
        width: u64,
    },
    /// Slot index `>= 52`.
    SlotIndex {
        /// Requested slot.
        slot: u64,
    },
    /// Lane index `>= 64`.
    LaneIndex {
        /// Requested lane.
        lane: u64,
    },
    /// Parity group index `>= 8`.
    GroupIndex {
        /// Requested group.
        group: u64,
    },
    /// Slot source names a container the header vector does not have.
    ContainerIndex {
        /// Slot being sourced.
        slot: usize,
        /// Requested container.
        container: u64,
        /// Containers declared for the header vector.
        available: usize,
    },
    /// Two different containers assigned to one slot.
    SlotConflict {
        /// Slot being sourced.
        slot: usize,
        /// Source assigned first.
        first: ContainerRef,
        /// Conflicting later source.
        second: ContainerRef,
    },
    /// Slot enabled with no source container.
    EnabledWithoutSource {
        /// Offending slot.
        slot: usize,
    },
    /// Matrix cell selects bits above the slot word width.
    MaskTooWide {
        /// Output lane of the cell.
        lane: usize,
        /// Input slot of the cell.
        slot: usize,
        /// Requested mask.
        mask: u64,
        /// Configured slot word width.
        width: u32,
    },
    /// Seed value has bits above the slot word width or above 8 bits.
    SeedTooWide {
        /// Seeded slot.
        slot: usize,
        /// Requested seed.
        seed: u64,
        /// Configured slot word width.
        width: u32,
    },
    /// Seed table longer than the slot count.
    SeedTableLength {
        /// Supplied length.
        len: usize,
    },
    /// Output slice reads past its source, or has zero width.
    SliceOutOfRange {
        /// Output view index.
        view: usize,
        /// Slice index inside the view.
        slice: usize,
    },
    /// Output view wider than 64 bits.
    ViewTooWide {
        /// Output view index.
        view: usize,
        /// Summed slice width.
        width: u32,
    },
    /// Output view without any slice.
    EmptyView {
        /// Output view index.
        view: usize,
    },
    /// CRC selector width outside `1..=64`.
    CrcWidth {
        /// Requested width.
        width: u32,
    },
    /// CRC polynomial zero or wider than the CRC.
    CrcPolynomial {
        /// Requested polynomial.
        polynomial: u64,
        /// CRC width.
        width: u32,
    },
    /// Identity selector bit range outside the slot word.
    IdentityBits {
        /// Source slot.
        slot: usize,
        /// First routed bit.
        lsb: u32,
        /// Number of routed bits.
        count: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::WordWidth { width } => {
                write!(f, "slot word width {width} outside 1..={MAX_WORD_WIDTH}")
            }
            Self::SlotIndex { slot } => {
                write!(f, "slot {slot} out of range (unit has {SLOT_COUNT} slots)")
            }
            Self::LaneIndex { lane } => {
                write!(f, "lane {lane} out of range (unit has {LANE_COUNT} lanes)")
            }
            Self::GroupIndex { group } => {
                write!(f, "parity group {group} out of range (unit has {GROUP_COUNT} groups)")
            }
            Self::ContainerIndex {
                slot,
                container,
                available,
            } => write!(
                f,
                "slot {slot}: container {container} does not exist ({available} containers)"
            ),
            Self::SlotConflict {
                slot,
                first,
                second,
            } => write!(f, "slot {slot}: sourced from both {first} and {second}"),
            Self::EnabledWithoutSource { slot } => {
                write!(f, "slot {slot}: enabled without a source container")
            }
            Self::MaskTooWide {
                lane,
                slot,
                mask,
                width,
            } => write!(
                f,
                "cell [lane {lane}, slot {slot}]: mask {mask:#x} wider than {width}-bit word"
            ),
            Self::SeedTooWide { slot, seed, width } => write!(
                f,
                "slot {slot}: seed {seed:#x} does not fit an 8-bit seed in a {width}-bit word"
            ),
            Self::SeedTableLength { len } => {
                write!(f, "seed table has {len} entries (unit has {SLOT_COUNT} slots)")
            }
            Self::SliceOutOfRange { view, slice } => {
                write!(f, "output view {view}: slice {slice} out of range")
            }
            Self::ViewTooWide { view, width } => {
                write!(f, "output view {view}: {width} bits exceeds 64")
            }
            Self::EmptyView { view } => write!(f, "output view {view}: no slices"),
            Self::CrcWidth { width } => write!(f, "CRC width {width} outside 1..=64"),
            Self::CrcPolynomial { polynomial, width } => {
                write!(f, "CRC polynomial {polynomial:#x} invalid for width {width}")
            }
            Self::IdentityBits { slot, lsb, count } => write!(
                f,
                "slot {slot}: identity bits {lsb}..{} outside the slot word",
                u64::from(lsb) + u64::from(count)
            ),
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for ConfigError {}
