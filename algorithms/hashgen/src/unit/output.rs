//! Output Selector
//!
//! Slices the raw lanes and group bits into the values each downstream
//! consumer sees. Views are pure functions of one evaluation, so any number
//! of consumers can read the same lanes without re-running the matrix.

use crate::types::{low_mask, ConfigError, GroupBits, Lanes, GROUP_COUNT, LANE_COUNT};
use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

// =============================================================================
// VIEW DESCRIPTION
// =============================================================================

/// Where a slice reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SliceSource {
    /// The 64 raw matrix lanes.
    Lanes,
    /// The 8 group-parity bits.
    Groups,
}

impl SliceSource {
    const fn len(self) -> u32 {
        match self {
            Self::Lanes => LANE_COUNT as u32,
            Self::Groups => GROUP_COUNT as u32,
        }
    }
}

/// `width` consecutive bits of a source, starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitSlice {
    /// Source bits.
    pub source: SliceSource,
    /// First source bit.
    pub offset: u32,
    /// Number of bits.
    pub width: u32,
}

/// Downstream client of a hash value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Consumer {
    /// Match-table address generation.
    TableAddress,
    /// ECMP/LAG-style path selection.
    PathSelect,
    /// Action-data seed derivation.
    ActionSeed,
    /// Any other client, tagged by the stage.
    Custom(u8),
}

impl fmt::Display for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableAddress => f.write_str("table-address"),
            Self::PathSelect => f.write_str("path-select"),
            Self::ActionSeed => f.write_str("action-seed"),
            Self::Custom(tag) => write!(f, "custom-{tag}"),
        }
    }
}

/// One consumer-facing hash value: slices concatenated, first slice lowest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputView {
    /// Label used in logs and dumps.
    pub name: String,
    /// Who reads the value.
    pub consumer: Consumer,
    /// Slices, least significant first.
    pub slices: Vec<BitSlice>,
}

impl OutputView {
    /// View with no slices yet.
    #[must_use]
    pub fn new(name: impl Into<String>, consumer: Consumer) -> Self {
        Self {
            name: name.into(),
            consumer,
            slices: Vec::new(),
        }
    }

    /// Append a slice of raw lanes.
    #[must_use]
    pub fn lanes(mut self, offset: u32, width: u32) -> Self {
        self.slices.push(BitSlice {
            source: SliceSource::Lanes,
            offset,
            width,
        });
        self
    }

    /// Append a slice of group bits.
    #[must_use]
    pub fn groups(mut self, offset: u32, width: u32) -> Self {
        self.slices.push(BitSlice {
            source: SliceSource::Groups,
            offset,
            width,
        });
        self
    }

    /// Total width in bits.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.slices.iter().map(|s| s.width).sum()
    }

    /// Check slice bounds and total width.
    ///
    /// # Errors
    /// `EmptyView`, `SliceOutOfRange` or `ViewTooWide`.
    pub fn validate(&self, view: usize) -> Result<(), ConfigError> {
        if self.slices.is_empty() {
            return Err(ConfigError::EmptyView { view });
        }
        let mut total: u32 = 0;
        for (slice, s) in self.slices.iter().enumerate() {
            let fits = s
                .offset
                .checked_add(s.width)
                .is_some_and(|end| end <= s.source.len());
            if s.width == 0 || !fits {
                return Err(ConfigError::SliceOutOfRange { view, slice });
            }
            total = total.saturating_add(s.width);
        }
        if total > u64::BITS {
            return Err(ConfigError::ViewTooWide { view, width: total });
        }
        Ok(())
    }
}

// =============================================================================
// VALUES
// =============================================================================

/// A hash value of fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashValue {
    /// Value bits; nothing above `width` is set.
    pub value: u64,
    /// Width in bits.
    pub width: u32,
}

impl HashValue {
    /// Bit `i` of the value.
    #[must_use]
    pub const fn bit(&self, i: u32) -> bool {
        i < self.width && (self.value >> i) & 1 == 1
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.width.div_ceil(4).max(1) as usize;
        write!(f, "{:#0w$x}", self.value, w = digits + 2)
    }
}

/// Extract one view from an evaluation's lanes and group bits.
///
/// Total for any view: bits past the source read as zero and nothing is
/// kept above bit 63. A view that passed [`OutputView::validate`] never hits
/// either limit.
#[must_use]
pub fn select(lanes: Lanes, groups: GroupBits, view: &OutputView) -> HashValue {
    let mut value = 0u64;
    let mut shift = 0u32;
    for s in &view.slices {
        if shift < u64::BITS {
            let source = match s.source {
                SliceSource::Lanes => lanes,
                SliceSource::Groups => u64::from(groups),
            };
            let bits = source.checked_shr(s.offset).unwrap_or(0) & low_mask(s.width);
            value |= bits.checked_shl(shift).unwrap_or(0);
        }
        shift = shift.saturating_add(s.width);
    }
    HashValue {
        value,
        width: shift,
    }
}

// =============================================================================
// SELECTOR
// =============================================================================

/// The validated set of output views of one stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputSelector {
    views: Vec<OutputView>,
}

impl OutputSelector {
    /// Validate every view.
    ///
    /// # Errors
    /// The first view error, tagged with its index.
    pub fn new(views: Vec<OutputView>) -> Result<Self, ConfigError> {
        for (i, view) in views.iter().enumerate() {
            view.validate(i)?;
        }
        Ok(Self { views })
    }

    /// Views in configuration order.
    #[must_use]
    pub fn views(&self) -> &[OutputView] {
        &self.views
    }

    /// Index of the first view named `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.views.iter().position(|v| v.name == name)
    }

    /// Every view's value for one evaluation, configuration order.
    #[must_use]
    pub fn select_all(&self, lanes: Lanes, groups: GroupBits) -> Vec<HashValue> {
        self.views.iter().map(|v| select(lanes, groups, v)).collect()
    }
}
