//! Public Evaluation API
//!
//! One evaluation runs crossbar, seed, matrix and groups exactly once; every
//! output view is then a slice of that single result.

use crate::types::{GroupBits, InputVector, Lanes, GROUP_COUNT, LANE_COUNT};
use crate::unit::output::{self, HashValue, OutputView};
use crate::{HashUnitConfig, PacketHeaderView};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// =============================================================================
// RESULT
// =============================================================================

/// Raw result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Evaluation {
    lanes: Lanes,
    groups: GroupBits,
}

impl Evaluation {
    /// Evaluation result from raw lanes, reducing them through `config`'s groups.
    #[must_use]
    pub fn from_lanes(config: &HashUnitConfig, lanes: Lanes) -> Self {
        Self {
            lanes,
            groups: config.groups().combine(lanes),
        }
    }

    /// All 64 lanes.
    #[must_use]
    pub const fn lanes(&self) -> Lanes {
        self.lanes
    }

    /// All 8 group bits.
    #[must_use]
    pub const fn groups(&self) -> GroupBits {
        self.groups
    }

    /// One lane; `false` past lane 63.
    #[must_use]
    pub const fn lane(&self, lane: usize) -> bool {
        lane < LANE_COUNT && (self.lanes >> lane) & 1 == 1
    }

    /// One group bit; `false` past group 7.
    #[must_use]
    pub const fn group(&self, group: usize) -> bool {
        group < GROUP_COUNT && (self.groups >> group) & 1 == 1
    }

    /// Slice this result through an arbitrary view.
    ///
    /// The view should have passed [`OutputView::validate`].
    #[must_use]
    pub fn select(&self, view: &OutputView) -> HashValue {
        output::select(self.lanes, self.groups, view)
    }

    /// Value of configured view `index`.
    #[must_use]
    pub fn view(&self, config: &HashUnitConfig, index: usize) -> Option<HashValue> {
        config.outputs().views().get(index).map(|v| self.select(v))
    }

    /// Value of the configured view called `name`.
    #[must_use]
    pub fn named(&self, config: &HashUnitConfig, name: &str) -> Option<HashValue> {
        config
            .outputs()
            .position(name)
            .and_then(|i| self.view(config, i))
    }

    /// Every configured view, configuration order.
    #[must_use]
    pub fn views(&self, config: &HashUnitConfig) -> Vec<HashValue> {
        config.outputs().select_all(self.lanes, self.groups)
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Evaluate one packet.
#[must_use]
pub fn evaluate<P: PacketHeaderView + ?Sized>(config: &HashUnitConfig, phv: &P) -> Evaluation {
    let resolved = config.crossbar().resolve(phv);
    let premixed = config.seeds().premix(&resolved);
    Evaluation::from_lanes(config, (config.kernel_fn())(config.matrix(), &premixed))
}

/// Linear part only: `M·x` for an explicit slot vector, no crossbar, no seed.
#[must_use]
pub fn hash_lanes(config: &HashUnitConfig, input: &InputVector) -> Lanes {
    (config.kernel_fn())(config.matrix(), input)
}

/// Constant part only: `M·seed`, the lanes of an all-zero packet.
#[must_use]
pub fn seed_lanes(config: &HashUnitConfig) -> Lanes {
    hash_lanes(config, &config.seeds().as_input())
}
