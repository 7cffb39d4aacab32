#![cfg_attr(not(feature = "std"), no_std)]

//! # Hashgen
//!
//! Behavioral model of the programmable hash generation unit of a
//! match-action pipeline stage: an affine GF(2) function
//! `hash = M·(x ⊕ seed)` over 52 crossbar-selected input slots, producing 64
//! lanes, 8 parity-group bits and any number of sliced output views.

//! # Usage
//! ```rust
//! use hashgen::{ContainerRef, Consumer, HashUnitConfig, OutputView, PhvBuffer};
//!
//! // 1. Configure: slot 0 reads container 2, lane 0 = bit 0 of slot 0.
//! let config = HashUnitConfig::builder(16, 4)
//!     .source(0, ContainerRef(2))
//!     .cell(0, 0, 0x1)
//!     .view(OutputView::new("ecmp", Consumer::PathSelect).lanes(0, 4))
//!     .build()?;
//!
//! // 2. Evaluate once per packet
//! let phv = PhvBuffer::from_values(vec![0, 0, 0x1, 0]);
//! let eval = hashgen::evaluate(&config, &phv);
//! assert!(eval.lane(0));
//!
//! // 3. Slice as many views as needed from the same evaluation
//! assert_eq!(eval.named(&config, "ecmp").map(|v| v.value), Some(1));
//! # Ok::<(), hashgen::ConfigError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
mod engine;
mod evaluate;
// Kernels are public for cross-checking and benchmarks, hidden from docs
#[doc(hidden)]
pub mod kernels;
mod phv;
#[cfg(feature = "std")]
mod stage;
pub(crate) mod types;
pub mod unit;

// =============================================================================
// EXPORTS
// =============================================================================

#[cfg(feature = "serde")]
pub use config::loader::{GroupSpec, HashUnitSpec, SlotSpec};
pub use config::translate::{translate, CellUpdate, LogicalSelector};
pub use config::{HashUnitConfig, HashUnitConfigBuilder};
pub use engine::parallel::evaluate_batch;
pub use evaluate::{evaluate, hash_lanes, seed_lanes, Evaluation};
pub use phv::{PacketHeaderView, PhvBuffer};
#[cfg(feature = "std")]
pub use stage::{ConfigSnapshot, HashStage};
pub use types::{
    low_mask, word_mask, ConfigError, ContainerRef, GroupBits, InputVector, KernelKind, Lanes,
    Word, GROUP_COUNT, LANE_COUNT, MAX_WORD_WIDTH, SLOT_COUNT,
};
pub use unit::{
    BitSlice, Consumer, HashMatrix, HashSlot, HashValue, OutputView, SliceSource,
};

/// Name of the matrix kernel a configuration evaluates with.
#[must_use]
pub fn active_kernel(config: &HashUnitConfig) -> &'static str {
    engine::kernel_name(config.kernel())
}
