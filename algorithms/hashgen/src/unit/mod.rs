//! Hardware Blocks
//!
//! The five stages of the hash generation unit, leaf to root:
//! crossbar → seed pre-mix → matrix → parity groups → output selection.

pub mod crossbar;
pub mod matrix;
pub mod output;
pub mod parity;
pub mod seed;

pub use crossbar::{HashSlot, InputCrossbar};
pub use matrix::HashMatrix;
pub use output::{BitSlice, Consumer, HashValue, OutputSelector, OutputView, SliceSource};
pub use parity::ParityGroupCombiner;
pub use seed::SeedTable;
