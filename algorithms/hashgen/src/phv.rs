//! Packet Header Vector
//!
//! Read-only access to the per-packet containers the input crossbar selects from.

use crate::types::ContainerRef;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

// =============================================================================
// VIEW INTERFACE
// =============================================================================

/// Read-only view over the containers of one packet.
///
/// Reads must be O(1) and stable for the duration of one evaluation. Reads
/// past the end of the view yield zero, so resolution never fails.
pub trait PacketHeaderView {
    /// Raw value of one container.
    fn read(&self, container: ContainerRef) -> u32;
}

impl<T: PacketHeaderView + ?Sized> PacketHeaderView for &T {
    #[inline]
    fn read(&self, container: ContainerRef) -> u32 {
        (**self).read(container)
    }
}

impl PacketHeaderView for [u32] {
    #[inline]
    fn read(&self, container: ContainerRef) -> u32 {
        self.get(container.index()).copied().unwrap_or(0)
    }
}

// =============================================================================
// OWNED BUFFER
// =============================================================================

/// Owned, fixed-size header vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PhvBuffer {
    values: Vec<u32>,
}

impl PhvBuffer {
    /// All-zero header vector with `count` containers.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            values: vec![0; count],
        }
    }

    /// Header vector holding `values`, container `i` = `values[i]`.
    #[must_use]
    pub const fn from_values(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// Write one container. Returns `false` if the container does not exist.
    pub fn set(&mut self, container: ContainerRef, value: u32) -> bool {
        self.values.get_mut(container.index()).is_some_and(|slot| {
            *slot = value;
            true
        })
    }

    /// Container values in index order.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Containerwise XOR of two header vectors (shorter one zero-extended).
    #[must_use]
    pub fn xor(&self, other: &Self) -> Self {
        let len = self.values.len().max(other.values.len());
        let values = (0..len)
            .map(|i| {
                self.values.get(i).copied().unwrap_or(0) ^ other.values.get(i).copied().unwrap_or(0)
            })
            .collect();
        Self { values }
    }
}

impl PacketHeaderView for PhvBuffer {
    #[inline]
    fn read(&self, container: ContainerRef) -> u32 {
        self.values.as_slice().read(container)
    }
}

impl From<Vec<u32>> for PhvBuffer {
    fn from(values: Vec<u32>) -> Self {
        Self::from_values(values)
    }
}
