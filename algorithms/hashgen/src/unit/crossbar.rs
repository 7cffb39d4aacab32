//! Input Crossbar
//!
//! Routes one header-vector container into each of the 52 hash-input slots.

use crate::phv::PacketHeaderView;
use crate::types::{word_mask, ConfigError, ContainerRef, InputVector, Word, SLOT_COUNT};

// =============================================================================
// SLOT
// =============================================================================

/// Source selection for one hash-input slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HashSlot {
    /// Container feeding this slot.
    pub source: Option<ContainerRef>,
    /// Disabled slots contribute the all-zero word.
    pub enabled: bool,
}

impl HashSlot {
    /// Enabled slot reading `container`.
    #[must_use]
    pub const fn sourced(container: ContainerRef) -> Self {
        Self {
            source: Some(container),
            enabled: true,
        }
    }

    /// Source read by evaluation, `None` when disabled.
    #[must_use]
    pub const fn active_source(&self) -> Option<ContainerRef> {
        if self.enabled {
            self.source
        } else {
            None
        }
    }
}

// =============================================================================
// CROSSBAR
// =============================================================================

/// Validated slot-to-container routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputCrossbar {
    slots: [HashSlot; SLOT_COUNT],
    word_mask: Word,
}

impl InputCrossbar {
    /// Check slot routing against a header vector of `container_count` containers.
    ///
    /// Every configured source is checked, enabled or not.
    ///
    /// # Errors
    /// `ContainerIndex` for a source past the header vector,
    /// `EnabledWithoutSource` for an enabled slot with nothing to read.
    pub fn new(
        slots: [HashSlot; SLOT_COUNT],
        word_width: u32,
        container_count: usize,
    ) -> Result<Self, ConfigError> {
        for (slot, cfg) in slots.iter().enumerate() {
            match cfg.source {
                Some(container) if container.index() >= container_count => {
                    return Err(ConfigError::ContainerIndex {
                        slot,
                        container: u64::from(container.0),
                        available: container_count,
                    });
                }
                None if cfg.enabled => return Err(ConfigError::EnabledWithoutSource { slot }),
                _ => {}
            }
        }

        Ok(Self {
            slots,
            word_mask: word_mask(word_width),
        })
    }

    /// All 52 slots in slot order.
    #[must_use]
    pub const fn slots(&self) -> &[HashSlot; SLOT_COUNT] {
        &self.slots
    }

    /// Number of enabled slots.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.enabled).count()
    }

    /// Resolve the 52 slot words for one packet.
    ///
    /// Container values are truncated to the slot word width.
    #[must_use]
    pub fn resolve<P: PacketHeaderView + ?Sized>(&self, phv: &P) -> InputVector {
        let mut words = [0; SLOT_COUNT];
        for (word, slot) in words.iter_mut().zip(self.slots.iter()) {
            if let Some(container) = slot.active_source() {
                *word = phv.read(container) & self.word_mask;
            }
        }
        InputVector::from_words(words)
    }
}
