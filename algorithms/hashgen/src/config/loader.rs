//! Configuration Loader
//!
//! Serializable description of a hash unit in plain integers. Values are kept
//! at full width (`u64`/`usize`) so out-of-range input reaches validation and
//! is rejected there instead of being narrowed on the way in.

use super::translate::LogicalSelector;
use super::{HashUnitConfig, HashUnitConfigBuilder};
use crate::types::{ConfigError, ContainerRef, KernelKind, Lanes};
use crate::unit::OutputView;
use serde::{Deserialize, Serialize};

/// One slot routing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotSpec {
    /// Slot index.
    pub slot: usize,
    /// Source container, if any.
    #[serde(default)]
    pub container: Option<u64>,
    /// Whether the slot feeds the matrix.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

const fn enabled_by_default() -> bool {
    true
}

/// One parity group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    /// Group index.
    pub group: usize,
    /// Member lanes, bit `r` = lane `r`.
    pub lanes: Lanes,
}

/// Whole-unit description as supplied at stage setup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashUnitSpec {
    /// Slot word width in bits.
    pub word_width: u64,
    /// Containers in the header vector layout.
    pub container_count: usize,
    /// Slot routing.
    #[serde(default)]
    pub slots: Vec<SlotSpec>,
    /// Seed table, slot `i` = `seeds[i]`.
    #[serde(default)]
    pub seeds: Vec<u64>,
    /// Matrix contents, applied in order.
    #[serde(default)]
    pub matrix: Vec<LogicalSelector>,
    /// Parity groups.
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
    /// Output views.
    #[serde(default)]
    pub outputs: Vec<OutputView>,
    /// Matrix kernel.
    #[serde(default)]
    pub kernel: KernelKind,
}

impl HashUnitSpec {
    /// Convert into a builder, rejecting values too wide for the builder's types.
    ///
    /// # Errors
    /// `WordWidth`, `ContainerIndex` or `SeedTableLength`.
    pub fn into_builder(self) -> Result<HashUnitConfigBuilder, ConfigError> {
        let word_width = u32::try_from(self.word_width)
            .map_err(|_| ConfigError::WordWidth {
                width: self.word_width,
            })?;

        if self.seeds.len() > crate::types::SLOT_COUNT {
            return Err(ConfigError::SeedTableLength {
                len: self.seeds.len(),
            });
        }

        let mut builder = HashUnitConfigBuilder::new(word_width, self.container_count)
            .kernel(self.kernel);

        for s in self.slots {
            let source = s
                .container
                .map(|c| {
                    u16::try_from(c)
                        .map(ContainerRef)
                        .map_err(|_| ConfigError::ContainerIndex {
                            slot: s.slot,
                            container: c,
                            available: self.container_count,
                        })
                })
                .transpose()?;
            builder = builder.assign(s.slot, source, s.enabled);
        }
        for (slot, seed) in self.seeds.into_iter().enumerate() {
            builder = builder.seed(slot, seed);
        }
        for selector in self.matrix {
            builder = builder.selector(selector);
        }
        for g in self.groups {
            builder = builder.group(g.group, g.lanes);
        }
        for view in self.outputs {
            builder = builder.view(view);
        }
        Ok(builder)
    }
}

impl TryFrom<HashUnitSpec> for HashUnitConfig {
    type Error = ConfigError;

    fn try_from(spec: HashUnitSpec) -> Result<Self, Self::Error> {
        spec.into_builder()?.build()
    }
}
