//! Hash Unit Configuration
//!
//! Register-level intent is collected in a [`HashUnitConfigBuilder`] and
//! validated in one pass by [`HashUnitConfigBuilder::build`]. The result is
//! an immutable [`HashUnitConfig`]; there is no partially applied state.

#[cfg(feature = "serde")]
pub mod loader;
pub mod translate;

use crate::engine::dispatcher;
use crate::types::{
    ConfigError, ContainerRef, KernelFn, KernelKind, Lanes, MAX_WORD_WIDTH, SLOT_COUNT,
};
use crate::unit::{
    HashMatrix, HashSlot, InputCrossbar, OutputSelector, OutputView, ParityGroupCombiner,
    SeedTable,
};
use translate::{translate, LogicalSelector};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// =============================================================================
// VALIDATED CONFIGURATION
// =============================================================================

/// Complete, validated configuration of one hash unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashUnitConfig {
    container_count: usize,
    crossbar: InputCrossbar,
    seeds: SeedTable,
    matrix: HashMatrix,
    groups: ParityGroupCombiner,
    outputs: OutputSelector,
    kernel: KernelKind,
}

impl HashUnitConfig {
    /// Start a configuration for slot words of `word_width` bits read from a
    /// header vector of `container_count` containers.
    #[must_use]
    pub fn builder(word_width: u32, container_count: usize) -> HashUnitConfigBuilder {
        HashUnitConfigBuilder::new(word_width, container_count)
    }

    /// Slot word width.
    #[must_use]
    pub const fn word_width(&self) -> u32 {
        self.matrix.word_width()
    }

    /// Containers in the header vector layout.
    #[must_use]
    pub const fn container_count(&self) -> usize {
        self.container_count
    }

    /// Slot routing.
    #[must_use]
    pub const fn crossbar(&self) -> &InputCrossbar {
        &self.crossbar
    }

    /// Seed table.
    #[must_use]
    pub const fn seeds(&self) -> &SeedTable {
        &self.seeds
    }

    /// Matrix cells.
    #[must_use]
    pub const fn matrix(&self) -> &HashMatrix {
        &self.matrix
    }

    /// Parity groups.
    #[must_use]
    pub const fn groups(&self) -> &ParityGroupCombiner {
        &self.groups
    }

    /// Output views.
    #[must_use]
    pub const fn outputs(&self) -> &OutputSelector {
        &self.outputs
    }

    /// Kernel used for matrix evaluation.
    #[must_use]
    pub const fn kernel(&self) -> KernelKind {
        self.kernel
    }

    pub(crate) const fn kernel_fn(&self) -> KernelFn {
        dispatcher::kernel_for(self.kernel)
    }
}

// =============================================================================
// BUILDER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotAssignment {
    slot: usize,
    source: Option<ContainerRef>,
    enabled: bool,
}

/// Accumulates configuration intent; nothing is checked until [`build`].
///
/// [`build`]: HashUnitConfigBuilder::build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashUnitConfigBuilder {
    word_width: u32,
    container_count: usize,
    assignments: Vec<SlotAssignment>,
    seeds: Vec<(usize, u64)>,
    seed_table_len: usize,
    selectors: Vec<LogicalSelector>,
    groups: Vec<(usize, Lanes)>,
    views: Vec<OutputView>,
    kernel: KernelKind,
}

impl HashUnitConfigBuilder {
    /// Empty configuration: every slot disabled, zero seed, zero matrix.
    #[must_use]
    pub const fn new(word_width: u32, container_count: usize) -> Self {
        Self {
            word_width,
            container_count,
            assignments: Vec::new(),
            seeds: Vec::new(),
            seed_table_len: 0,
            selectors: Vec::new(),
            groups: Vec::new(),
            views: Vec::new(),
            kernel: KernelKind::Columnar,
        }
    }

    /// Feed `slot` from `container` and enable it.
    #[must_use]
    pub fn source(self, slot: usize, container: ContainerRef) -> Self {
        self.assign(slot, Some(container), true)
    }

    /// Disable `slot`, keeping any source already assigned.
    #[must_use]
    pub fn disable(self, slot: usize) -> Self {
        self.assign(slot, None, false)
    }

    /// Raw slot assignment. A `None` source keeps the current one.
    #[must_use]
    pub fn assign(mut self, slot: usize, source: Option<ContainerRef>, enabled: bool) -> Self {
        self.assignments.push(SlotAssignment {
            slot,
            source,
            enabled,
        });
        self
    }

    /// Seed value of one slot.
    #[must_use]
    pub fn seed(mut self, slot: usize, value: u64) -> Self {
        self.seeds.push((slot, value));
        self
    }

    /// Seed table, slot `i` = `table[i]`.
    #[must_use]
    pub fn seeds(mut self, table: &[u8]) -> Self {
        self.seed_table_len = self.seed_table_len.max(table.len());
        self.seeds.extend(
            table
                .iter()
                .take(SLOT_COUNT)
                .enumerate()
                .map(|(slot, &b)| (slot, u64::from(b))),
        );
        self
    }

    /// Literal matrix cell write.
    #[must_use]
    pub fn cell(self, lane: usize, slot: usize, mask: u64) -> Self {
        self.selector(LogicalSelector::Cell { lane, slot, mask })
    }

    /// Logical matrix intent; selectors apply in order, later writes win.
    #[must_use]
    pub fn selector(mut self, selector: LogicalSelector) -> Self {
        self.selectors.push(selector);
        self
    }

    /// Member lanes of a parity group.
    #[must_use]
    pub fn group(mut self, group: usize, lanes: Lanes) -> Self {
        self.groups.push((group, lanes));
        self
    }

    /// Add an output view.
    #[must_use]
    pub fn view(mut self, view: OutputView) -> Self {
        self.views.push(view);
        self
    }

    /// Matrix kernel.
    #[must_use]
    pub const fn kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Validate everything and produce the configuration.
    ///
    /// Checks run in a fixed order (word width, slots, seeds, matrix,
    /// groups, views) and the first violation is returned.
    ///
    /// # Errors
    /// Any [`ConfigError`]; nothing is clamped or truncated.
    pub fn build(&self) -> Result<HashUnitConfig, ConfigError> {
        if self.word_width == 0 || self.word_width > MAX_WORD_WIDTH {
            return Err(ConfigError::WordWidth {
                width: u64::from(self.word_width),
            });
        }

        let crossbar = InputCrossbar::new(
            self.resolve_slots()?,
            self.word_width,
            self.container_count,
        )?;
        let seeds = SeedTable::new(self.resolve_seeds()?, self.word_width)?;

        let mut matrix = HashMatrix::new(self.word_width)?;
        for selector in &self.selectors {
            for update in translate(selector, self.word_width)? {
                matrix.set_cell(update.lane, update.slot, update.mask)?;
            }
        }

        let mut groups = ParityGroupCombiner::default();
        for &(group, lanes) in &self.groups {
            groups.set_group(group, lanes)?;
        }

        let outputs = OutputSelector::new(self.views.clone())?;

        let enabled_slots = crossbar.enabled_count();
        if enabled_slots == 0 {
            tracing::warn!("no hash input slot enabled; output depends on the seed only");
        }
        tracing::debug!(
            word_width = self.word_width,
            enabled_slots,
            cells = matrix.nonzero_cells().count(),
            groups = self.groups.len(),
            views = outputs.views().len(),
            kernel = dispatcher::kernel_name(self.kernel),
            "hash unit configuration built"
        );

        Ok(HashUnitConfig {
            container_count: self.container_count,
            crossbar,
            seeds,
            matrix,
            groups,
            outputs,
            kernel: self.kernel,
        })
    }

    fn resolve_slots(&self) -> Result<[HashSlot; SLOT_COUNT], ConfigError> {
        let mut slots = [HashSlot::default(); SLOT_COUNT];
        for a in &self.assignments {
            let current = slots.get_mut(a.slot).ok_or(ConfigError::SlotIndex {
                slot: a.slot as u64,
            })?;
            match (current.source, a.source) {
                (Some(first), Some(second)) if first != second => {
                    return Err(ConfigError::SlotConflict {
                        slot: a.slot,
                        first,
                        second,
                    });
                }
                (_, Some(source)) => current.source = Some(source),
                (_, None) => {}
            }
            current.enabled = a.enabled;
        }
        Ok(slots)
    }

    fn resolve_seeds(&self) -> Result<[u8; SLOT_COUNT], ConfigError> {
        if self.seed_table_len > SLOT_COUNT {
            return Err(ConfigError::SeedTableLength {
                len: self.seed_table_len,
            });
        }
        let mut table = [0u8; SLOT_COUNT];
        for &(slot, value) in &self.seeds {
            let entry = table.get_mut(slot).ok_or(ConfigError::SlotIndex {
                slot: slot as u64,
            })?;
            *entry = u8::try_from(value).map_err(|_| ConfigError::SeedTooWide {
                slot,
                seed: value,
                width: self.word_width,
            })?;
        }
        Ok(table)
    }
}
