//! Kernel Dispatcher
//!
//! Maps the kernel recorded in a configuration to its implementation.

use crate::kernels;
use crate::types::{KernelFn, KernelKind};

// =============================================================================
// DISPATCHER
// =============================================================================

/// Kernel implementing `kind`.
#[must_use]
pub const fn kernel_for(kind: KernelKind) -> KernelFn {
    match kind {
        KernelKind::Columnar => kernels::columnar::evaluate,
        KernelKind::Reference => kernels::reference::evaluate,
    }
}

/// Human-readable name of a kernel.
#[must_use]
pub const fn kernel_name(kind: KernelKind) -> &'static str {
    match kind {
        KernelKind::Columnar => "Columnar",
        KernelKind::Reference => "Reference",
    }
}
