//! Batch Evaluation
//!
//! Evaluates many packets against one configuration snapshot. Packets are
//! independent, so with the `multithread` feature the batch is spread over
//! Rayon's pool; otherwise it runs serially. Output order always matches
//! input order.

use crate::evaluate::{evaluate, Evaluation};
use crate::phv::PacketHeaderView;
use crate::HashUnitConfig;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// =============================================================================
// BATCH ENGINE
// =============================================================================

/// Evaluate every header vector in `phvs` against `config`.
#[must_use]
pub fn evaluate_batch<P>(config: &HashUnitConfig, phvs: &[P]) -> Vec<Evaluation>
where
    P: PacketHeaderView + Sync,
{
    phvs.process_each(|phv| evaluate(config, phv))
}

/// Helper for feature-agnostic batch processing
trait BatchProcessor<T> {
    fn process_each<F, R>(self, f: F) -> Vec<R>
    where
        F: Fn(&T) -> R + Sync + Send,
        R: Send;
}

impl<T: Sync> BatchProcessor<T> for &[T] {
    fn process_each<F, R>(self, f: F) -> Vec<R>
    where
        F: Fn(&T) -> R + Sync + Send,
        R: Send,
    {
        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            self.par_iter().map(f).collect()
        }
        #[cfg(not(feature = "multithread"))]
        {
            self.iter().map(f).collect()
        }
    }
}
