//! Configuration Sweep
//!
//! Expands algorithmic variants, sort policies, and the thread schedule
//! into the ordered list of configurations the executor will try:
//! variants outermost, sort policies next, thread slots innermost, the
//! same nesting the original benchmark loops used. Configurations are
//! immutable once built.

use crate::schedule::ThreadSlot;
use graphmark_core::EngineMode;

/// One point of the sweep: how a single set of trials is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration<V, S> {
    /// Thread slot from the schedule.
    pub threads: ThreadSlot,
    /// Compute device implied by the slot.
    pub mode: EngineMode,
    /// Algorithmic variant under test.
    pub variant: V,
    /// Pre-processing sort policy.
    pub sort: S,
}

impl<V: std::fmt::Display, S: std::fmt::Display> std::fmt::Display for Configuration<V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.variant, self.sort)
    }
}

/// Build the full cross-product sweep.
///
/// A [`ThreadSlot::Fixed`] entry runs on the host; an
/// [`ThreadSlot::AcceleratorManaged`] entry runs on the accelerator.
pub fn build_sweep<V: Clone, S: Clone>(
    variants: &[V],
    sorts: &[S],
    schedule: &[ThreadSlot],
) -> Vec<Configuration<V, S>> {
    let mut sweep = Vec::with_capacity(variants.len() * sorts.len() * schedule.len());
    for variant in variants {
        for sort in sorts {
            for &threads in schedule {
                let mode = match threads {
                    ThreadSlot::Fixed(_) => EngineMode::Host,
                    ThreadSlot::AcceleratorManaged => EngineMode::Accelerator,
                };
                sweep.push(Configuration {
                    threads,
                    mode,
                    variant: variant.clone(),
                    sort: sort.clone(),
                });
            }
        }
    }
    sweep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_product_order_and_modes() {
        let schedule = [ThreadSlot::Fixed(2), ThreadSlot::AcceleratorManaged];
        let sweep = build_sweep(&["a", "b"], &["x"], &schedule);
        assert_eq!(sweep.len(), 4);

        assert_eq!(sweep[0].variant, "a");
        assert_eq!(sweep[0].threads, ThreadSlot::Fixed(2));
        assert_eq!(sweep[0].mode, EngineMode::Host);

        assert_eq!(sweep[1].variant, "a");
        assert_eq!(sweep[1].mode, EngineMode::Accelerator);

        assert_eq!(sweep[2].variant, "b");
        assert_eq!(sweep[3].variant, "b");
    }

    #[test]
    fn empty_inputs_give_empty_sweep() {
        let sweep: Vec<Configuration<&str, &str>> = build_sweep(&[], &["x"], &[]);
        assert!(sweep.is_empty());
    }
}
