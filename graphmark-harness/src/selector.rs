//! Best-Configuration Selection
//!
//! Tracks the minimum-average-time run seen so far. Strict less-than
//! comparison: the first configuration to reach a given minimum is kept
//! across ties.

use crate::executor::SweepRun;
use crate::sweep::Configuration;

/// The winning configuration and its timing.
#[derive(Debug, Clone, PartialEq)]
pub struct BestResult<V, S> {
    /// Configuration that achieved the minimum.
    pub configuration: Configuration<V, S>,
    /// Thread count it actually ran with.
    pub threads: u32,
    /// Its average trial time in seconds.
    pub average_seconds: f64,
}

/// Minimum-average tracker over executed runs.
#[derive(Debug, Default)]
pub struct BestSelector<V, S> {
    best: Option<BestResult<V, S>>,
}

impl<V: Clone, S: Clone> BestSelector<V, S> {
    /// Start with no configuration evaluated.
    pub fn new() -> Self {
        Self { best: None }
    }

    /// Offer a completed run for consideration.
    pub fn consider(&mut self, run: &SweepRun<V, S>) {
        let current = self
            .best
            .as_ref()
            .map(|b| b.average_seconds)
            .unwrap_or(f64::INFINITY);
        if run.average_seconds < current {
            self.best = Some(BestResult {
                configuration: run.configuration.clone(),
                threads: run.threads,
                average_seconds: run.average_seconds,
            });
        }
    }

    /// The best run so far; `None` means no configuration evaluated.
    pub fn best(&self) -> Option<&BestResult<V, S>> {
        self.best.as_ref()
    }

    /// Consume the selector and return the winner.
    pub fn into_best(self) -> Option<BestResult<V, S>> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ThreadSlot;
    use graphmark_core::EngineMode;

    fn run(tag: u32, average_seconds: f64) -> SweepRun<u32, &'static str> {
        SweepRun {
            configuration: Configuration {
                threads: ThreadSlot::Fixed(tag),
                mode: EngineMode::Host,
                variant: tag,
                sort: "none",
            },
            threads: tag,
            trials: Vec::new(),
            average_seconds,
        }
    }

    #[test]
    fn empty_selector_has_no_best() {
        let selector: BestSelector<u32, &str> = BestSelector::new();
        assert!(selector.best().is_none());
    }

    #[test]
    fn first_of_tied_minima_wins() {
        let mut selector = BestSelector::new();
        for (tag, avg) in [(1, 3.2), (2, 1.1), (3, 4.0), (4, 1.1)] {
            selector.consider(&run(tag, avg));
        }
        let best = selector.best().unwrap();
        assert_eq!(best.configuration.variant, 2);
        assert!((best.average_seconds - 1.1).abs() < 1e-12);
    }

    #[test]
    fn lower_average_replaces() {
        let mut selector = BestSelector::new();
        selector.consider(&run(1, 2.0));
        selector.consider(&run(2, 0.5));
        assert_eq!(selector.into_best().unwrap().configuration.variant, 2);
    }
}
