//! Correctness Oracle
//!
//! Compares a candidate result against the trusted reference under an
//! absolute-error tolerance. Validation runs exactly once per session,
//! against the warmup run; subsequent trials are assumed correct so the
//! timing loop stays free of verification overhead.

use graphmark_core::KernelOutput;

/// Default absolute-error tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Outcome of a validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Maximum absolute error stayed below the tolerance.
    Pass,
    /// Candidate diverged from the reference.
    Fail {
        /// Largest element-wise absolute difference observed.
        max_abs_error: f64,
    },
}

impl Verdict {
    /// Whether the candidate was accepted.
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Validate `candidate` against `reference`.
///
/// Reduces the element-wise absolute difference to its maximum;
/// passes iff that maximum is strictly below `tolerance`. A shape
/// mismatch between the two results fails with an infinite error.
pub fn validate(reference: &KernelOutput, candidate: &KernelOutput, tolerance: f64) -> Verdict {
    let reference = reference.values();
    let candidate = candidate.values();

    if reference.len() != candidate.len() {
        return Verdict::Fail {
            max_abs_error: f64::INFINITY,
        };
    }

    let max_abs_error = reference
        .iter()
        .zip(candidate)
        .map(|(r, c)| (r - c).abs())
        .fold(0.0_f64, f64::max);

    if max_abs_error < tolerance {
        Verdict::Pass
    } else {
        Verdict::Fail { max_abs_error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_tolerance_passes() {
        let reference = KernelOutput::PerVertex(vec![1.0, 2.0]);
        let candidate = KernelOutput::PerVertex(vec![1.0, 2.0000005]);
        assert_eq!(
            validate(&reference, &candidate, DEFAULT_TOLERANCE),
            Verdict::Pass
        );
    }

    #[test]
    fn beyond_tolerance_fails_with_observed_error() {
        let reference = KernelOutput::PerVertex(vec![1.0, 2.0]);
        let candidate = KernelOutput::PerVertex(vec![1.0, 2.01]);
        match validate(&reference, &candidate, DEFAULT_TOLERANCE) {
            Verdict::Fail { max_abs_error } => assert!((max_abs_error - 0.01).abs() < 1e-12),
            Verdict::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn exact_tolerance_fails() {
        // strict less-than comparison
        let reference = KernelOutput::Scalar(0.0);
        let candidate = KernelOutput::Scalar(DEFAULT_TOLERANCE);
        assert!(!validate(&reference, &candidate, DEFAULT_TOLERANCE).passed());
    }

    #[test]
    fn scalar_comparison() {
        let reference = KernelOutput::Scalar(438804.0);
        assert!(validate(&reference, &KernelOutput::Scalar(438804.0), 1e-6).passed());
        assert!(!validate(&reference, &KernelOutput::Scalar(438805.0), 1e-6).passed());
    }

    #[test]
    fn shape_mismatch_fails_hard() {
        let reference = KernelOutput::PerVertex(vec![1.0, 2.0]);
        let candidate = KernelOutput::Scalar(1.0);
        assert_eq!(
            validate(&reference, &candidate, 1e-6),
            Verdict::Fail {
                max_abs_error: f64::INFINITY
            }
        );
    }
}
