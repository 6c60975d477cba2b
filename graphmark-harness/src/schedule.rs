//! Thread Schedule Generation
//!
//! The sweep tries a descending sequence of thread counts. By default
//! the sequence starts at the engine's maximum parallelism and halves
//! until it would reach zero; an operator-supplied explicit list is
//! used verbatim instead.
//!
//! The original tooling overloaded a `0` entry with two meanings. Both
//! are preserved here, but named: a leading `0` in an explicit list
//! requests the auto-generated halving schedule, while a `0` anywhere
//! else becomes [`ThreadSlot::AcceleratorManaged`], delegating the
//! thread choice to the accelerator path.

use graphmark_core::EngineCapacity;

/// Default maximum schedule length.
pub const DEFAULT_MAX_SCHEDULE_LEN: usize = 7;

/// One entry of the thread schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadSlot {
    /// Run the kernel on the host with this many threads.
    Fixed(u32),
    /// Route to the accelerator; the engine picks its own fixed count.
    AcceleratorManaged,
}

impl std::fmt::Display for ThreadSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreadSlot::Fixed(n) => write!(f, "{}", n),
            ThreadSlot::AcceleratorManaged => write!(f, "gpu"),
        }
    }
}

/// Build the halving schedule from the engine capacity.
///
/// The first entry is `max_threads`; each subsequent entry is the
/// previous halved by integer division, truncated before the first
/// zero and capped at `max_len` entries. Strictly decreasing, all
/// positive.
pub fn halving_schedule(capacity: EngineCapacity, max_len: usize) -> Vec<ThreadSlot> {
    let mut schedule = Vec::with_capacity(max_len);
    let mut threads = capacity.max_threads();
    while threads > 0 && schedule.len() < max_len {
        schedule.push(ThreadSlot::Fixed(threads));
        threads /= 2;
    }
    schedule
}

/// Resolve an operator-supplied thread list into a schedule.
///
/// An empty list, or a list whose first entry is the `0` sentinel,
/// falls back to [`halving_schedule`]. Otherwise the list is used
/// verbatim, with non-leading `0` entries mapped to
/// [`ThreadSlot::AcceleratorManaged`]. Entries exceeding the engine
/// capacity are kept; the executor skips them at run time.
pub fn resolve_schedule(
    explicit: &[u32],
    capacity: EngineCapacity,
    max_len: usize,
) -> Vec<ThreadSlot> {
    match explicit.first() {
        None | Some(0) => halving_schedule(capacity, max_len),
        Some(_) => explicit
            .iter()
            .map(|&n| {
                if n == 0 {
                    ThreadSlot::AcceleratorManaged
                } else {
                    ThreadSlot::Fixed(n)
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(outer: u32, inner: u32) -> EngineCapacity {
        EngineCapacity {
            outer_threads: outer,
            inner_threads: inner,
        }
    }

    #[test]
    fn halves_from_max_threads() {
        let schedule = halving_schedule(capacity(2, 8), 5);
        let expected: Vec<ThreadSlot> = [16, 8, 4, 2, 1].map(ThreadSlot::Fixed).into();
        assert_eq!(schedule, expected);
    }

    #[test]
    fn truncates_at_zero() {
        let schedule = halving_schedule(capacity(1, 1), 5);
        assert_eq!(schedule, vec![ThreadSlot::Fixed(1)]);
    }

    #[test]
    fn caps_at_max_len() {
        let schedule = halving_schedule(capacity(1, 64), 3);
        let expected: Vec<ThreadSlot> = [64, 32, 16].map(ThreadSlot::Fixed).into();
        assert_eq!(schedule, expected);
    }

    #[test]
    fn empty_list_auto_generates() {
        let schedule = resolve_schedule(&[], capacity(1, 4), 8);
        let expected: Vec<ThreadSlot> = [4, 2, 1].map(ThreadSlot::Fixed).into();
        assert_eq!(schedule, expected);
    }

    #[test]
    fn leading_zero_auto_generates() {
        let schedule = resolve_schedule(&[0], capacity(1, 4), 8);
        let expected: Vec<ThreadSlot> = [4, 2, 1].map(ThreadSlot::Fixed).into();
        assert_eq!(schedule, expected);
    }

    #[test]
    fn explicit_list_used_verbatim_with_gpu_sentinel() {
        let schedule = resolve_schedule(&[40, 0], capacity(1, 8), 8);
        assert_eq!(
            schedule,
            vec![ThreadSlot::Fixed(40), ThreadSlot::AcceleratorManaged]
        );
    }

    #[test]
    fn oversized_entries_are_kept() {
        // skipping is the executor's job, not the generator's
        let schedule = resolve_schedule(&[64, 2], capacity(1, 8), 8);
        assert_eq!(schedule, vec![ThreadSlot::Fixed(64), ThreadSlot::Fixed(2)]);
    }
}
