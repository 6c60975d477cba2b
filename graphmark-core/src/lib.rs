#![warn(missing_docs)]
//! Graphmark Core - Harness Runtime Primitives
//!
//! This crate provides the building blocks shared by the sweep harness
//! and the kernel collaborators:
//! - Overflow-checked sized allocation with a pluggable backing allocator
//! - Monotonic wall-clock timing with optional CPU affinity pinning
//! - The execution-environment abstraction (thread count, engine mode)
//! - The kernel result model consumed by the correctness oracle

mod alloc;
mod engine;
mod measure;
mod result;

pub use alloc::{checked_capacity, AllocError, Allocator, Block, SystemAllocator, MAX_INDEX};
pub use engine::{EngineCapacity, EngineError, EngineMode, ExecutionEnvironment};
pub use measure::{pin_to_cpu, Clock, MonotonicClock, Timer};
pub use result::KernelOutput;
