#![warn(missing_docs)]
//! Graphmark Kernels - Analytic Kernels and Host Engine
//!
//! The collaborators the harness drives:
//! - `CsrGraph`: immutable undirected adjacency structure
//! - Matrix Market loading
//! - Degree-based pre-sorting policies
//! - Triangle counting variants plus an independent reference
//! - Local clustering coefficient plus an independent reference
//! - `HostEngine`: execution environment over a rayon thread pool
//!
//! The kernels are deliberately independent of the harness crate; the
//! harness sees them only through closures and `KernelOutput`.

mod graph;
mod host;
mod lcc;
mod mm;
mod sort;
mod triangles;

pub use graph::CsrGraph;
pub use host::HostEngine;
pub use lcc::{clustering_coefficients, clustering_coefficients_simple};
pub use mm::{load_graph, read_matrix_market, LoadError};
pub use sort::{apply_sort_policy, SortPolicy};
pub use triangles::{count_triangles, count_triangles_simple, TriangleVariant};
