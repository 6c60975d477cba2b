//! Local Clustering Coefficient
//!
//! `lcc(v) = closed wedges at v / (deg(v) * (deg(v) - 1) / 2)`, with 0
//! for vertices of degree below 2. The candidate intersects sorted
//! neighbor lists in parallel; the reference re-derives the same values
//! by sequential pair membership tests and shares no code with it.

use crate::graph::CsrGraph;
use rayon::prelude::*;

/// Candidate per-vertex clustering coefficients.
///
/// Parallelized over vertices on the caller's rayon pool.
pub fn clustering_coefficients(graph: &CsrGraph) -> Vec<f64> {
    let n = graph.node_count() as u32;
    (0..n)
        .into_par_iter()
        .map(|u| {
            let nbrs = graph.neighbors(u);
            let deg = nbrs.len() as u64;
            if deg < 2 {
                return 0.0;
            }
            let closed: u64 = nbrs
                .iter()
                .map(|&v| intersect_count(nbrs, graph.neighbors(v)))
                .sum();
            // each closed wedge found twice, once per ordered pair
            closed as f64 / (deg * (deg - 1)) as f64
        })
        .collect()
}

/// Independent reference for the clustering coefficient.
pub fn clustering_coefficients_simple(graph: &CsrGraph) -> Vec<f64> {
    let n = graph.node_count() as u32;
    let mut out = Vec::with_capacity(n as usize);
    for u in 0..n {
        let nbrs = graph.neighbors(u);
        let deg = nbrs.len() as u64;
        if deg < 2 {
            out.push(0.0);
            continue;
        }
        let mut closed: u64 = 0;
        for (i, &v) in nbrs.iter().enumerate() {
            for &w in &nbrs[i + 1..] {
                if graph.has_edge(v, w) {
                    closed += 1;
                }
            }
        }
        out.push(closed as f64 / ((deg * (deg - 1)) as f64 / 2.0));
    }
    out
}

fn intersect_count(a: &[u32], b: &[u32]) -> u64 {
    let (mut i, mut j) = (0, 0);
    let mut count = 0;
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_fully_clustered() {
        let g = CsrGraph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(clustering_coefficients(&g), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn path_has_no_clustering() {
        let g = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(clustering_coefficients(&g), vec![0.0; 4]);
    }

    #[test]
    fn candidate_matches_reference() {
        // K4 plus a pendant vertex and an isolated vertex
        let g = CsrGraph::from_edges(
            6,
            &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (3, 4)],
        );
        let candidate = clustering_coefficients(&g);
        let reference = clustering_coefficients_simple(&g);
        assert_eq!(candidate.len(), reference.len());
        for (c, r) in candidate.iter().zip(&reference) {
            assert!((c - r).abs() < 1e-12);
        }
    }

    #[test]
    fn degree_one_and_isolated_are_zero() {
        let g = CsrGraph::from_edges(3, &[(0, 1)]);
        assert_eq!(clustering_coefficients(&g), vec![0.0, 0.0, 0.0]);
    }
}
