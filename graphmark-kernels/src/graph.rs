//! Compressed Sparse Row Graph
//!
//! Immutable, undirected, simple adjacency structure. Self-loops are
//! dropped and duplicate edges collapsed at build time; every neighbor
//! list is sorted ascending so kernels can intersect by merge or probe
//! by binary search. Read-only for the entire benchmark session.

use fxhash::FxHashSet;

/// Undirected graph in CSR form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    row_ptr: Vec<usize>,
    col_idx: Vec<u32>,
}

impl CsrGraph {
    /// Build from an edge list over `n` vertices.
    ///
    /// Edges are symmetrized; self-loops and duplicates are dropped.
    /// Endpoints at or beyond `n` are ignored.
    pub fn from_edges(n: u32, edges: &[(u32, u32)]) -> Self {
        let mut unique: FxHashSet<(u32, u32)> = FxHashSet::default();
        for &(u, v) in edges {
            if u == v || u >= n || v >= n {
                continue;
            }
            unique.insert((u.min(v), u.max(v)));
        }

        let n = n as usize;
        let mut degree = vec![0usize; n];
        for &(u, v) in &unique {
            degree[u as usize] += 1;
            degree[v as usize] += 1;
        }

        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut offset = 0usize;
        row_ptr.push(0);
        for d in &degree {
            offset += d;
            row_ptr.push(offset);
        }

        let mut col_idx = vec![0u32; offset];
        let mut cursor: Vec<usize> = row_ptr[..n].to_vec();
        for &(u, v) in &unique {
            col_idx[cursor[u as usize]] = v;
            cursor[u as usize] += 1;
            col_idx[cursor[v as usize]] = u;
            cursor[v as usize] += 1;
        }

        for v in 0..n {
            col_idx[row_ptr[v]..row_ptr[v + 1]].sort_unstable();
        }

        Self { row_ptr, col_idx }
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.row_ptr.len() - 1
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.col_idx.len() / 2
    }

    /// Number of stored adjacency entries (each edge appears twice).
    pub fn entry_count(&self) -> usize {
        self.col_idx.len()
    }

    /// Degree of vertex `v`.
    pub fn degree(&self, v: u32) -> usize {
        let v = v as usize;
        self.row_ptr[v + 1] - self.row_ptr[v]
    }

    /// Sorted neighbor list of vertex `v`.
    pub fn neighbors(&self, v: u32) -> &[u32] {
        let v = v as usize;
        &self.col_idx[self.row_ptr[v]..self.row_ptr[v + 1]]
    }

    /// Whether vertices `u` and `v` are adjacent.
    pub fn has_edge(&self, u: u32, v: u32) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_sorted_symmetric_adjacency() {
        let g = CsrGraph::from_edges(4, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 3)]);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.entry_count(), 6);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.neighbors(3), &[2]);
        assert!(g.has_edge(2, 1));
        assert!(!g.has_edge(0, 3));
    }

    #[test]
    fn drops_out_of_range_endpoints() {
        let g = CsrGraph::from_edges(2, &[(0, 1), (1, 5)]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn isolated_vertices_have_zero_degree() {
        let g = CsrGraph::from_edges(3, &[(0, 1)]);
        assert_eq!(g.degree(2), 0);
        assert!(g.neighbors(2).is_empty());
    }
}
