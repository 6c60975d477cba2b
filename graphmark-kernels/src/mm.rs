//! Matrix Market Loading
//!
//! Reads the coordinate subset of the Matrix Market format used for
//! published graph benchmark inputs: `pattern`, `real`, or `integer`
//! fields with `general` or `symmetric` symmetry, 1-based indices,
//! `%` comment lines. Values are ignored; only the sparsity pattern
//! becomes the adjacency structure.

use crate::graph::CsrGraph;
use graphmark_core::{checked_capacity, AllocError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors from graph loading
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The declared entry count is too large to allocate safely.
    #[error("allocation rejected: {0}")]
    Alloc(#[from] AllocError),

    /// The input is not in the supported Matrix Market subset.
    #[error("matrix market format error at line {line}: {reason}")]
    Format {
        /// 1-based line number of the offending input line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

fn format_err(line: usize, reason: impl Into<String>) -> LoadError {
    LoadError::Format {
        line,
        reason: reason.into(),
    }
}

/// Load a graph from a Matrix Market file on disk.
pub fn load_graph(path: impl AsRef<Path>) -> Result<CsrGraph, LoadError> {
    let file = File::open(path)?;
    read_matrix_market(BufReader::new(file))
}

/// Parse a Matrix Market stream into a [`CsrGraph`].
pub fn read_matrix_market<R: BufRead>(reader: R) -> Result<CsrGraph, LoadError> {
    let mut lines = reader.lines().enumerate();

    // header: %%MatrixMarket matrix coordinate <field> <symmetry>
    let (lineno, header) = lines
        .next()
        .ok_or_else(|| format_err(1, "empty input"))
        .and_then(|(i, l)| Ok((i + 1, l?)))?;
    let tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.len() != 5 || !tokens[0].eq_ignore_ascii_case("%%MatrixMarket") {
        return Err(format_err(lineno, "missing %%MatrixMarket header"));
    }
    if !tokens[1].eq_ignore_ascii_case("matrix") || !tokens[2].eq_ignore_ascii_case("coordinate") {
        return Err(format_err(lineno, "only coordinate matrices are supported"));
    }
    let field = tokens[3].to_ascii_lowercase();
    if !matches!(field.as_str(), "pattern" | "real" | "integer") {
        return Err(format_err(lineno, format!("unsupported field: {}", field)));
    }
    let symmetry = tokens[4].to_ascii_lowercase();
    if !matches!(symmetry.as_str(), "general" | "symmetric") {
        return Err(format_err(
            lineno,
            format!("unsupported symmetry: {}", symmetry),
        ));
    }
    let has_value = field != "pattern";

    // dimensions: rows cols nnz (after comments)
    let mut dims: Option<(u32, usize)> = None;
    let mut edges: Vec<(u32, u32)> = Vec::new();
    let mut last_line = lineno;

    for (i, line) in lines {
        let lineno = i + 1;
        last_line = lineno;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let mut parts = line.split_whitespace();

        match dims {
            None => {
                let rows: u64 = parse_field(&mut parts, lineno, "row count")?;
                let cols: u64 = parse_field(&mut parts, lineno, "column count")?;
                let nnz: usize = parse_field(&mut parts, lineno, "entry count")?;
                if rows != cols {
                    return Err(format_err(lineno, "adjacency matrix must be square"));
                }
                let n = u32::try_from(rows)
                    .map_err(|_| format_err(lineno, "dimension exceeds u32 range"))?;
                // entry count comes from untrusted input
                edges.reserve(checked_capacity::<(u32, u32)>(nnz as u64)?);
                dims = Some((n, nnz));
            }
            Some((n, _)) => {
                let row: u64 = parse_field(&mut parts, lineno, "row index")?;
                let col: u64 = parse_field(&mut parts, lineno, "column index")?;
                if has_value && parts.next().is_none() {
                    return Err(format_err(lineno, "missing value field"));
                }
                if row == 0 || col == 0 || row > n as u64 || col > n as u64 {
                    return Err(format_err(lineno, "index out of range"));
                }
                // 1-based on disk
                edges.push((row as u32 - 1, col as u32 - 1));
            }
        }
    }

    // input exhausted; blame the last line read
    let (n, nnz) = dims.ok_or_else(|| format_err(last_line, "missing dimension line"))?;
    if edges.len() != nnz {
        return Err(format_err(
            last_line,
            format!("expected {} entries, found {}", nnz, edges.len()),
        ));
    }

    Ok(CsrGraph::from_edges(n, &edges))
}

fn parse_field<T: std::str::FromStr>(
    parts: &mut std::str::SplitWhitespace<'_>,
    lineno: usize,
    what: &str,
) -> Result<T, LoadError> {
    parts
        .next()
        .ok_or_else(|| format_err(lineno, format!("missing {}", what)))?
        .parse()
        .map_err(|_| format_err(lineno, format!("invalid {}", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pattern_symmetric() {
        let input = "\
%%MatrixMarket matrix coordinate pattern symmetric
% a triangle
3 3 3
2 1
3 1
3 2
";
        let g = read_matrix_market(input.as_bytes()).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn parses_real_general_ignoring_values() {
        let input = "\
%%MatrixMarket matrix coordinate real general
2 2 2
1 2 0.5
2 1 0.5
";
        let g = read_matrix_market(input.as_bytes()).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn rejects_non_square() {
        let input = "\
%%MatrixMarket matrix coordinate pattern general
2 3 1
1 2
";
        assert!(matches!(
            read_matrix_market(input.as_bytes()),
            Err(LoadError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_bad_header() {
        let input = "%%MatrixMarket matrix array real general\n";
        assert!(matches!(
            read_matrix_market(input.as_bytes()),
            Err(LoadError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let input = "\
%%MatrixMarket matrix coordinate pattern general
2 2 1
1 3
";
        assert!(read_matrix_market(input.as_bytes()).is_err());
    }

    #[test]
    fn rejects_absurd_entry_count() {
        // nnz that would overflow the edge buffer size computation
        let input = "\
%%MatrixMarket matrix coordinate pattern general
3 3 4611686018427387904
1 2
";
        assert!(matches!(
            read_matrix_market(input.as_bytes()),
            Err(LoadError::Alloc(_))
        ));
    }

    #[test]
    fn rejects_entry_count_mismatch() {
        let input = "\
%%MatrixMarket matrix coordinate pattern general
3 3 2
1 2
";
        // reported against the last line read, 1-based
        assert!(matches!(
            read_matrix_market(input.as_bytes()),
            Err(LoadError::Format { line: 3, .. })
        ));
    }

    #[test]
    fn missing_dimension_line_blames_last_line() {
        let input = "\
%%MatrixMarket matrix coordinate pattern general
% comments only, no dimensions
";
        assert!(matches!(
            read_matrix_market(input.as_bytes()),
            Err(LoadError::Format { line: 2, .. })
        ));
    }
}
