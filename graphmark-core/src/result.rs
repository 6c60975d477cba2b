//! Kernel Result Model
//!
//! A kernel produces either a scalar (triangle count) or a per-vertex
//! vector (clustering coefficients). The correctness oracle compares
//! both shapes element-wise, so the scalar case is exposed as a
//! one-element slice.

/// Numeric result of one kernel invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelOutput {
    /// A single aggregate value, e.g. a triangle count.
    Scalar(f64),
    /// One value per vertex, e.g. local clustering coefficients.
    PerVertex(Vec<f64>),
}

impl KernelOutput {
    /// View the result as a flat slice of values.
    pub fn values(&self) -> &[f64] {
        match self {
            KernelOutput::Scalar(v) => std::slice::from_ref(v),
            KernelOutput::PerVertex(v) => v,
        }
    }

    /// Number of values carried.
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Whether no values are carried (an empty per-vertex vector).
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

impl std::fmt::Display for KernelOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelOutput::Scalar(v) => write!(f, "{}", v),
            KernelOutput::PerVertex(v) => write!(f, "<{} per-vertex values>", v.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_as_slice() {
        let out = KernelOutput::Scalar(42.0);
        assert_eq!(out.values(), &[42.0]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn per_vertex_as_slice() {
        let out = KernelOutput::PerVertex(vec![0.5, 1.0]);
        assert_eq!(out.values(), &[0.5, 1.0]);
        assert_eq!(out.len(), 2);
    }
}
