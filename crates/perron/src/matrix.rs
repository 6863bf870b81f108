use nalgebra::DMatrix;

use crate::adjacency::AdjacencyList;
use crate::error::{Error, Result};

/// Dense 0/1 adjacency matrix. Row `i`, column `j` is `1.0` iff the edge `i -> j` exists.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    inner: DMatrix<f64>,
}

impl AdjacencyMatrix {
    /// Builds the `size x size` matrix for `list`.
    ///
    /// Rows past the end of `list` stay empty. A row at or beyond `size`, or a target outside
    /// `0..size`, is an error. Self loops are allowed and duplicate edges collapse.
    pub fn from_adjacency(size: usize, list: &AdjacencyList) -> Result<Self> {
        if list.len() > size {
            return Err(Error::VertexOutOfRange {
                vertex: size,
                size,
            });
        }

        let mut inner = DMatrix::<f64>::zeros(size, size);
        for (source, target) in list.edges() {
            let column = usize::try_from(target)
                .ok()
                .filter(|&j| j < size)
                .ok_or(Error::TargetOutOfRange {
                    vertex: source,
                    target,
                    size,
                })?;
            inner[(source, column)] = 1.0;
        }

        if list.len() < size {
            tracing::debug!(
                rows = list.len(),
                size,
                "adjacency list is shorter than the graph; trailing vertices have no out-edges"
            );
        }

        Ok(Self { inner })
    }

    pub fn size(&self) -> usize {
        self.inner.nrows()
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.inner[(row, column)]
    }

    pub fn edge_count(&self) -> usize {
        self.inner.iter().filter(|&&v| v != 0.0).count()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(size: usize, rows: Vec<Vec<i64>>) -> Result<AdjacencyMatrix> {
        AdjacencyMatrix::from_adjacency(size, &AdjacencyList::new(rows))
    }

    #[test]
    fn sets_one_per_edge() {
        let m = build(3, vec![vec![1, 2], vec![0], vec![]]).unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.edge_count(), 3);
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(0, 2), 1.0);
        assert_eq!(m.get(1, 0), 1.0);
        assert_eq!(m.get(2, 0), 0.0);
        assert_eq!(m.get(1, 1), 0.0);
    }

    #[test]
    fn duplicate_edges_are_idempotent() {
        let m = build(2, vec![vec![1, 1, 1], vec![]]).unwrap();
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.edge_count(), 1);
    }

    #[test]
    fn self_loops_are_allowed() {
        let m = build(1, vec![vec![0]]).unwrap();
        assert_eq!(m.get(0, 0), 1.0);
    }

    #[test]
    fn short_lists_leave_trailing_rows_empty() {
        let m = build(3, vec![vec![2]]).unwrap();
        assert_eq!(m.edge_count(), 1);
        assert!((0..3).all(|j| m.get(2, j) == 0.0));
    }

    #[test]
    fn rejects_targets_outside_the_graph() {
        let err = build(2, vec![vec![2], vec![]]).unwrap_err();
        assert!(matches!(
            err,
            Error::TargetOutOfRange {
                vertex: 0,
                target: 2,
                size: 2
            }
        ));

        let err = build(2, vec![vec![], vec![-1]]).unwrap_err();
        assert!(matches!(
            err,
            Error::TargetOutOfRange {
                vertex: 1,
                target: -1,
                ..
            }
        ));
    }

    #[test]
    fn rejects_rows_beyond_size() {
        let err = build(1, vec![vec![], vec![]]).unwrap_err();
        assert!(matches!(err, Error::VertexOutOfRange { vertex: 1, size: 1 }));
    }

    #[test]
    fn zero_size_builds_an_empty_matrix() {
        let m = build(0, vec![]).unwrap();
        assert_eq!(m.size(), 0);
        assert_eq!(m.edge_count(), 0);
    }
}
