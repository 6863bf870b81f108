use crate::Complex64;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid adjacency list literal: {message}")]
    InvalidLiteral { message: String },

    #[error(
        "Adjacency list has a row for vertex {vertex}, but the graph only has {size} vertices"
    )]
    VertexOutOfRange { vertex: usize, size: usize },

    #[error("Edge {vertex} -> {target} points outside the graph (expected a target in 0..{size})")]
    TargetOutOfRange {
        vertex: usize,
        target: i64,
        size: usize,
    },

    #[error("Graph has no vertices, so there is no eigenvalue to report")]
    EmptyGraph,

    #[error(
        "Schur decomposition of the {size}x{size} adjacency matrix did not converge within {max_iterations} iterations"
    )]
    SchurNotConverged { size: usize, max_iterations: usize },

    #[error("Inverse iteration could not invert the shifted matrix for eigenvalue {eigenvalue}")]
    SingularShift { eigenvalue: Complex64 },

    #[error("{what} component {index} has a non-negligible imaginary part ({imaginary:e})")]
    ComplexComponent {
        what: &'static str,
        index: usize,
        imaginary: f64,
    },
}
