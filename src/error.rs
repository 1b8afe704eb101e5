//! Error types for fallible math operations.

use thiserror::Error;

/// Errors raised by matrix, vector, and scalar operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Square root of a negative (or NaN) value.
    #[error("square root of negative value {0}")]
    NegativeSqrt(f64),

    /// Inverse requested for a matrix whose determinant is zero.
    #[error("matrix is not invertible (determinant is {determinant})")]
    Singular {
        /// The determinant that caused the rejection.
        determinant: f32,
    },

    /// An argument outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Element access outside the container shape.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} container")]
    IndexOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Container row count.
        rows: usize,
        /// Container column count.
        cols: usize,
    },

    /// Operands with incompatible shapes.
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Name of the operation.
        op: &'static str,
        /// Shape (rows, cols) of the left operand.
        left: (usize, usize),
        /// Shape (rows, cols) of the right operand.
        right: (usize, usize),
    },

    /// A square matrix was required.
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// Buffer length does not match `rows * cols`.
    #[error("buffer of length {actual} cannot back a container of {expected} elements")]
    BufferLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MathError>;
