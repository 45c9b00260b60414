use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation kernel.
///
/// Every fallible kernel operation returns this enum instead of panicking.
/// A step that fails with any variant is not committed.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or initial state.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Numeric-domain failure (zero velocity at a wall crossing, coincident centers, non-finite state).
    #[error("numerical error: {0}")]
    MathError(String),

    /// Initial position outside the simulation box.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
}
