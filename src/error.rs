use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Every variant is fatal at construction time. The tick loop itself does
/// not produce errors: degenerate collision geometry is guarded locally in
/// the resolver, and wall tunneling at large timesteps is a documented
/// precondition on `dt`, not a runtime fault.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// The requested particle count does not fit the placement lattice.
    #[error("lattice capacity exceeded: requested {requested} particles, grid holds {capacity}")]
    LatticeCapacity { requested: usize, capacity: usize },
}
