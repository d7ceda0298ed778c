//! Error types for the range-proof crate.

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input shape: mismatched vector lengths, non-power-of-two
    /// argument sizes, out-of-range values. Detected before any
    /// cryptographic computation.
    #[error("structural error: {0}")]
    Structural(String),

    /// A value outside its algebraic domain: no square root, no modular
    /// inverse, a point off the curve. Inputs may be attacker-controlled,
    /// so this is a failed operation rather than a panic.
    #[error("domain error: {0}")]
    Domain(String),

    /// Semantic rejection of a proof. Carries no detail about which check
    /// failed, to avoid acting as a verification oracle.
    #[error("proof verification failed")]
    Verification,

    /// The secure random source is unavailable. Fatal: continuing would
    /// reuse blinding factors and break hiding.
    #[error("randomness failure: {0}")]
    Randomness(String),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;
