//! Error types for engine construction and evaluation.

use thiserror::Error;

/// Recoverable failures reported by the integral engines.
///
/// Broken call contracts (multi-contraction shells, primitive counts or
/// angular momenta above the engine capacity) are not represented here;
/// they panic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{integral} integrals support angular momentum up to {supported}, requested {requested}")]
    AngularMomentumTooHigh {
        integral: &'static str,
        requested: usize,
        supported: usize,
    },

    #[error("{integral} integrals support derivative order up to {supported}, requested {requested}")]
    DerivativeOrderTooHigh {
        integral: &'static str,
        requested: usize,
        supported: usize,
    },

    #[error("no nuclei found; forgot to call set_charges()?")]
    NoNuclei,

    #[error("invalid shell: {0}")]
    InvalidShell(String),

    #[error("buffer shape mismatch: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, Error>;
