use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    // Configuration errors: checked before any computation begins
    #[error("No bodies defined: a run needs at least one body")]
    NoBodies,

    #[error("Time step must be positive, got {dt}")]
    NonPositiveTimeStep { dt: f64 },

    #[error("End time must be positive, got {t_end}")]
    NonPositiveDuration { t_end: f64 },

    #[error("Body {index} has non-positive mass {mass}")]
    NonPositiveMass { index: usize, mass: f64 },

    #[error("Softening length must be non-negative, got {softening}")]
    NegativeSoftening { softening: f64 },

    #[error("Body {index}: expected 3 components for '{field}', found {found}")]
    BadBodyDimension {
        index: usize,
        field: &'static str,
        found: usize,
    },

    #[error("Scenario defines both an explicit body list and a lattice; pick one")]
    AmbiguousInitialConditions,

    #[error("Field grid size must be positive, got 0")]
    ZeroFieldSize,

    // I/O errors from the recorder
    #[error("Failed to write output file '{path}': {source}")]
    OutputFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SimError>;
