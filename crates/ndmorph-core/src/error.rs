use thiserror::Error;

#[derive(Error, Debug)]
pub enum NdError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer length {actual} does not match product of dimensions ({expected})")]
    ShapeMismatch { expected: usize, actual: usize },

    /// `axis` is set when a single coordinate exceeds that axis' extent.
    #[error("Index {index} out of range (bound: {bound}){}", axis_note(.axis))]
    IndexOutOfRange {
        index: usize,
        bound: usize,
        axis: Option<usize>,
    },

    #[error("Rank mismatch: expected {expected}, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    #[error("Neighbourhoods do not align: widths {left:?} vs {right:?}")]
    NeighbourhoodMismatch { left: Vec<usize>, right: Vec<usize> },

    #[error("Invalid spacing: {0}")]
    InvalidSpacing(String),

    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),

    #[error("Invalid sampling scheme: {0}")]
    InvalidSampling(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

fn axis_note(axis: &Option<usize>) -> String {
    axis.map(|a| format!(" on axis {a}")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, NdError>;
