//! Error type shared by catalog construction, policy decoding and
//! configuration validation.

use thiserror::Error;

/// Errors produced by u-offerplan.
///
/// Catalog errors are configuration errors: callers are expected to abort
/// rather than continue with a partially built catalog.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The catalog table header does not match the expected schema.
    #[error("catalog header mismatch: expected [{expected}], got [{found}]")]
    Schema { expected: String, found: String },

    /// A numeric catalog field could not be parsed.
    #[error("catalog row {row}: cannot parse {field} value '{value}'")]
    Parse {
        row: usize,
        field: String,
        value: String,
    },

    /// A catalog row has fewer columns than the header.
    #[error("catalog row {row}: expected {expected} columns, got {found}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The catalog or a code list was empty.
    #[error("catalog has no actions")]
    EmptyCatalog,

    /// The occurrence weights cannot form a probability distribution.
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    /// A vector or code list does not match the catalog dimensions.
    #[error("{what}: expected {expected} entries, got {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A persisted policy names a code the catalog does not know.
    #[error("unknown action code '{0}'")]
    UnknownCode(String),

    /// A persisted policy names the same code twice.
    #[error("action code '{0}' listed more than once")]
    DuplicateCode(String),

    /// A rank array is not a permutation of `[0, n)`.
    #[error("ranks are not a permutation: {0}")]
    InvalidRanks(String),

    /// A composite policy's switch hour is not one of its candidates.
    #[error("switch hour {hour} is not one of {candidates:?}")]
    InvalidSwitchHour { hour: u32, candidates: Vec<u32> },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A structured policy record could not be (de)serialized.
    #[cfg(feature = "serde")]
    #[error("policy record: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a catalog or record file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlanError>;
