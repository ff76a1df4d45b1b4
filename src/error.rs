use core::fmt;

/// Result alias for `loam`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the analysis engine.
///
/// Degenerate data (constant columns, empty collections, zero variance) is
/// never an error; it produces zeroed output instead. Only caller contract
/// violations surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of samples.
        n_items: usize,
    },

    /// Feature vector of the wrong length.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

impl Error {
    /// True for errors the caller should surface as a validation message.
    ///
    /// Every variant is currently a caller contract violation; the method
    /// exists so collaborators do not have to match on variants.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidClusterCount { .. }
                | Error::DimensionMismatch { .. }
                | Error::InvalidParameter { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} samples")
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
