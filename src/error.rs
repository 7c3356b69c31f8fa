use std::error::Error;
use std::fmt;

/// Error raised by [`RichMap::try_from_pairs`], the fail-fast construction
/// path over pair sources in which a key or value slot may be absent.
///
/// Raised before any map is observable. An absent slot signals a programming
/// error in the data source, not a recoverable runtime condition.
///
/// [`RichMap::try_from_pairs`]: crate::RichMap::try_from_pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The pair at this position had no key.
    NilKey(usize),
    /// The pair at this position had no value.
    NilValue(usize),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::NilKey(index) => write!(f, "pair at position {index} has no key"),
            MapError::NilValue(index) => write!(f, "pair at position {index} has no value"),
        }
    }
}

impl Error for MapError {}
