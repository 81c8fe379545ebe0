use std::collections::TryReserveError;
use std::error;
use std::fmt;

/// Failure of a fallible map operation. The map is left exactly as it was.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// No memory could be obtained for a new node.
    Alloc(TryReserveError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Alloc(err) => write!(f, "failed to allocate a tree node: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Alloc(err) => Some(err),
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::Alloc(err)
    }
}
