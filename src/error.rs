use std::fmt;

/// A `Result` type alias for this crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while constructing a stream adapter.
///
/// Adapters validate their arguments up front: a misconfigured adapter is
/// never constructed, so `next` itself cannot fail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A sliding-window reduction was requested with a window that can
    /// never hold an item. The offending size is attached.
    WindowSize(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::WindowSize(size) => write!(
                f,
                "window size out of bounds: {} (a window must hold at \
                 least one item)",
                size
            ),
        }
    }
}

impl std::error::Error for Error {}
