use thiserror::Error;

/// Result type alias for table construction.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A negative initial capacity was requested.
    #[error("illegal initial capacity: {0}")]
    IllegalCapacity(i64),
}
