use std::io;

use thiserror::Error;

/// Failure of a single fetch request, or of the fetcher itself.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("file not found")]
    FileNotFound,

    #[error("file is {size} bytes but the buffer holds {capacity}")]
    BufferTooSmall { size: u64, capacity: usize },

    #[error("file ended before its reported size was read")]
    UnexpectedEof,

    #[error("{0} requests already in flight")]
    QueueFull(usize),

    #[error("fetcher has shut down")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}
