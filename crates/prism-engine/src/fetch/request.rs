use std::path::PathBuf;

use super::FetchError;

/// Identifies one request for the lifetime of its [`Fetcher`](super::Fetcher).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FetchHandle(pub(crate) u64);

/// A file to read and the buffer to read it into.
///
/// The buffer's capacity is the largest file the request accepts; it is
/// filled in place and returned in the response.
#[derive(Debug)]
pub struct FetchRequest {
    pub path: PathBuf,
    pub buffer: Vec<u8>,
    /// Caller-defined value carried through to the response.
    pub tag: usize,
}

impl FetchRequest {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            buffer: Vec::with_capacity(capacity),
            tag: 0,
        }
    }

    pub fn with_tag(mut self, tag: usize) -> Self {
        self.tag = tag;
        self
    }
}

/// Outcome of a request, delivered by [`Fetcher::do_work`](super::Fetcher::do_work).
#[derive(Debug)]
pub struct FetchResponse {
    pub handle: FetchHandle,
    pub path: PathBuf,
    /// Worker lane that served the request.
    pub lane: usize,
    pub tag: usize,
    pub result: Result<Vec<u8>, FetchError>,
}

impl FetchResponse {
    pub fn fetched(&self) -> bool {
        self.result.is_ok()
    }

    pub fn failed(&self) -> bool {
        self.result.is_err()
    }

    /// File contents; empty on failure.
    pub fn data(&self) -> &[u8] {
        match &self.result {
            Ok(bytes) => bytes,
            Err(_) => &[],
        }
    }
}
