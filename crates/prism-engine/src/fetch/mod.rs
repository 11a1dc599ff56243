//! Asynchronous file fetching.
//!
//! A [`Fetcher`] owns a fixed set of worker threads ("lanes") that read files
//! into caller-provided buffers. Completed requests are handed back on the
//! calling thread through [`Fetcher::do_work`], so app state never crosses a
//! thread boundary.

mod error;
mod fetcher;
mod path;
mod request;

pub use error::FetchError;
pub use fetcher::{FetchDesc, Fetcher};
pub use path::AssetDir;
pub use request::{FetchHandle, FetchRequest, FetchResponse};
