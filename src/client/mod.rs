//! Fetching of raw node documents.
//!
//! The provider only depends on the [`Fetcher`] capability. [`HttpFetcher`]
//! is the `reqwest` implementation, configured with an [`Auth`] method.

mod auth;
mod fetch;
mod http;

pub use auth::Auth;
pub use fetch::{FetchedBody, Fetcher, RequestOptions};
pub use http::HttpFetcher;
