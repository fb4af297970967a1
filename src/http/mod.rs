//! HTTP client module
//!
//! Single-attempt JSON GET client for the analytics API, plus the
//! [`PageFetcher`] seam the paginator is written against.
//!
//! Requests are never retried. A non-2xx status, a network failure or an
//! unparseable body is returned to the caller as an error.

mod client;

pub use client::{HttpClient, HttpClientConfig, PageFetcher};
