//! Search provider seam.
//!
//! [`SearchClient`] is the blocking provider capability; [`ClientFactory`] builds one
//! for a given [`ClientConfig`]. [`client::DdgsClient`] is the HTTP-backed implementation.

pub mod client;
#[cfg(test)]
pub mod fake;
pub mod parse;
pub mod results;

pub use client::DdgsClientFactory;
pub use results::{BookResult, ImageResult, NewsResult, SearchResults, TextResult, VideoResult};

use crate::error::Result;
use crate::tools::{BookSearchRequest, ImageSearchRequest, NewsSearchRequest, TextSearchRequest, VideoSearchRequest};
use std::sync::Arc;
use std::time::Duration;

pub const TEXT_BACKENDS: &[&str] = &["duckduckgo", "wikipedia", "mojeek"];
pub const NEWS_BACKENDS: &[&str] = &["duckduckgo"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    proxy: Option<String>,
    timeout: Duration,
    verify_tls: bool,
}

impl ClientConfig {
    pub fn new(proxy: Option<String>, timeout: Duration) -> Self {
        Self { proxy, timeout, verify_tls: true }
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }
}

/// Blocking search operations. Callers must run these off the async executor.
pub trait SearchClient: Send + Sync {
    fn text(&self, request: &TextSearchRequest) -> Result<Vec<TextResult>>;
    fn images(&self, request: &ImageSearchRequest) -> Result<Vec<ImageResult>>;
    fn videos(&self, request: &VideoSearchRequest) -> Result<Vec<VideoResult>>;
    fn news(&self, request: &NewsSearchRequest) -> Result<Vec<NewsResult>>;
    fn books(&self, request: &BookSearchRequest) -> Result<Vec<BookResult>>;
}

pub trait ClientFactory: Send + Sync {
    fn build(&self, config: &ClientConfig) -> Result<Arc<dyn SearchClient>>;
}
