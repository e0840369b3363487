//! In-memory provider used by tests.
//!
//! Behaviour is driven by the query: `boom` fails, `empty` returns nothing,
//! `panic` panics, anything else returns up to two records that name the
//! proxy the client was built with.

use super::results::{BookResult, ImageResult, NewsResult, TextResult, VideoResult};
use super::{ClientConfig, ClientFactory, SearchClient};
use crate::error::{ProviderError, Result};
use crate::tools::{BookSearchRequest, ImageSearchRequest, NewsSearchRequest, TextSearchRequest, VideoSearchRequest};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct FakeFactory {
    builds: Mutex<Vec<Option<String>>>,
    delay: Duration,
}

impl FakeFactory {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay, ..Self::default() }
    }

    /// Proxy of every client built so far, in build order.
    pub fn builds(&self) -> Vec<Option<String>> {
        self.builds.lock().unwrap().clone()
    }
}

impl ClientFactory for FakeFactory {
    fn build(&self, config: &ClientConfig) -> Result<Arc<dyn SearchClient>> {
        assert!(config.verify_tls());
        if config.proxy() == Some("bad-proxy") {
            return Err(ProviderError::InvalidProxy { proxy: "bad-proxy".into(), message: "unsupported scheme".into() });
        }
        self.builds.lock().unwrap().push(config.proxy().map(str::to_string));
        Ok(Arc::new(FakeClient { proxy: config.proxy().unwrap_or("direct").to_string(), delay: self.delay }))
    }
}

pub struct FakeClient {
    proxy: String,
    delay: Duration,
}

impl FakeClient {
    fn run<T>(&self, query: &str, max: u32, make: impl Fn(usize, &str) -> T) -> Result<Vec<T>> {
        std::thread::sleep(self.delay);
        match query {
            "boom" => Err(ProviderError::Status { backend: "fake", status: 503 }),
            "empty" => Ok(Vec::new()),
            "panic" => panic!("provider blew up"),
            _ => Ok((1..=max.min(2) as usize).map(|i| make(i, &self.proxy)).collect()),
        }
    }
}

impl SearchClient for FakeClient {
    fn text(&self, req: &TextSearchRequest) -> Result<Vec<TextResult>> {
        self.run(&req.query, req.max_results, |i, proxy| TextResult {
            title: Some(format!("{} {i}", req.query)),
            href: Some(format!("example.com/{i}")),
            body: Some(format!("via {proxy}")),
        })
    }

    fn images(&self, req: &ImageSearchRequest) -> Result<Vec<ImageResult>> {
        self.run(&req.query, req.max_results, |i, proxy| ImageResult {
            title: Some(format!("{} {i}", req.query)),
            image: Some(format!("https://img.example.com/{i}.png")),
            source: Some(proxy.to_string()),
            width: Some(640),
            height: Some(480),
            ..ImageResult::default()
        })
    }

    fn videos(&self, req: &VideoSearchRequest) -> Result<Vec<VideoResult>> {
        self.run(&req.query, req.max_results, |i, proxy| VideoResult {
            title: Some(format!("{} {i}", req.query)),
            content: Some(format!("https://video.example.com/{i}")),
            publisher: Some(proxy.to_string()),
            ..VideoResult::default()
        })
    }

    fn news(&self, req: &NewsSearchRequest) -> Result<Vec<NewsResult>> {
        self.run(&req.query, req.max_results, |i, proxy| NewsResult {
            title: Some(format!("{} {i}", req.query)),
            source: Some(proxy.to_string()),
            ..NewsResult::default()
        })
    }

    fn books(&self, req: &BookSearchRequest) -> Result<Vec<BookResult>> {
        self.run(&req.query, req.max_results, |i, proxy| BookResult {
            title: Some(format!("{} {i}", req.query)),
            publisher: Some(proxy.to_string()),
            ..BookResult::default()
        })
    }
}
