pub mod args;
pub mod books;
pub mod choice;
pub mod images;
pub mod news;
pub mod registry;
pub mod text;
pub mod videos;

pub use books::BookSearchRequest;
pub use images::ImageSearchRequest;
pub use news::NewsSearchRequest;
pub use registry::ToolDescriptor;
pub use text::TextSearchRequest;
pub use videos::VideoSearchRequest;

use crate::error::ValidationError;
use rmcp::model::JsonObject;
use serde_json::json;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Text,
    Images,
    Videos,
    News,
    Books,
}

impl SearchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Text => "text",
            SearchKind::Images => "image",
            SearchKind::Videos => "video",
            SearchKind::News => "news",
            SearchKind::Books => "book",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, fully defaulted search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Text(TextSearchRequest),
    Images(ImageSearchRequest),
    Videos(VideoSearchRequest),
    News(NewsSearchRequest),
    Books(BookSearchRequest),
}

impl SearchRequest {
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchRequest::Text(_) => SearchKind::Text,
            SearchRequest::Images(_) => SearchKind::Images,
            SearchRequest::Videos(_) => SearchKind::Videos,
            SearchRequest::News(_) => SearchKind::News,
            SearchRequest::Books(_) => SearchKind::Books,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            SearchRequest::Text(r) => &r.query,
            SearchRequest::Images(r) => &r.query,
            SearchRequest::Videos(r) => &r.query,
            SearchRequest::News(r) => &r.query,
            SearchRequest::Books(r) => &r.query,
        }
    }

    pub fn max_results(&self) -> u32 {
        match self {
            SearchRequest::Text(r) => r.max_results,
            SearchRequest::Images(r) => r.max_results,
            SearchRequest::Videos(r) => r.max_results,
            SearchRequest::News(r) => r.max_results,
            SearchRequest::Books(r) => r.max_results,
        }
    }

    pub fn proxy(&self) -> Option<&str> {
        match self {
            SearchRequest::Text(r) => r.proxy.as_deref(),
            SearchRequest::Images(r) => r.proxy.as_deref(),
            SearchRequest::Videos(r) => r.proxy.as_deref(),
            SearchRequest::News(r) => r.proxy.as_deref(),
            SearchRequest::Books(r) => r.proxy.as_deref(),
        }
    }

    pub fn backend(&self) -> Option<&str> {
        match self {
            SearchRequest::Text(r) => Some(&r.backend),
            SearchRequest::News(r) => Some(&r.backend),
            _ => None,
        }
    }

    /// Renders the request back into raw arguments that normalize to `self`.
    pub fn to_arguments(&self) -> JsonObject {
        match self {
            SearchRequest::Text(r) => r.to_arguments(),
            SearchRequest::Images(r) => r.to_arguments(),
            SearchRequest::Videos(r) => r.to_arguments(),
            SearchRequest::News(r) => r.to_arguments(),
            SearchRequest::Books(r) => r.to_arguments(),
        }
    }
}

/// Turns raw tool arguments into a [`SearchRequest`] using the tool's contract.
#[derive(Debug, Clone)]
pub struct Normalizer {
    auto_backend: String,
}

impl Normalizer {
    pub fn new(auto_backend: impl Into<String>) -> Self {
        Self { auto_backend: auto_backend.into() }
    }

    pub fn normalize(&self, tool: &ToolDescriptor, args: &JsonObject) -> Result<SearchRequest, ValidationError> {
        Ok(match tool.kind {
            SearchKind::Text => SearchRequest::Text(TextSearchRequest::from_arguments(args, &self.auto_backend)?),
            SearchKind::Images => SearchRequest::Images(ImageSearchRequest::from_arguments(args)?),
            SearchKind::Videos => SearchRequest::Videos(VideoSearchRequest::from_arguments(args)?),
            SearchKind::News => SearchRequest::News(NewsSearchRequest::from_arguments(args)?),
            SearchKind::Books => SearchRequest::Books(BookSearchRequest::from_arguments(args)?),
        })
    }
}

fn insert_opt(args: &mut JsonObject, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        args.insert(key.into(), json!(value));
    }
}
