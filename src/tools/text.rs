use super::args;
use super::choice::{Choice, SafeSearch, TimeLimit};
use super::registry::{MAX_RESULTS, PROXY, QUERY, REGION, SAFESEARCH, TEXT_BACKEND, TIMELIMIT, ToolDescriptor};
use super::{SearchKind, insert_opt};
use crate::error::ValidationError;
use rmcp::model::JsonObject;
use serde_json::json;

pub static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "ddgs_text_search",
    kind: SearchKind::Text,
    description: r#"Search the web for text content across multiple search engines.

Supports search operators:
- cats dogs: Results about cats OR dogs
- "exact phrase": Exact match
- cats -dogs: Fewer dogs in results
- cats +dogs: More dogs in results
- filetype:pdf: Specific file types
- site:example.com: Specific domain
- intitle:word: Word in page title
- inurl:word: Word in URL

Regions: us-en, uk-en, cn-zh, etc.
Backends: auto, duckduckgo, wikipedia, mojeek"#,
    params: &[QUERY, REGION, SAFESEARCH, TIMELIMIT, MAX_RESULTS, TEXT_BACKEND, PROXY],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSearchRequest {
    pub query: String,
    pub region: String,
    pub safesearch: SafeSearch,
    pub timelimit: Option<TimeLimit>,
    pub max_results: u32,
    /// Resolved, comma-separated concrete backends.
    pub backend: String,
    pub proxy: Option<String>,
}

impl TextSearchRequest {
    pub fn from_arguments(args: &JsonObject, auto_backend: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            query: args::required_string(args, &QUERY)?,
            region: args::string_or_default(args, &REGION)?,
            safesearch: args::choice_or_default(args, &SAFESEARCH)?,
            timelimit: args::optional_choice(args, &TIMELIMIT)?,
            max_results: args::bounded_integer(args, &MAX_RESULTS)?,
            backend: args::backend(args, &TEXT_BACKEND, auto_backend)?,
            proxy: args::proxy(args, &PROXY)?,
        })
    }

    pub fn to_arguments(&self) -> JsonObject {
        let mut args = JsonObject::new();
        args.insert("query".into(), json!(self.query));
        args.insert("region".into(), json!(self.region));
        args.insert("safesearch".into(), json!(self.safesearch.as_str()));
        insert_opt(&mut args, "timelimit", self.timelimit.map(Choice::as_str));
        args.insert("max_results".into(), json!(self.max_results));
        args.insert("backend".into(), json!(self.backend));
        insert_opt(&mut args, "proxy", self.proxy.as_deref());
        args
    }

    pub fn backends(&self) -> impl Iterator<Item = &str> {
        self.backend.split(',').filter(|b| !b.is_empty())
    }
}
