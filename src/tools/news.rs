use super::args;
use super::choice::{Choice, SafeSearch, TimeLimit};
use super::registry::{MAX_RESULTS, NEWS_BACKEND, PROXY, QUERY, REGION, SAFESEARCH, TIMELIMIT_DWM, ToolDescriptor};
use super::{SearchKind, insert_opt};
use crate::error::ValidationError;
use rmcp::model::JsonObject;
use serde_json::json;

/// News has a single concrete backend, so `auto` always lands here.
pub const AUTO_BACKEND: &str = "duckduckgo";

pub static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "ddgs_news_search",
    kind: SearchKind::News,
    description: "Search for news articles from multiple sources",
    params: &[QUERY, REGION, SAFESEARCH, TIMELIMIT_DWM, MAX_RESULTS, NEWS_BACKEND, PROXY],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSearchRequest {
    pub query: String,
    pub region: String,
    pub safesearch: SafeSearch,
    pub timelimit: Option<TimeLimit>,
    pub max_results: u32,
    pub backend: String,
    pub proxy: Option<String>,
}

impl NewsSearchRequest {
    pub fn from_arguments(args: &JsonObject) -> Result<Self, ValidationError> {
        Ok(Self {
            query: args::required_string(args, &QUERY)?,
            region: args::string_or_default(args, &REGION)?,
            safesearch: args::choice_or_default(args, &SAFESEARCH)?,
            timelimit: args::optional_choice(args, &TIMELIMIT_DWM)?,
            max_results: args::bounded_integer(args, &MAX_RESULTS)?,
            backend: args::backend(args, &NEWS_BACKEND, AUTO_BACKEND)?,
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
