use super::args;
use super::registry::{MAX_RESULTS, PROXY, QUERY, ToolDescriptor};
use super::{SearchKind, insert_opt};
use crate::error::ValidationError;
use rmcp::model::JsonObject;
use serde_json::json;

pub static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "ddgs_book_search",
    kind: SearchKind::Books,
    description: "Search for books across Anna's Archive (title, author, ISBN, etc.)",
    params: &[QUERY, MAX_RESULTS, PROXY],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSearchRequest {
    pub query: String,
    pub max_results: u32,
    pub proxy: Option<String>,
}

impl BookSearchRequest {
    pub fn from_arguments(args: &JsonObject) -> Result<Self, ValidationError> {
        Ok(Self {
            query: args::required_string(args, &QUERY)?,
            max_results: args::bounded_integer(args, &MAX_RESULTS)?,
            proxy: args::proxy(args, &PROXY)?,
        })
    }

    pub fn to_arguments(&self) -> JsonObject {
        let mut args = JsonObject::new();
        args.insert("query".into(), json!(self.query));
        args.insert("max_results".into(), json!(self.max_results));
        insert_opt(&mut args, "proxy", self.proxy.as_deref());
        args
    }
}
