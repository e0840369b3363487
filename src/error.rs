use thiserror::Error;

/// Failure raised by a search provider client.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("{backend} responded with HTTP {status}")]
    Status { backend: &'static str, status: u16 },

    #[error("{backend} did not return a search token")]
    MissingToken { backend: &'static str },

    #[error("Backend '{backend}' is not supported for {kind} search")]
    UnsupportedBackend { backend: String, kind: &'static str },

    #[error("Invalid proxy '{proxy}': {message}")]
    InvalidProxy { proxy: String, message: String },
}

/// The constraint an argument violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Constraint {
    #[error("is required")]
    Missing,

    #[error("must be {expected}")]
    TypeMismatch { expected: &'static str },

    #[error("must be one of: {}", .allowed.join(", "))]
    NotInEnum { allowed: &'static [&'static str] },

    #[error("must be between {min} and {max}")]
    OutOfRange { min: i64, max: i64 },

    #[error("must not be empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{param}` {constraint}")]
pub struct ValidationError {
    pub param: &'static str,
    pub constraint: Constraint,
}

impl ValidationError {
    pub fn new(param: &'static str, constraint: Constraint) -> Self {
        Self { param, constraint }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("search worker failed: {0}")]
    Worker(String),
}

/// Every way a single tool invocation can fail.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    Validation(#[from] ValidationError),

    #[error("Search failed: {0}")]
    Search(ProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SearchError> for ToolError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Provider(e) => ToolError::Search(e),
            SearchError::Worker(msg) => ToolError::Internal(msg),
        }
    }
}

impl ToolError {
    /// The one text message returned to the caller for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ToolError::UnknownTool(name) => format!("Error executing search: Unknown tool: {name}"),
            ToolError::Validation(e) => format!("Invalid arguments: {e}"),
            ToolError::Search(e) => {
                format!("Search failed: {e}\nTry a simpler query or different parameters.")
            }
            ToolError::Internal(msg) => {
                format!("Search error: {msg}\nPlease try again with different parameters.")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration invalid: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn validation_message_names_param_and_constraint() {
        let err = ValidationError::new("max_results", Constraint::OutOfRange { min: 1, max: 100 });
        assert_eq!(
            ToolError::from(err).user_message(),
            "Invalid arguments: `max_results` must be between 1 and 100"
        );
    }

    #[test]
    fn enum_constraint_lists_allowed_values() {
        let err = ValidationError::new(
            "safesearch",
            Constraint::NotInEnum { allowed: &["on", "moderate", "off"] },
        );
        assert_eq!(err.to_string(), "`safesearch` must be one of: on, moderate, off");
    }

    #[test]
    fn search_failure_suggests_retry() {
        let err: ToolError = SearchError::Provider(ProviderError::Status {
            backend: "duckduckgo",
            status: 503,
        })
        .into();
        assert_eq!(
            err.user_message(),
            "Search failed: duckduckgo responded with HTTP 503\nTry a simpler query or different parameters."
        );
    }

    #[test]
    fn worker_failure_is_internal() {
        let err: ToolError = SearchError::Worker("task panicked".into()).into();
        assert!(matches!(err, ToolError::Internal(_)));
        assert!(err.user_message().starts_with("Search error: task panicked"));
    }

    #[test]
    fn unknown_tool_message() {
        let err = ToolError::UnknownTool("ddgs_maps_search".into());
        assert_eq!(err.user_message(), "Error executing search: Unknown tool: ddgs_maps_search");
    }
}
