use super::choice::{
    ImageColor, ImageLayout, ImageLicense, ImageSize, ImageType, SafeSearch, VideoDuration,
    VideoLicense, VideoResolution,
};
use super::{SearchKind, books, images, news, text, videos};
use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
}

impl ParamType {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDefault {
    Str(&'static str),
    Int(i64),
}

/// Contract for a single tool parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub description: &'static str,
    pub allowed: &'static [&'static str],
    pub default: Option<ParamDefault>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    pub required: bool,
}

impl ParamSpec {
    const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::String,
            description,
            allowed: &[],
            default: None,
            minimum: None,
            maximum: None,
            required: false,
        }
    }

    const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    const fn one_of(self, allowed: &'static [&'static str]) -> Self {
        Self { allowed, ..self }
    }

    const fn default_str(self, value: &'static str) -> Self {
        Self { default: Some(ParamDefault::Str(value)), ..self }
    }

    pub fn default_str_value(&self) -> Option<&'static str> {
        match self.default {
            Some(ParamDefault::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn default_int_value(&self) -> Option<i64> {
        match self.default {
            Some(ParamDefault::Int(n)) => Some(n),
            _ => None,
        }
    }

    fn schema(&self) -> Value {
        let mut prop = serde_json::Map::new();
        prop.insert("type".into(), json!(self.ty.as_str()));
        prop.insert("description".into(), json!(self.description));
        if !self.allowed.is_empty() {
            prop.insert("enum".into(), json!(self.allowed));
        }
        match self.default {
            Some(ParamDefault::Str(s)) => {
                prop.insert("default".into(), json!(s));
            }
            Some(ParamDefault::Int(n)) => {
                prop.insert("default".into(), json!(n));
            }
            None => {}
        }
        if let Some(min) = self.minimum {
            prop.insert("minimum".into(), json!(min));
        }
        if let Some(max) = self.maximum {
            prop.insert("maximum".into(), json!(max));
        }
        Value::Object(prop)
    }
}

pub const QUERY: ParamSpec = ParamSpec::string("query", "Search query").required();
pub const REGION: ParamSpec =
    ParamSpec::string("region", "Region code (e.g., us-en, uk-en, cn-zh)").default_str("us-en");
pub const SAFESEARCH: ParamSpec = ParamSpec::string("safesearch", "Safe search level")
    .one_of(SafeSearch::VALUES)
    .default_str("moderate");
pub const TIMELIMIT: ParamSpec =
    ParamSpec::string("timelimit", "Time limit (d=day, w=week, m=month, y=year)").one_of(&["d", "w", "m", "y"]);
pub const TIMELIMIT_DWM: ParamSpec =
    ParamSpec::string("timelimit", "Time limit (d=day, w=week, m=month)").one_of(&["d", "w", "m"]);
pub const MAX_RESULTS: ParamSpec = ParamSpec {
    name: "max_results",
    ty: ParamType::Integer,
    description: "Maximum number of results",
    allowed: &[],
    default: Some(ParamDefault::Int(10)),
    minimum: Some(1),
    maximum: Some(100),
    required: false,
};
pub const TEXT_BACKEND: ParamSpec = ParamSpec::string(
    "backend",
    "Comma-separated list of backends or 'auto' (duckduckgo, wikipedia, mojeek)",
)
.default_str("auto");
pub const NEWS_BACKEND: ParamSpec =
    ParamSpec::string("backend", "Backend: auto or duckduckgo").default_str("auto");
pub const PROXY: ParamSpec =
    ParamSpec::string("proxy", "Proxy URL (http/https/socks5) or 'tb' for Tor Browser");

pub const SIZE: ParamSpec = ParamSpec::string("size", "Image size").one_of(ImageSize::VALUES);
pub const COLOR: ParamSpec = ParamSpec::string("color", "Image color").one_of(ImageColor::VALUES);
pub const TYPE_IMAGE: ParamSpec = ParamSpec::string("type_image", "Image type").one_of(ImageType::VALUES);
pub const LAYOUT: ParamSpec = ParamSpec::string("layout", "Image layout").one_of(ImageLayout::VALUES);
pub const LICENSE_IMAGE: ParamSpec =
    ParamSpec::string("license_image", "Image license").one_of(ImageLicense::VALUES);

pub const RESOLUTION: ParamSpec =
    ParamSpec::string("resolution", "Video resolution").one_of(VideoResolution::VALUES);
pub const DURATION: ParamSpec =
    ParamSpec::string("duration", "Video duration").one_of(VideoDuration::VALUES);
pub const LICENSE_VIDEOS: ParamSpec =
    ParamSpec::string("license_videos", "Video license").one_of(VideoLicense::VALUES);

#[derive(Debug)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub kind: SearchKind,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

impl ToolDescriptor {
    pub fn input_schema(&self) -> JsonObject {
        let properties: serde_json::Map<String, Value> =
            self.params.iter().map(|p| (p.name.to_string(), p.schema())).collect();
        let required: Vec<&str> =
            self.params.iter().filter(|p| p.required).map(|p| p.name).collect();

        let mut schema = JsonObject::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(required));
        schema
    }

    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, Arc::new(self.input_schema()))
    }
}

static TOOLS: [&ToolDescriptor; 5] = [
    &text::DESCRIPTOR,
    &images::DESCRIPTOR,
    &videos::DESCRIPTOR,
    &news::DESCRIPTOR,
    &books::DESCRIPTOR,
];

/// All tools, in the order they are advertised.
pub fn list() -> &'static [&'static ToolDescriptor] {
    &TOOLS
}

pub fn find(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().copied().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn param<'a>(tool: &'a ToolDescriptor, name: &str) -> Option<&'a ParamSpec> {
        tool.params.iter().find(|p| p.name == name)
    }

    #[test]
    fn lists_five_tools_in_stable_order() {
        let names: Vec<&str> = list().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "ddgs_text_search",
                "ddgs_image_search",
                "ddgs_video_search",
                "ddgs_news_search",
                "ddgs_book_search",
            ]
        );
    }

    #[test]
    fn every_tool_requires_query_and_bounds_max_results() {
        for tool in list() {
            let query = param(tool, "query").unwrap();
            assert!(query.required, "{} query", tool.name);

            let max = param(tool, "max_results").unwrap();
            assert_eq!((max.minimum, max.maximum), (Some(1), Some(100)));
            assert_eq!(max.default_int_value(), Some(10));
            assert_eq!(tool.params.iter().filter(|p| p.required).count(), 1);
        }
    }

    #[test]
    fn find_unknown_tool_returns_none() {
        assert!(find("ddgs_maps_search").is_none());
        assert_eq!(find("ddgs_news_search").map(|d| d.kind), Some(SearchKind::News));
    }

    #[test]
    fn schema_carries_enum_default_and_bounds() {
        let schema = find("ddgs_text_search").unwrap().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["query"]));

        let props = &schema["properties"];
        assert_eq!(props["safesearch"]["enum"], json!(["on", "moderate", "off"]));
        assert_eq!(props["safesearch"]["default"], "moderate");
        assert_eq!(props["max_results"]["type"], "integer");
        assert_eq!(props["max_results"]["minimum"], 1);
        assert_eq!(props["max_results"]["maximum"], 100);
        assert_eq!(props["timelimit"]["enum"], json!(["d", "w", "m", "y"]));
        assert!(props["timelimit"].get("default").is_none());
    }

    #[test]
    fn video_and_news_timelimit_exclude_year() {
        for name in ["ddgs_video_search", "ddgs_news_search"] {
            let tool = find(name).unwrap();
            assert_eq!(param(tool, "timelimit").unwrap().allowed, &["d", "w", "m"]);
        }
    }

    #[test]
    fn book_search_has_no_region_or_safesearch() {
        let tool = find("ddgs_book_search").unwrap();
        assert!(param(tool, "region").is_none());
        assert!(param(tool, "safesearch").is_none());
        assert!(param(tool, "proxy").is_some());
    }
}
