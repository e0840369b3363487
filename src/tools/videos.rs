use super::args;
use super::choice::{Choice, SafeSearch, TimeLimit, VideoDuration, VideoLicense, VideoResolution};
use super::registry::{
    DURATION, LICENSE_VIDEOS, MAX_RESULTS, PROXY, QUERY, REGION, RESOLUTION, SAFESEARCH, TIMELIMIT_DWM,
    ToolDescriptor,
};
use super::{SearchKind, insert_opt};
use crate::error::ValidationError;
use rmcp::model::JsonObject;
use serde_json::json;

pub static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "ddgs_video_search",
    kind: SearchKind::Videos,
    description: "Search for videos with filtering options",
    params: &[
        QUERY,
        REGION,
        SAFESEARCH,
        TIMELIMIT_DWM,
        MAX_RESULTS,
        RESOLUTION,
        DURATION,
        LICENSE_VIDEOS,
        PROXY,
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSearchRequest {
    pub query: String,
    pub region: String,
    pub safesearch: SafeSearch,
    pub timelimit: Option<TimeLimit>,
    pub max_results: u32,
    pub resolution: Option<VideoResolution>,
    pub duration: Option<VideoDuration>,
    pub license_videos: Option<VideoLicense>,
    pub proxy: Option<String>,
}

impl VideoSearchRequest {
    pub fn from_arguments(args: &JsonObject) -> Result<Self, ValidationError> {
        Ok(Self {
            query: args::required_string(args, &QUERY)?,
            region: args::string_or_default(args, &REGION)?,
            safesearch: args::choice_or_default(args, &SAFESEARCH)?,
            timelimit: args::optional_choice(args, &TIMELIMIT_DWM)?,
            max_results: args::bounded_integer(args, &MAX_RESULTS)?,
            resolution: args::optional_choice(args, &RESOLUTION)?,
            duration: args::optional_choice(args, &DURATION)?,
            license_videos: args::optional_choice(args, &LICENSE_VIDEOS)?,
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
        insert_opt(&mut args, "resolution", self.resolution.map(Choice::as_str));
        insert_opt(&mut args, "duration", self.duration.map(Choice::as_str));
        insert_opt(&mut args, "license_videos", self.license_videos.map(Choice::as_str));
        insert_opt(&mut args, "proxy", self.proxy.as_deref());
        args
    }
}
