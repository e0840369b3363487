use super::args;
use super::choice::{Choice, ImageColor, ImageLayout, ImageLicense, ImageSize, ImageType, SafeSearch, TimeLimit};
use super::registry::{
    COLOR, LAYOUT, LICENSE_IMAGE, MAX_RESULTS, PROXY, QUERY, REGION, SAFESEARCH, SIZE, TIMELIMIT, TYPE_IMAGE,
    ToolDescriptor,
};
use super::{SearchKind, insert_opt};
use crate::error::ValidationError;
use rmcp::model::JsonObject;
use serde_json::json;

pub static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "ddgs_image_search",
    kind: SearchKind::Images,
    description: "Search for images with advanced filtering options",
    params: &[
        QUERY,
        REGION,
        SAFESEARCH,
        TIMELIMIT,
        MAX_RESULTS,
        SIZE,
        COLOR,
        TYPE_IMAGE,
        LAYOUT,
        LICENSE_IMAGE,
        PROXY,
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSearchRequest {
    pub query: String,
    pub region: String,
    pub safesearch: SafeSearch,
    pub timelimit: Option<TimeLimit>,
    pub max_results: u32,
    pub size: Option<ImageSize>,
    pub color: Option<ImageColor>,
    pub type_image: Option<ImageType>,
    pub layout: Option<ImageLayout>,
    pub license_image: Option<ImageLicense>,
    pub proxy: Option<String>,
}

impl ImageSearchRequest {
    pub fn from_arguments(args: &JsonObject) -> Result<Self, ValidationError> {
        Ok(Self {
            query: args::required_string(args, &QUERY)?,
            region: args::string_or_default(args, &REGION)?,
            safesearch: args::choice_or_default(args, &SAFESEARCH)?,
            timelimit: args::optional_choice(args, &TIMELIMIT)?,
            max_results: args::bounded_integer(args, &MAX_RESULTS)?,
            size: args::optional_choice(args, &SIZE)?,
            color: args::optional_choice(args, &COLOR)?,
            type_image: args::optional_choice(args, &TYPE_IMAGE)?,
            layout: args::optional_choice(args, &LAYOUT)?,
            license_image: args::optional_choice(args, &LICENSE_IMAGE)?,
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
        insert_opt(&mut args, "size", self.size.map(Choice::as_str));
        insert_opt(&mut args, "color", self.color.map(Choice::as_str));
        insert_opt(&mut args, "type_image", self.type_image.map(Choice::as_str));
        insert_opt(&mut args, "layout", self.layout.map(Choice::as_str));
        insert_opt(&mut args, "license_image", self.license_image.map(Choice::as_str));
        insert_opt(&mut args, "proxy", self.proxy.as_deref());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Constraint;
    use serde_json::Value;

    fn obj(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn parses_filters() {
        let args = obj(json!({
            "query": "sunset",
            "size": "Wallpaper",
            "color": "Monochrome",
            "type_image": "photo",
            "layout": "Wide",
            "license_image": "Public",
        }));
        let req = ImageSearchRequest::from_arguments(&args).unwrap();
        assert_eq!(req.size, Some(ImageSize::Wallpaper));
        assert_eq!(req.color, Some(ImageColor::Monochrome));
        assert_eq!(req.type_image, Some(ImageType::Photo));
        assert_eq!(req.layout, Some(ImageLayout::Wide));
        assert_eq!(req.license_image, Some(ImageLicense::Public));
        assert_eq!(ImageSearchRequest::from_arguments(&req.to_arguments()).unwrap(), req);
    }

    #[test]
    fn rejects_filter_outside_enum() {
        let args = obj(json!({"query": "sunset", "layout": "Round"}));
        let err = ImageSearchRequest::from_arguments(&args).unwrap_err();
        assert_eq!(err.param, "layout");
        assert_eq!(err.constraint, Constraint::NotInEnum { allowed: ImageLayout::VALUES });
    }

    #[test]
    fn rejects_filter_with_wrong_type() {
        let args = obj(json!({"query": "sunset", "size": 3}));
        let err = ImageSearchRequest::from_arguments(&args).unwrap_err();
        assert_eq!(err.param, "size");
    }
}
