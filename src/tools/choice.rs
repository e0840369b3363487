use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A closed set of string values accepted by a tool parameter.
///
/// Wire names live on the serde renames; `as_str` repeats them as `'static`
/// strings for the registry's const tables and for building provider URLs.
pub trait Choice: Sized + Copy + DeserializeOwned {
    fn as_str(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        serde_json::from_value(Value::String(value.to_string())).ok()
    }
}

macro_rules! choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($value),+];
        }

        impl Choice for $name {
            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice!(SafeSearch { On => "on", Moderate => "moderate", Off => "off" });

choice!(
    /// Recency window: day, week, month or year.
    TimeLimit { Day => "d", Week => "w", Month => "m", Year => "y" }
);

choice!(ImageSize { Small => "Small", Medium => "Medium", Large => "Large", Wallpaper => "Wallpaper" });

choice!(ImageColor {
    Color => "color",
    Monochrome => "Monochrome",
    Red => "Red",
    Orange => "Orange",
    Yellow => "Yellow",
    Green => "Green",
    Blue => "Blue",
    Purple => "Purple",
    Pink => "Pink",
    Brown => "Brown",
    Black => "Black",
    Gray => "Gray",
    Teal => "Teal",
    White => "White",
});

choice!(ImageType {
    Photo => "photo",
    Clipart => "clipart",
    Gif => "gif",
    Transparent => "transparent",
    Line => "line",
});

choice!(ImageLayout { Square => "Square", Tall => "Tall", Wide => "Wide" });

choice!(ImageLicense {
    Any => "any",
    Public => "Public",
    Share => "Share",
    ShareCommercially => "ShareCommercially",
    Modify => "Modify",
    ModifyCommercially => "ModifyCommercially",
});

choice!(VideoResolution { High => "high", Standard => "standard" });

choice!(VideoDuration { Short => "short", Medium => "medium", Long => "long" });

choice!(VideoLicense { CreativeCommon => "creativeCommon", Youtube => "youtube" });
