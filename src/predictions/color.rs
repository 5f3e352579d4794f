use crate::proto;
use crate::utils::json_fields::de_non_empty;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Named web color closest to a detected color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct W3cColor {
    #[serde(default)]
    pub hex: String,
    #[serde(default)]
    pub name: String,
}

/// A dominant color and the fraction of the image it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(deserialize_with = "de_non_empty")]
    pub raw_hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w3c: Option<W3cColor>,
    #[serde(default)]
    pub value: f32,
}

impl Color {
    pub fn from_wire(color: &proto::Color) -> Result<Self> {
        if color.raw_hex.is_empty() {
            return Err(crate::Error::decode("color message has an empty raw_hex"));
        }
        Ok(Self {
            raw_hex: color.raw_hex.clone(),
            w3c: color.w3c.as_ref().map(|w| W3cColor {
                hex: w.hex.clone(),
                name: w.name.clone(),
            }),
            value: color.value,
        })
    }
}
