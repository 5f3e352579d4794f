use super::input::Input;
use crate::proto;
use crate::utils::json_fields::opt_f32;
use crate::{Error, Result};
use serde_json::Value;

/// One search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub score: f32,
    pub input: Input,
}

impl SearchHit {
    pub fn from_json(hit: &Value) -> Result<Self> {
        let input = hit
            .get("input")
            .ok_or_else(|| Error::decode("search hit has no input"))?;
        Ok(Self {
            score: opt_f32(hit, "score").unwrap_or_default(),
            input: Input::from_json(input)?,
        })
    }

    pub fn from_wire(hit: &proto::Hit) -> Result<Self> {
        let input = hit
            .input
            .as_ref()
            .ok_or_else(|| Error::decode("search hit has no input"))?;
        Ok(Self {
            score: hit.score,
            input: Input::from_wire(input)?,
        })
    }
}
