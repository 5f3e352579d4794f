//! Concept: a named label, either user-defined or predicted by a model.

use crate::proto::{self, timestamp_from_wire, timestamp_to_wire};
use crate::utils::json_fields::{
    de_confidence, de_non_empty, de_opt_str, de_opt_timestamp, from_value, non_zero,
};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Concept {
    #[serde(deserialize_with = "de_non_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_str", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Confidence for predictions, presence (1.0) or absence (0.0) for user tags.
    /// A decoded zero reads as `None` in both the JSON and the wire form.
    #[serde(default, deserialize_with = "de_confidence", skip_serializing_if = "Option::is_none")]
    pub value: Option<f32>,
    #[serde(default, deserialize_with = "de_opt_str", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_timestamp", skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Concept {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        from_value(value, "concept")
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn from_wire(concept: &proto::Concept) -> Result<Self> {
        if concept.id.is_empty() {
            return Err(Error::decode("concept message has an empty id"));
        }
        Ok(Self {
            id: concept.id.clone(),
            name: non_empty(&concept.name),
            value: non_zero(concept.value),
            app_id: non_empty(&concept.app_id),
            created_at: concept.created_at.as_ref().and_then(timestamp_from_wire),
        })
    }

    pub fn to_wire(&self) -> proto::Concept {
        proto::Concept {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_default(),
            value: self.value.unwrap_or_default(),
            created_at: self.created_at.as_ref().map(timestamp_to_wire),
            language: String::new(),
            app_id: self.app_id.clone().unwrap_or_default(),
        }
    }
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

pub(crate) fn concepts_from_json(items: &[Value]) -> Result<Vec<Concept>> {
    items.iter().map(Concept::from_json).collect()
}

pub(crate) fn concepts_from_wire(items: &[proto::Concept]) -> Result<Vec<Concept>> {
    items.iter().map(Concept::from_wire).collect()
}
