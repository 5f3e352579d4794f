use super::{ModelType, OutputInfo};
use crate::proto::{self, timestamp_from_wire, timestamp_to_wire};
use crate::status::Status;
use crate::types::concept::non_empty;
use crate::utils::json_fields::{opt_str, opt_timestamp, req_str, type_name};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelVersion {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Training state of this version.
    pub status: Option<Status>,
}

impl ModelVersion {
    fn from_json(value: &Value) -> Result<Self> {
        Ok(Self {
            id: req_str(value, "id", "model_version")?,
            created_at: opt_timestamp(value, "created_at")?,
            status: Status::from_json(value),
        })
    }

    fn from_wire(version: &proto::ModelVersion) -> Self {
        Self {
            id: version.id.clone(),
            created_at: version.created_at.as_ref().and_then(timestamp_from_wire),
            status: version.status.as_ref().and_then(Status::from_wire),
        }
    }
}

/// A model registered in the application.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub id: String,
    pub name: Option<String>,
    pub app_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Raw `type_ext`, kept even when the client does not know the type.
    pub type_ext: Option<String>,
    /// Decoded output info; `None` for models of a type the client does not know.
    pub output_info: Option<OutputInfo>,
    pub version: Option<ModelVersion>,
}

impl Model {
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

    pub fn with_output_info(mut self, info: OutputInfo) -> Self {
        self.type_ext = Some(info.model_type().type_ext().to_string());
        self.output_info = Some(info);
        self
    }

    /// The declared model type. Unknown or missing types are an error.
    pub fn model_type(&self) -> Result<ModelType> {
        match &self.type_ext {
            Some(ext) => ModelType::from_type_ext(ext),
            None => Err(Error::UnknownModelType {
                type_ext: String::new(),
            }),
        }
    }

    /// Body object for model creation.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("id".into(), json!(self.id));
        if let Some(name) = &self.name {
            obj.insert("name".into(), json!(name));
        }
        if let Some(info) = &self.output_info {
            obj.insert("output_info".into(), info.to_json());
        }
        Value::Object(obj)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::decode(format!(
                "model must be an object, found {}",
                type_name(value)
            )));
        }
        let info = value.get("output_info").filter(|v| !v.is_null());
        let type_ext = info.and_then(|i| opt_str(i, "type_ext"));
        let output_info = match (info, type_ext.as_deref().map(ModelType::from_type_ext)) {
            (Some(info), Some(Ok(model_type))) => Some(OutputInfo::from_json(model_type, info)?),
            _ => None,
        };
        let version = match value.get("model_version").filter(|v| !v.is_null()) {
            Some(v) => Some(ModelVersion::from_json(v)?),
            None => None,
        };
        Ok(Self {
            id: req_str(value, "id", "model")?,
            name: opt_str(value, "name"),
            app_id: opt_str(value, "app_id"),
            created_at: opt_timestamp(value, "created_at")?,
            type_ext,
            output_info,
            version,
        })
    }

    pub fn to_wire(&self) -> proto::Model {
        let mut output_info = self
            .output_info
            .as_ref()
            .map(OutputInfo::to_wire)
            .unwrap_or_default();
        if let Some(ext) = &self.type_ext {
            output_info.type_ext = ext.clone();
        }
        proto::Model {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_default(),
            created_at: self.created_at.as_ref().map(timestamp_to_wire),
            app_id: self.app_id.clone().unwrap_or_default(),
            output_info: Some(output_info),
            model_version: self.version.as_ref().map(|v| proto::ModelVersion {
                id: v.id.clone(),
                created_at: v.created_at.as_ref().map(timestamp_to_wire),
                status: v.status.as_ref().map(Status::to_wire),
            }),
        }
    }

    pub fn from_wire(model: &proto::Model) -> Result<Self> {
        if model.id.is_empty() {
            return Err(Error::decode("model message has an empty id"));
        }
        let type_ext = model
            .output_info
            .as_ref()
            .and_then(|i| non_empty(&i.type_ext));
        let output_info = match (&model.output_info, type_ext.as_deref().map(ModelType::from_type_ext)) {
            (Some(info), Some(Ok(model_type))) => Some(OutputInfo::from_wire(model_type, info)?),
            _ => None,
        };
        Ok(Self {
            id: model.id.clone(),
            name: non_empty(&model.name),
            app_id: non_empty(&model.app_id),
            created_at: model.created_at.as_ref().and_then(timestamp_from_wire),
            type_ext,
            output_info,
            version: model.model_version.as_ref().map(ModelVersion::from_wire),
        })
    }
}

/// The model that produced an output, as echoed back in prediction replies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelRef {
    pub id: String,
    pub name: Option<String>,
    pub app_id: Option<String>,
    pub version_id: Option<String>,
    pub type_ext: Option<String>,
}

impl ModelRef {
    pub fn from_json(value: &Value) -> Self {
        Self {
            id: opt_str(value, "id").unwrap_or_default(),
            name: opt_str(value, "name"),
            app_id: opt_str(value, "app_id"),
            version_id: value.get("model_version").and_then(|v| opt_str(v, "id")),
            type_ext: value.get("output_info").and_then(|i| opt_str(i, "type_ext")),
        }
    }

    pub fn from_wire(model: &proto::Model) -> Self {
        Self {
            id: model.id.clone(),
            name: non_empty(&model.name),
            app_id: non_empty(&model.app_id),
            version_id: model.model_version.as_ref().and_then(|v| non_empty(&v.id)),
            type_ext: model.output_info.as_ref().and_then(|i| non_empty(&i.type_ext)),
        }
    }
}
