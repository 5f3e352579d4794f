//! Output of one model applied to one input.

use crate::models::{ModelRef, ModelType};
use crate::predictions::{self, Prediction, PredictionPayload};
use crate::proto::{self, timestamp_from_wire};
use crate::status::Status;
use crate::types::concept::non_empty;
use crate::types::Input;
use crate::utils::json_fields::{opt_str, opt_timestamp, NULL};
use crate::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ClarifaiOutput {
    pub id: Option<String>,
    pub status: Option<Status>,
    pub created_at: Option<DateTime<Utc>>,
    pub input: Option<Input>,
    pub model: Option<ModelRef>,
    pub predictions: Vec<Prediction>,
}

impl ClarifaiOutput {
    /// Decode one entry of a reply's `outputs` list.
    ///
    /// `model_type` decides which container of `data` holds the predictions.
    /// Nothing is returned when any part fails to decode.
    pub fn from_json(model_type: ModelType, value: &Value) -> Result<Self> {
        let kind = model_type.require_prediction_type()?;
        let data = value.get("data").unwrap_or(&NULL);
        let predictions = predictions::decode(kind, PredictionPayload::Json(data))?;
        let input = match value.get("input").filter(|v| !v.is_null()) {
            Some(input) => Some(Input::from_json(input)?),
            None => None,
        };
        Ok(Self {
            id: opt_str(value, "id"),
            status: Status::from_json(value),
            created_at: opt_timestamp(value, "created_at")?,
            input,
            model: value
                .get("model")
                .filter(|v| v.is_object())
                .map(ModelRef::from_json),
            predictions,
        })
    }

    pub fn from_wire(model_type: ModelType, output: &proto::Output) -> Result<Self> {
        let kind = model_type.require_prediction_type()?;
        let predictions = match &output.data {
            Some(data) => predictions::decode(kind, PredictionPayload::Wire(data))?,
            None => Vec::new(),
        };
        Ok(Self {
            id: non_empty(&output.id),
            status: output.status.as_ref().and_then(Status::from_wire),
            created_at: output.created_at.as_ref().and_then(timestamp_from_wire),
            input: output.input.as_ref().map(Input::from_wire).transpose()?,
            model: output.model.as_ref().map(ModelRef::from_wire),
            predictions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    fn color_output_json() -> Value {
        json!({
            "id": "out-1",
            "status": {"code": 10000, "description": "Ok"},
            "created_at": "2019-01-29T16:45:43.793810775Z",
            "model": {"id": "eeed0b6733a644cea07cf4c60f87ebb7", "name": "color", "model_version": {"id": "dd9458324b4b45c2be1a7ba84d27cd04"}},
            "input": {"id": "in-1", "data": {"image": {"url": "https://samples.clarifai.com/metro-north.jpg"}}},
            "data": {"colors": [
                {"raw_hex": "#f2f2f2", "w3c": {"hex": "#f5f5f5", "name": "WhiteSmoke"}, "value": 0.929},
                {"raw_hex": "#686078", "w3c": {"hex": "#708090", "name": "SlateGray"}, "value": 0.0515}
            ]}
        })
    }

    #[test]
    fn test_color_output_from_json() {
        let output = ClarifaiOutput::from_json(ModelType::Color, &color_output_json()).unwrap();
        assert_eq!(output.predictions.len(), 2);
        assert_eq!(output.predictions[1].as_color().unwrap().raw_hex, "#686078");
        assert!(output.status.as_ref().unwrap().is_successful());
        let model = output.model.unwrap();
        assert_eq!(model.version_id.as_deref(), Some("dd9458324b4b45c2be1a7ba84d27cd04"));
        assert_eq!(output.input.unwrap().id.as_deref(), Some("in-1"));
    }

    #[test]
    fn test_focus_output_is_rejected() {
        let err = ClarifaiOutput::from_json(ModelType::Focus, &color_output_json()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedPredictionType { ref tag } if tag == "focus"));
        let err = ClarifaiOutput::from_wire(ModelType::Focus, &proto::Output::default()).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_wrong_container_shape_fails_whole_output() {
        let mut value = color_output_json();
        value["data"]["colors"] = json!("not a list");
        assert!(ClarifaiOutput::from_json(ModelType::Color, &value).is_err());
    }

    #[test]
    fn test_wire_output_without_data_has_no_predictions() {
        let output = ClarifaiOutput::from_wire(
            ModelType::Concept,
            &proto::Output {
                id: "o".into(),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(output.predictions.is_empty());
        assert_eq!(output.id.as_deref(), Some("o"));
    }
}
