//! 模型模块：模型类型、输出配置与模型实体。
//!
//! # Models Module
//!
//! Every model advertises a `type_ext` string in its output info. The client
//! maps it onto [`ModelType`], which in turn decides how prediction payloads
//! from that model are decoded.

mod model;
mod output_info;

pub use model::{Model, ModelRef, ModelVersion};
pub use output_info::OutputInfo;

use crate::predictions::PredictionType;
use crate::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelType {
    Concept,
    Color,
    Embedding,
    FaceDetection,
    FaceEmbedding,
    Demographics,
    FaceConcepts,
    Focus,
    Logo,
    Detection,
    Video,
}

impl ModelType {
    pub const ALL: [ModelType; 11] = [
        ModelType::Concept,
        ModelType::Color,
        ModelType::Embedding,
        ModelType::FaceDetection,
        ModelType::FaceEmbedding,
        ModelType::Demographics,
        ModelType::FaceConcepts,
        ModelType::Focus,
        ModelType::Logo,
        ModelType::Detection,
        ModelType::Video,
    ];

    pub fn type_ext(&self) -> &'static str {
        match self {
            ModelType::Concept => "concept",
            ModelType::Color => "color",
            ModelType::Embedding => "embed",
            ModelType::FaceDetection => "facedetect",
            ModelType::FaceEmbedding => "facedetect-embed",
            ModelType::Demographics => "facedetect-demographics",
            ModelType::FaceConcepts => "facedetect-identity",
            ModelType::Focus => "focus",
            ModelType::Logo => "logo",
            ModelType::Detection => "detect-concept",
            ModelType::Video => "video",
        }
    }

    pub fn from_type_ext(type_ext: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.type_ext() == type_ext)
            .ok_or_else(|| Error::UnknownModelType {
                type_ext: type_ext.to_string(),
            })
    }

    /// Shape of this model's predictions, `None` when the client has no decoder for it.
    pub fn prediction_type(&self) -> Option<PredictionType> {
        match self {
            ModelType::Concept => Some(PredictionType::Concept),
            ModelType::Color => Some(PredictionType::Color),
            ModelType::Embedding => Some(PredictionType::Embedding),
            ModelType::FaceEmbedding => Some(PredictionType::FaceEmbedding),
            ModelType::FaceDetection | ModelType::Demographics | ModelType::FaceConcepts => {
                Some(PredictionType::Detection)
            }
            ModelType::Logo | ModelType::Detection => Some(PredictionType::DetectConcept),
            ModelType::Video => Some(PredictionType::Frame),
            ModelType::Focus => None,
        }
    }

    /// Like [`ModelType::prediction_type`], but a missing decoder is an error naming the type.
    pub fn require_prediction_type(&self) -> Result<PredictionType> {
        self.prediction_type()
            .ok_or_else(|| Error::UnsupportedPredictionType {
                tag: self.type_ext().to_string(),
            })
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_ext())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ext_round_trip() {
        for t in ModelType::ALL {
            assert_eq!(ModelType::from_type_ext(t.type_ext()).unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_type_ext() {
        let err = ModelType::from_type_ext("segmenter").unwrap_err();
        assert_eq!(err.to_string(), "Unknown model type: segmenter");
    }

    #[test]
    fn test_focus_has_no_decoder() {
        assert_eq!(ModelType::Focus.prediction_type(), None);
        let err = ModelType::Focus.require_prediction_type().unwrap_err();
        assert!(matches!(err, Error::UnsupportedPredictionType { ref tag } if tag == "focus"));
    }

    #[test]
    fn test_face_models_decode_regions() {
        for t in [ModelType::FaceDetection, ModelType::Demographics, ModelType::FaceConcepts] {
            assert_eq!(t.prediction_type().unwrap().container_key(), "regions");
        }
        assert_eq!(ModelType::Video.prediction_type(), Some(PredictionType::Frame));
    }
}
