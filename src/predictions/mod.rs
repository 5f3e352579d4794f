//! 预测结果模块：按模型类型标签解码多态预测。
//!
//! # Predictions Module
//!
//! A model's output carries predictions whose shape depends on the kind of
//! model that produced them. The caller (or the model metadata) supplies the
//! [`PredictionType`]; [`decode`] reads the container key that type owns and
//! turns every element into a [`Prediction`].
//!
//! | Tag | Container key | Variant |
//! |-----|---------------|---------|
//! | `color` | `colors` | [`Prediction::Color`] |
//! | `concept` | `concepts` | [`Prediction::Concept`] |
//! | `embed` | `embeddings` | [`Prediction::Embedding`] |
//! | `facedetect-embed` | `regions` | [`Prediction::FaceEmbedding`] |
//! | `video` | `frames` | [`Prediction::Frame`] |
//! | `detect-concept` | `regions` | [`Prediction::Detection`] |
//! | `detection` | `regions` | [`Prediction::Detection`] |

mod color;
mod dispatch;
mod embedding;
mod frame;
mod region;

pub use color::{Color, W3cColor};
pub use dispatch::{decode, decode_json, decode_wire, PredictionPayload};
pub use embedding::Embedding;
pub use frame::{Frame, FrameInfo};
pub use region::{Detection, FaceAttributes, FaceEmbedding};

use crate::types::Concept;
use crate::{Error, Result};
use std::fmt;

/// Closed set of prediction shapes the client can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionType {
    Color,
    Concept,
    Embedding,
    FaceEmbedding,
    Frame,
    DetectConcept,
    Detection,
}

impl PredictionType {
    pub const ALL: [PredictionType; 7] = [
        PredictionType::Color,
        PredictionType::Concept,
        PredictionType::Embedding,
        PredictionType::FaceEmbedding,
        PredictionType::Frame,
        PredictionType::DetectConcept,
        PredictionType::Detection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionType::Color => "color",
            PredictionType::Concept => "concept",
            PredictionType::Embedding => "embed",
            PredictionType::FaceEmbedding => "facedetect-embed",
            PredictionType::Frame => "video",
            PredictionType::DetectConcept => "detect-concept",
            PredictionType::Detection => "detection",
        }
    }

    /// Parse a type tag. Unknown tags are a contract violation, never a silent default.
    pub fn from_tag(tag: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| Error::UnsupportedPredictionType {
                tag: tag.to_string(),
            })
    }

    /// Key of the `data` field holding this type's predictions.
    pub fn container_key(&self) -> &'static str {
        dispatch::container_key(*self)
    }
}

impl fmt::Display for PredictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded prediction.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Concept(Concept),
    Color(Color),
    Embedding(Embedding),
    FaceEmbedding(FaceEmbedding),
    Frame(Frame),
    Detection(Detection),
}

impl Prediction {
    pub fn as_concept(&self) -> Option<&Concept> {
        match self {
            Prediction::Concept(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Prediction::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_embedding(&self) -> Option<&Embedding> {
        match self {
            Prediction::Embedding(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_face_embedding(&self) -> Option<&FaceEmbedding> {
        match self {
            Prediction::FaceEmbedding(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            Prediction::Frame(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_detection(&self) -> Option<&Detection> {
        match self {
            Prediction::Detection(d) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto;
    use serde_json::json;

    #[test]
    fn test_from_tag_round_trips_every_type() {
        for t in PredictionType::ALL {
            assert_eq!(PredictionType::from_tag(t.as_str()).unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_tag_names_the_tag() {
        let err = PredictionType::from_tag("focus").unwrap_err();
        assert!(matches!(err, Error::UnsupportedPredictionType { ref tag } if tag == "focus"));
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_container_keys() {
        assert_eq!(PredictionType::Color.container_key(), "colors");
        assert_eq!(PredictionType::Concept.container_key(), "concepts");
        assert_eq!(PredictionType::Embedding.container_key(), "embeddings");
        assert_eq!(PredictionType::FaceEmbedding.container_key(), "regions");
        assert_eq!(PredictionType::Frame.container_key(), "frames");
        assert_eq!(PredictionType::DetectConcept.container_key(), "regions");
        assert_eq!(PredictionType::Detection.container_key(), "regions");
    }

    #[test]
    fn test_concepts_decode_in_order() {
        let data = json!({
            "concepts": [
                {"id": "ai_1", "name": "dog", "value": 0.98},
                {"id": "ai_2", "name": "cat", "value": 0.5},
                {"id": "ai_3", "name": "fox", "value": 0.1}
            ]
        });
        let preds = decode(PredictionType::Concept, PredictionPayload::Json(&data)).unwrap();
        let ids: Vec<_> = preds
            .iter()
            .map(|p| p.as_concept().unwrap().id.as_str())
            .collect();
        assert_eq!(ids, ["ai_1", "ai_2", "ai_3"]);
    }

    #[test]
    fn test_missing_container_is_empty() {
        let data = json!({});
        for t in PredictionType::ALL {
            assert!(decode(t, PredictionPayload::Json(&data)).unwrap().is_empty());
            assert!(decode(t, PredictionPayload::Wire(&proto::Data::default()))
                .unwrap()
                .is_empty());
        }
        let null = json!({"colors": null});
        assert!(decode_json("color", &null).unwrap().is_empty());
    }

    #[test]
    fn test_container_of_wrong_shape_is_decode_error() {
        let data = json!({"colors": {"raw_hex": "#ffffff"}});
        let err = decode_json("color", &data).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_bad_element_points_at_index() {
        let data = json!({"colors": [{"raw_hex": "#000000", "value": 0.2}, {"value": 0.1}]});
        let err = decode_json("color", &data).unwrap_err();
        let ctx = err.context().unwrap();
        assert_eq!(ctx.field_path.as_deref(), Some("colors[1]"));
        assert!(err.to_string().contains("missing field `raw_hex`"));
    }

    #[test]
    fn test_color_json_and_wire_agree() {
        let data = json!({
            "colors": [{"raw_hex": "#f2f2f2", "w3c": {"hex": "#f0f8ff", "name": "AliceBlue"}, "value": 0.25}]
        });
        let wire = proto::Data {
            colors: vec![proto::Color {
                raw_hex: "#f2f2f2".into(),
                w3c: Some(proto::W3c {
                    hex: "#f0f8ff".into(),
                    name: "AliceBlue".into(),
                }),
                value: 0.25,
            }],
            ..Default::default()
        };
        let from_json = decode_json("color", &data).unwrap();
        let from_wire = decode_wire("color", &wire).unwrap();
        assert_eq!(from_json, from_wire);
        let color = from_json[0].as_color().unwrap();
        assert_eq!(color.w3c.as_ref().unwrap().name, "AliceBlue");
    }

    #[test]
    fn test_embedding_dimensions_default_to_vector_length() {
        let data = json!({"embeddings": [{"vector": [0.1, 0.2, 0.3]}]});
        let preds = decode_json("embed", &data).unwrap();
        assert_eq!(preds[0].as_embedding().unwrap().num_dimensions, 3);

        let wire = proto::Data {
            embeddings: vec![proto::Embedding {
                vector: vec![0.1, 0.2, 0.3],
                num_dimensions: 0,
            }],
            ..Default::default()
        };
        assert_eq!(decode_wire("embed", &wire).unwrap(), preds);
    }

    #[test]
    fn test_frames_decode() {
        let data = json!({
            "frames": [
                {"frame_info": {"index": 0, "time": 0}, "data": {"concepts": [{"id": "a", "value": 0.9}]}},
                {"frame_info": {"index": 1, "time": 1000}, "data": {"concepts": []}}
            ]
        });
        let preds = decode_json("video", &data).unwrap();
        assert_eq!(preds.len(), 2);
        let second = preds[1].as_frame().unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.time, 1000);
        assert!(second.concepts.is_empty());
    }

    #[test]
    fn test_detect_concept_and_detection_share_decoder() {
        let data = json!({
            "regions": [{
                "id": "r1",
                "region_info": {"bounding_box": {"top_row": 0.1, "left_col": 0.2, "bottom_row": 0.7, "right_col": 0.8}},
                "data": {"concepts": [{"id": "face", "value": 0.99}]}
            }]
        });
        let a = decode_json("detect-concept", &data).unwrap();
        let b = decode_json("detection", &data).unwrap();
        assert_eq!(a, b);
        let det = a[0].as_detection().unwrap();
        assert_eq!(det.id.as_deref(), Some("r1"));
        assert_eq!(det.crop.unwrap().bottom(), 0.7);
        assert!(det.face.is_none());
    }

    #[test]
    fn test_detection_face_attributes_json_and_wire_agree() {
        let data = json!({
            "regions": [{
                "id": "r1",
                "data": {"face": {
                    "identity": {"concepts": [{"id": "celeb", "name": "someone", "value": 0.4}]},
                    "age_appearance": {"concepts": [{"id": "30", "value": 0.6}]}
                }}
            }]
        });
        let wire = proto::Data {
            regions: vec![proto::Region {
                id: "r1".into(),
                region_info: None,
                data: Some(proto::Data {
                    face: Some(proto::Face {
                        identity: Some(proto::ConceptList {
                            concepts: vec![proto::Concept {
                                id: "celeb".into(),
                                name: "someone".into(),
                                value: 0.4,
                                ..Default::default()
                            }],
                        }),
                        age_appearance: Some(proto::ConceptList {
                            concepts: vec![proto::Concept {
                                id: "30".into(),
                                value: 0.6,
                                ..Default::default()
                            }],
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
            }],
            ..Default::default()
        };
        let from_json = decode_json("detection", &data).unwrap();
        assert_eq!(from_json, decode_wire("detection", &wire).unwrap());
        let face = from_json[0].as_detection().unwrap().face.as_ref().unwrap();
        assert_eq!(face.identity[0].name.as_deref(), Some("someone"));
        assert_eq!(face.age_appearance.len(), 1);
        assert!(face.gender_appearance.is_empty());
    }

    #[test]
    fn test_face_embedding_regions() {
        let data = json!({
            "regions": [{
                "id": "f1",
                "data": {"embeddings": [{"vector": [1.0, 2.0], "num_dimensions": 2}]}
            }]
        });
        let preds = decode_json("facedetect-embed", &data).unwrap();
        let face = preds[0].as_face_embedding().unwrap();
        assert_eq!(face.embeddings[0].vector, vec![1.0, 2.0]);
        assert!(face.crop.is_none());
    }
}
