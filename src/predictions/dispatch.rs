//! Tag-keyed decode table for prediction payloads.

use super::{Color, Detection, Embedding, FaceEmbedding, Frame, Prediction, PredictionType};
use crate::proto;
use crate::types::Concept;
use crate::utils::json_fields::{from_value, list};
use crate::{Error, Result};
use serde_json::Value;

/// Prediction data handed to the dispatcher: a JSON `data` object or a decoded wire `Data`.
#[derive(Debug, Clone, Copy)]
pub enum PredictionPayload<'a> {
    Json(&'a Value),
    Wire(&'a proto::Data),
}

struct DecodeEntry {
    container_key: &'static str,
    json: fn(&Value) -> Result<Prediction>,
    wire: fn(&proto::Data) -> Result<Vec<Prediction>>,
}

fn json_concept(v: &Value) -> Result<Prediction> {
    from_value::<Concept>(v, "concept").map(Prediction::Concept)
}

fn json_color(v: &Value) -> Result<Prediction> {
    from_value::<Color>(v, "color").map(Prediction::Color)
}

fn json_embedding(v: &Value) -> Result<Prediction> {
    from_value::<Embedding>(v, "embedding").map(Prediction::Embedding)
}

fn json_face_embedding(v: &Value) -> Result<Prediction> {
    FaceEmbedding::from_json(v).map(Prediction::FaceEmbedding)
}

fn json_frame(v: &Value) -> Result<Prediction> {
    from_value::<Frame>(v, "frame").map(Prediction::Frame)
}

fn json_detection(v: &Value) -> Result<Prediction> {
    Detection::from_json(v).map(Prediction::Detection)
}

fn wire_concepts(d: &proto::Data) -> Result<Vec<Prediction>> {
    d.concepts
        .iter()
        .map(|c| Concept::from_wire(c).map(Prediction::Concept))
        .collect()
}

fn wire_colors(d: &proto::Data) -> Result<Vec<Prediction>> {
    d.colors
        .iter()
        .map(|c| Color::from_wire(c).map(Prediction::Color))
        .collect()
}

fn wire_embeddings(d: &proto::Data) -> Result<Vec<Prediction>> {
    d.embeddings
        .iter()
        .map(|e| Embedding::from_wire(e).map(Prediction::Embedding))
        .collect()
}

fn wire_face_embeddings(d: &proto::Data) -> Result<Vec<Prediction>> {
    d.regions
        .iter()
        .map(|r| FaceEmbedding::from_wire(r).map(Prediction::FaceEmbedding))
        .collect()
}

fn wire_frames(d: &proto::Data) -> Result<Vec<Prediction>> {
    d.frames
        .iter()
        .map(|f| Frame::from_wire(f).map(Prediction::Frame))
        .collect()
}

fn wire_detections(d: &proto::Data) -> Result<Vec<Prediction>> {
    d.regions
        .iter()
        .map(|r| Detection::from_wire(r).map(Prediction::Detection))
        .collect()
}

static CONCEPT: DecodeEntry = DecodeEntry {
    container_key: "concepts",
    json: json_concept,
    wire: wire_concepts,
};

static COLOR: DecodeEntry = DecodeEntry {
    container_key: "colors",
    json: json_color,
    wire: wire_colors,
};

static EMBEDDING: DecodeEntry = DecodeEntry {
    container_key: "embeddings",
    json: json_embedding,
    wire: wire_embeddings,
};

static FACE_EMBEDDING: DecodeEntry = DecodeEntry {
    container_key: "regions",
    json: json_face_embedding,
    wire: wire_face_embeddings,
};

static FRAME: DecodeEntry = DecodeEntry {
    container_key: "frames",
    json: json_frame,
    wire: wire_frames,
};

// Concept detections and plain detections share one shape.
static DETECTION: DecodeEntry = DecodeEntry {
    container_key: "regions",
    json: json_detection,
    wire: wire_detections,
};

fn entry(kind: PredictionType) -> &'static DecodeEntry {
    match kind {
        PredictionType::Color => &COLOR,
        PredictionType::Concept => &CONCEPT,
        PredictionType::Embedding => &EMBEDDING,
        PredictionType::FaceEmbedding => &FACE_EMBEDDING,
        PredictionType::Frame => &FRAME,
        PredictionType::DetectConcept | PredictionType::Detection => &DETECTION,
    }
}

pub(super) fn container_key(kind: PredictionType) -> &'static str {
    entry(kind).container_key
}

// Points a decode failure at the offending container element.
fn locate(err: Error, key: &str, index: usize, kind: PredictionType) -> Error {
    match err {
        Error::Decode { message, mut context } => {
            let inner = context.field_path.take();
            context.field_path = Some(match inner {
                Some(path) => format!("{}[{}].{}", key, index, path),
                None => format!("{}[{}]", key, index),
            });
            if context.source.is_none() {
                context.source = Some(kind.as_str().to_string());
            }
            Error::Decode { message, context }
        }
        other => other,
    }
}

/// Decode every prediction of `kind` found in `payload`, preserving service order.
///
/// A missing container yields an empty list. A container of the wrong shape or
/// an element that fails to decode is reported as [`crate::Error::Decode`].
pub fn decode(kind: PredictionType, payload: PredictionPayload<'_>) -> Result<Vec<Prediction>> {
    let entry = entry(kind);
    match payload {
        PredictionPayload::Json(data) => list(data, entry.container_key, kind.as_str())?
            .iter()
            .enumerate()
            .map(|(i, item)| {
                (entry.json)(item).map_err(|e| locate(e, entry.container_key, i, kind))
            })
            .collect(),
        PredictionPayload::Wire(data) => (entry.wire)(data),
    }
}

/// Decode predictions from a JSON `data` object, dispatching on the raw tag string.
pub fn decode_json(tag: &str, data: &Value) -> Result<Vec<Prediction>> {
    decode(PredictionType::from_tag(tag)?, PredictionPayload::Json(data))
}

/// Decode predictions from a wire `Data` message, dispatching on the raw tag string.
pub fn decode_wire(tag: &str, data: &proto::Data) -> Result<Vec<Prediction>> {
    decode(PredictionType::from_tag(tag)?, PredictionPayload::Wire(data))
}
