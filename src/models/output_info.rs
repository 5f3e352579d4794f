use super::ModelType;
use crate::proto;
use crate::types::concept::{concepts_from_json, concepts_from_wire};
use crate::types::Concept;
use crate::utils::json_fields::list;
use crate::Result;
use serde_json::{json, Map, Value};

/// Output configuration sent when creating a model.
///
/// The face and focus variants are accepted for compatibility with older model
/// families; they carry nothing and serialize to an empty object.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputInfo {
    Concept {
        concepts: Vec<Concept>,
        concepts_mutually_exclusive: bool,
        closed_environment: bool,
    },
    Color,
    Embedding,
    Detection {
        concepts: Vec<Concept>,
    },
    Logo {
        concepts: Vec<Concept>,
    },
    Video {
        concepts: Vec<Concept>,
    },
    Demographics,
    FaceDetection,
    Focus,
    FaceEmbedding,
    FaceConcepts,
}

impl OutputInfo {
    pub fn concept(concepts: Vec<Concept>) -> Self {
        OutputInfo::Concept {
            concepts,
            concepts_mutually_exclusive: false,
            closed_environment: false,
        }
    }

    pub fn model_type(&self) -> ModelType {
        match self {
            OutputInfo::Concept { .. } => ModelType::Concept,
            OutputInfo::Color => ModelType::Color,
            OutputInfo::Embedding => ModelType::Embedding,
            OutputInfo::Detection { .. } => ModelType::Detection,
            OutputInfo::Logo { .. } => ModelType::Logo,
            OutputInfo::Video { .. } => ModelType::Video,
            OutputInfo::Demographics => ModelType::Demographics,
            OutputInfo::FaceDetection => ModelType::FaceDetection,
            OutputInfo::Focus => ModelType::Focus,
            OutputInfo::FaceEmbedding => ModelType::FaceEmbedding,
            OutputInfo::FaceConcepts => ModelType::FaceConcepts,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            OutputInfo::Demographics
                | OutputInfo::FaceDetection
                | OutputInfo::Focus
                | OutputInfo::FaceEmbedding
                | OutputInfo::FaceConcepts
        )
    }

    fn concepts(&self) -> &[Concept] {
        match self {
            OutputInfo::Concept { concepts, .. }
            | OutputInfo::Detection { concepts }
            | OutputInfo::Logo { concepts }
            | OutputInfo::Video { concepts } => concepts.as_slice(),
            _ => &[],
        }
    }

    pub fn to_json(&self) -> Value {
        if self.is_noop() {
            return json!({});
        }
        let mut obj = Map::new();
        obj.insert("type_ext".into(), json!(self.model_type().type_ext()));
        let concepts = self.concepts();
        if !concepts.is_empty() {
            obj.insert(
                "data".into(),
                json!({"concepts": concepts.iter().map(Concept::to_json).collect::<Vec<_>>()}),
            );
        }
        if let OutputInfo::Concept {
            concepts_mutually_exclusive,
            closed_environment,
            ..
        } = self
        {
            obj.insert(
                "output_config".into(),
                json!({
                    "concepts_mutually_exclusive": concepts_mutually_exclusive,
                    "closed_environment": closed_environment,
                }),
            );
        }
        Value::Object(obj)
    }

    pub fn to_wire(&self) -> proto::OutputInfo {
        if self.is_noop() {
            return proto::OutputInfo::default();
        }
        let concepts = self.concepts();
        let output_config = match self {
            OutputInfo::Concept {
                concepts_mutually_exclusive,
                closed_environment,
                ..
            } => Some(proto::OutputConfig {
                concepts_mutually_exclusive: *concepts_mutually_exclusive,
                closed_environment: *closed_environment,
            }),
            _ => None,
        };
        proto::OutputInfo {
            data: (!concepts.is_empty()).then(|| proto::Data {
                concepts: concepts.iter().map(Concept::to_wire).collect(),
                ..Default::default()
            }),
            output_config,
            message: String::new(),
            type_ext: self.model_type().type_ext().to_string(),
        }
    }

    fn build(model_type: ModelType, concepts: Vec<Concept>, exclusive: bool, closed: bool) -> Self {
        match model_type {
            ModelType::Concept => OutputInfo::Concept {
                concepts,
                concepts_mutually_exclusive: exclusive,
                closed_environment: closed,
            },
            ModelType::Color => OutputInfo::Color,
            ModelType::Embedding => OutputInfo::Embedding,
            ModelType::Detection => OutputInfo::Detection { concepts },
            ModelType::Logo => OutputInfo::Logo { concepts },
            ModelType::Video => OutputInfo::Video { concepts },
            ModelType::Demographics => OutputInfo::Demographics,
            ModelType::FaceDetection => OutputInfo::FaceDetection,
            ModelType::Focus => OutputInfo::Focus,
            ModelType::FaceEmbedding => OutputInfo::FaceEmbedding,
            ModelType::FaceConcepts => OutputInfo::FaceConcepts,
        }
    }

    /// Decode the output info of a model already known to be of `model_type`.
    pub fn from_json(model_type: ModelType, value: &Value) -> Result<Self> {
        let concepts = match value.get("data").filter(|v| !v.is_null()) {
            Some(data) => concepts_from_json(list(data, "concepts", "output_info")?)?,
            None => Vec::new(),
        };
        let config = value.get("output_config");
        let flag = |key: &str| {
            config
                .and_then(|c| c.get(key))
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        };
        Ok(Self::build(
            model_type,
            concepts,
            flag("concepts_mutually_exclusive"),
            flag("closed_environment"),
        ))
    }

    pub fn from_wire(model_type: ModelType, info: &proto::OutputInfo) -> Result<Self> {
        let concepts = match &info.data {
            Some(data) => concepts_from_wire(&data.concepts)?,
            None => Vec::new(),
        };
        let config = info.output_config.clone().unwrap_or_default();
        Ok(Self::build(
            model_type,
            concepts,
            config.concepts_mutually_exclusive,
            config.closed_environment,
        ))
    }
}
