use crate::proto;
use crate::utils::json_fields::from_value;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dense vector produced by an embedding model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EmbeddingFields")]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub num_dimensions: u32,
}

#[derive(Deserialize)]
struct EmbeddingFields {
    #[serde(default)]
    vector: Vec<f32>,
    #[serde(default)]
    num_dimensions: u32,
}

impl From<EmbeddingFields> for Embedding {
    fn from(fields: EmbeddingFields) -> Self {
        Self::new(fields.vector, fields.num_dimensions)
    }
}

impl Embedding {
    /// A zero dimension count means "not reported"; the vector length stands in.
    pub fn new(vector: Vec<f32>, num_dimensions: u32) -> Self {
        let num_dimensions = match num_dimensions {
            0 => vector.len() as u32,
            n => n,
        };
        Self {
            vector,
            num_dimensions,
        }
    }

    pub fn from_json(embedding: &Value) -> Result<Self> {
        from_value(embedding, "embedding")
    }

    pub fn from_wire(embedding: &proto::Embedding) -> Result<Self> {
        Ok(Self::new(embedding.vector.clone(), embedding.num_dimensions))
    }
}
