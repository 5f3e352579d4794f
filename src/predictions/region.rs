//! Region-shaped predictions: face embeddings and detections.

use super::embedding::Embedding;
use crate::crop::Crop;
use crate::proto;
use crate::types::concept::{concepts_from_json, concepts_from_wire, non_empty};
use crate::types::Concept;
use crate::utils::json_fields::{list, opt_str, NULL};
use crate::Result;
use serde_json::Value;

/// Face located in the image together with its embedding vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceEmbedding {
    pub id: Option<String>,
    pub crop: Option<Crop>,
    pub embeddings: Vec<Embedding>,
}

/// Appearance attributes attached to a detected face.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceAttributes {
    pub identity: Vec<Concept>,
    pub age_appearance: Vec<Concept>,
    pub gender_appearance: Vec<Concept>,
    pub multicultural_appearance: Vec<Concept>,
}

/// Object or face detected in the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub id: Option<String>,
    pub crop: Option<Crop>,
    pub concepts: Vec<Concept>,
    pub face: Option<FaceAttributes>,
}

struct RegionJson<'a> {
    id: Option<String>,
    crop: Option<Crop>,
    data: &'a Value,
}

fn region_json(region: &Value) -> Result<RegionJson<'_>> {
    let crop = match region
        .get("region_info")
        .and_then(|info| info.get("bounding_box"))
        .filter(|v| !v.is_null())
    {
        Some(bbox) => Some(Crop::from_bounding_box_json(bbox)?),
        None => None,
    };
    Ok(RegionJson {
        id: opt_str(region, "id"),
        crop,
        data: region.get("data").unwrap_or(&NULL),
    })
}

fn region_crop_wire(region: &proto::Region) -> Result<Option<Crop>> {
    match region.region_info.as_ref().and_then(|i| i.bounding_box.as_ref()) {
        Some(bbox) => Crop::from_wire(bbox).map(Some),
        None => Ok(None),
    }
}

impl FaceEmbedding {
    pub fn from_json(region: &Value) -> Result<Self> {
        let parts = region_json(region)?;
        let embeddings = list(parts.data, "embeddings", "face_embedding")?
            .iter()
            .map(Embedding::from_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            id: parts.id,
            crop: parts.crop,
            embeddings,
        })
    }

    pub fn from_wire(region: &proto::Region) -> Result<Self> {
        let embeddings = match &region.data {
            Some(data) => data
                .embeddings
                .iter()
                .map(Embedding::from_wire)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        Ok(Self {
            id: non_empty(&region.id),
            crop: region_crop_wire(region)?,
            embeddings,
        })
    }
}

impl FaceAttributes {
    fn from_json(face: &Value) -> Result<Self> {
        let group = |key: &str| -> Result<Vec<Concept>> {
            match face.get(key) {
                Some(g) if !g.is_null() => concepts_from_json(list(g, "concepts", "face")?),
                _ => Ok(Vec::new()),
            }
        };
        Ok(Self {
            identity: group("identity")?,
            age_appearance: group("age_appearance")?,
            gender_appearance: group("gender_appearance")?,
            multicultural_appearance: group("multicultural_appearance")?,
        })
    }

    fn from_wire(face: &proto::Face) -> Result<Self> {
        let group = |g: &Option<proto::ConceptList>| -> Result<Vec<Concept>> {
            match g {
                Some(list) => concepts_from_wire(&list.concepts),
                None => Ok(Vec::new()),
            }
        };
        Ok(Self {
            identity: group(&face.identity)?,
            age_appearance: group(&face.age_appearance)?,
            gender_appearance: group(&face.gender_appearance)?,
            multicultural_appearance: group(&face.multicultural_appearance)?,
        })
    }
}

impl Detection {
    pub fn from_json(region: &Value) -> Result<Self> {
        let parts = region_json(region)?;
        let face = match parts.data.get("face").filter(|v| !v.is_null()) {
            Some(face) => Some(FaceAttributes::from_json(face)?),
            None => None,
        };
        Ok(Self {
            id: parts.id,
            crop: parts.crop,
            concepts: concepts_from_json(list(parts.data, "concepts", "detection")?)?,
            face,
        })
    }

    pub fn from_wire(region: &proto::Region) -> Result<Self> {
        let (concepts, face) = match &region.data {
            Some(data) => (
                concepts_from_wire(&data.concepts)?,
                data.face.as_ref().map(FaceAttributes::from_wire).transpose()?,
            ),
            None => (Vec::new(), None),
        };
        Ok(Self {
            id: non_empty(&region.id),
            crop: region_crop_wire(region)?,
            concepts,
            face,
        })
    }
}
