//! Search clause values and their named constructors.

use crate::crop::Crop;
use crate::geo::{GeoBox, GeoPoint, GeoRadius};
use crate::proto::normalize_numbers;
use crate::types::MediaSource;
use crate::{Error, ErrorContext, Result};
use serde_json::{Map, Value};
use std::fmt;

/// Which side of the stored asset a concept clause tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConceptOwner {
    /// Concepts the user tagged on the input.
    Input,
    /// Concepts a model predicted for the input.
    Output,
}

impl ConceptOwner {
    pub fn as_key(&self) -> &'static str {
        match self {
            ConceptOwner::Input => "input",
            ConceptOwner::Output => "output",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        match key {
            "input" => Ok(ConceptOwner::Input),
            "output" => Ok(ConceptOwner::Output),
            other => Err(Error::construction_with_context(
                format!("unknown concept owner '{}', expected 'input' or 'output'", other),
                ErrorContext::new().with_field_path("owner"),
            )),
        }
    }
}

impl fmt::Display for ConceptOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// How a concept clause names its concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConceptRef {
    Id(String),
    Name(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum ClauseKind {
    Concept {
        owner: ConceptOwner,
        concept: ConceptRef,
    },
    ImageUrl(String),
    VisualSimilarity {
        source: MediaSource,
        crop: Option<Crop>,
    },
    Metadata(Map<String, Value>),
    GeoCircle {
        center: GeoPoint,
        radius: GeoRadius,
    },
    GeoRect(GeoBox),
}

/// One predicate of a search query. All clauses of a query must hold for an input to match.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchClause {
    pub(super) kind: ClauseKind,
}

fn non_empty(value: String, field: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::construction_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new().with_field_path(field),
        ));
    }
    Ok(value)
}

impl SearchClause {
    pub(super) fn from_kind(kind: ClauseKind) -> Self {
        Self { kind }
    }

    /// Inputs a model predicted the concept with this id for.
    pub fn by_concept_id(id: impl Into<String>) -> Result<Self> {
        Self::concept(ConceptOwner::Output, ConceptRef::Id(non_empty(id.into(), "concept_id")?))
    }

    pub fn by_concept_name(name: impl Into<String>) -> Result<Self> {
        Self::concept(ConceptOwner::Output, ConceptRef::Name(non_empty(name.into(), "concept_name")?))
    }

    /// Inputs the user tagged with the concept with this id.
    pub fn by_user_tagged_concept_id(id: impl Into<String>) -> Result<Self> {
        Self::concept(ConceptOwner::Input, ConceptRef::Id(non_empty(id.into(), "concept_id")?))
    }

    pub fn by_user_tagged_concept_name(name: impl Into<String>) -> Result<Self> {
        Self::concept(ConceptOwner::Input, ConceptRef::Name(non_empty(name.into(), "concept_name")?))
    }

    /// Concept clause with the owner given as its key, `"input"` or `"output"`.
    pub fn by_concept_id_with_owner(owner: &str, id: impl Into<String>) -> Result<Self> {
        let owner = ConceptOwner::from_key(owner)?;
        Self::concept(owner, ConceptRef::Id(non_empty(id.into(), "concept_id")?))
    }

    pub fn by_concept_name_with_owner(owner: &str, name: impl Into<String>) -> Result<Self> {
        let owner = ConceptOwner::from_key(owner)?;
        Self::concept(owner, ConceptRef::Name(non_empty(name.into(), "concept_name")?))
    }

    fn concept(owner: ConceptOwner, concept: ConceptRef) -> Result<Self> {
        Ok(Self::from_kind(ClauseKind::Concept { owner, concept }))
    }

    /// Inputs whose image was uploaded from exactly this URL.
    pub fn by_image_url(url: impl Into<String>) -> Result<Self> {
        Ok(Self::from_kind(ClauseKind::ImageUrl(non_empty(url.into(), "url")?)))
    }

    /// Inputs visually similar to the image at `url`, optionally compared on a crop of it.
    pub fn by_image_visual_similarity_url(url: impl Into<String>, crop: Option<Crop>) -> Result<Self> {
        Ok(Self::from_kind(ClauseKind::VisualSimilarity {
            source: MediaSource::Url(non_empty(url.into(), "url")?),
            crop,
        }))
    }

    pub fn by_image_visual_similarity_bytes(bytes: impl Into<Vec<u8>>, crop: Option<Crop>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(Error::construction_with_context(
                "image bytes must not be empty",
                ErrorContext::new().with_field_path("base64"),
            ));
        }
        Ok(Self::from_kind(ClauseKind::VisualSimilarity {
            source: MediaSource::Bytes(bytes),
            crop,
        }))
    }

    /// Inputs whose metadata contains every key/value pair of `metadata`.
    ///
    /// The wire form carries numbers as doubles, so numbers are stored the way
    /// they read back from it: `{"ratio": 2.0}` is kept as `{"ratio": 2}`.
    pub fn by_metadata(metadata: Map<String, Value>) -> Result<Self> {
        if metadata.is_empty() {
            return Err(Error::construction_with_context(
                "metadata filter must not be empty",
                ErrorContext::new().with_field_path("metadata"),
            ));
        }
        Ok(Self::from_kind(ClauseKind::Metadata(normalize_numbers(metadata))))
    }

    pub fn by_geo_circle(center: GeoPoint, radius: GeoRadius) -> Self {
        Self::from_kind(ClauseKind::GeoCircle { center, radius })
    }

    pub fn by_geo_rect(first: GeoPoint, second: GeoPoint) -> Self {
        Self::from_kind(ClauseKind::GeoRect(GeoBox::new(first, second)))
    }

    /// Owner key the clause nests under at the top level.
    pub fn owner(&self) -> ConceptOwner {
        match &self.kind {
            ClauseKind::Concept { owner, .. } => *owner,
            ClauseKind::VisualSimilarity { .. } => ConceptOwner::Output,
            _ => ConceptOwner::Input,
        }
    }
}
