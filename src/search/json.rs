//! JSON form of search clauses: nested `input`/`output` objects.

use super::clause::{ClauseKind, ConceptOwner, ConceptRef, SearchClause};
use crate::geo::{GeoBox, GeoPoint, GeoRadius};
use crate::proto::normalize_numbers;
use crate::types::input::{image_from_json, image_to_json};
use crate::utils::json_fields::{list, opt_str, type_name};
use crate::{Error, ErrorContext, Result};
use serde_json::{json, Value};

fn with_data(owner: &str, data: Value) -> Value {
    json!({ owner: { "data": data } })
}

fn clause_error(message: impl Into<String>, path: &str) -> Error {
    Error::decode_with_context(
        message,
        ErrorContext::new()
            .with_field_path(path)
            .with_source("search_clause"),
    )
}

impl SearchClause {
    pub fn to_json_form(&self) -> Value {
        match &self.kind {
            ClauseKind::Concept { owner, concept } => {
                let item = match concept {
                    ConceptRef::Id(id) => json!({"id": id, "value": 1}),
                    ConceptRef::Name(name) => json!({"name": name, "value": 1}),
                };
                with_data(owner.as_key(), json!({ "concepts": [item] }))
            }
            ClauseKind::ImageUrl(url) => with_data("input", json!({"image": {"url": url}})),
            ClauseKind::VisualSimilarity { source, crop } => json!({
                "output": {
                    "input": {
                        "data": {"image": image_to_json(source, crop.as_ref(), false)}
                    }
                }
            }),
            ClauseKind::Metadata(metadata) => with_data("input", json!({ "metadata": metadata })),
            ClauseKind::GeoCircle { center, radius } => with_data(
                "input",
                json!({"geo": {"geo_point": center.to_json(), "geo_limit": radius.to_json()}}),
            ),
            ClauseKind::GeoRect(geo_box) => {
                with_data("input", json!({"geo": {"geo_box": geo_box.to_json()}}))
            }
        }
    }

    /// Recover the clause a JSON form was built from.
    pub fn from_json_form(value: &Value) -> Result<Self> {
        if let Some(output) = value.get("output").filter(|v| !v.is_null()) {
            if let Some(image) = output
                .get("input")
                .and_then(|i| i.get("data"))
                .and_then(|d| d.get("image"))
            {
                let (source, crop, _) = image_from_json(image)?;
                return Ok(Self::from_kind(ClauseKind::VisualSimilarity { source, crop }));
            }
            let data = output
                .get("data")
                .ok_or_else(|| clause_error("output clause has no data", "output.data"))?;
            return concept_from_json(ConceptOwner::Output, data);
        }

        let data = value
            .get("input")
            .and_then(|i| i.get("data"))
            .ok_or_else(|| clause_error("clause has neither input.data nor output", "input.data"))?;

        if data.get("concepts").is_some() {
            return concept_from_json(ConceptOwner::Input, data);
        }
        if let Some(image) = data.get("image") {
            let url = opt_str(image, "url")
                .ok_or_else(|| clause_error("image clause has no url", "input.data.image.url"))?;
            return Ok(Self::from_kind(ClauseKind::ImageUrl(url)));
        }
        if let Some(metadata) = data.get("metadata") {
            return match metadata {
                Value::Object(map) => Ok(Self::from_kind(ClauseKind::Metadata(normalize_numbers(
                    map.clone(),
                )))),
                other => Err(clause_error(
                    format!("metadata must be an object, found {}", type_name(other)),
                    "input.data.metadata",
                )),
            };
        }
        if let Some(geo) = data.get("geo") {
            if let Some(geo_box) = geo.get("geo_box") {
                return Ok(Self::from_kind(ClauseKind::GeoRect(GeoBox::from_json(geo_box)?)));
            }
            let point = geo
                .get("geo_point")
                .ok_or_else(|| clause_error("geo clause has no geo_point", "input.data.geo.geo_point"))?;
            let limit = geo
                .get("geo_limit")
                .ok_or_else(|| clause_error("geo clause has no geo_limit", "input.data.geo.geo_limit"))?;
            return Ok(Self::from_kind(ClauseKind::GeoCircle {
                center: GeoPoint::from_json(point)?,
                radius: GeoRadius::from_json(limit)?,
            }));
        }
        Err(clause_error("unrecognized clause shape", "input.data"))
    }
}

fn concept_from_json(owner: ConceptOwner, data: &Value) -> Result<SearchClause> {
    let path = format!("{}.data.concepts", owner);
    let item = match list(data, "concepts", "search_clause")? {
        [item] => item,
        items => {
            return Err(clause_error(
                format!("concept clause must hold one concept, found {}", items.len()),
                &path,
            ))
        }
    };
    let concept = if let Some(id) = opt_str(item, "id") {
        ConceptRef::Id(id)
    } else if let Some(name) = opt_str(item, "name") {
        ConceptRef::Name(name)
    } else {
        return Err(clause_error("concept has neither id nor name", &path));
    };
    Ok(SearchClause::from_kind(ClauseKind::Concept { owner, concept }))
}
