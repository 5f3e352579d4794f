//! Wire form of search clauses: `And` messages holding an `Input` or `Output` tree.

use super::clause::{ClauseKind, ConceptOwner, ConceptRef, SearchClause};
use crate::geo::{GeoBox, GeoPoint, GeoRadius};
use crate::proto::{self, json_to_struct, struct_to_json};
use crate::types::input::{image_from_wire, image_to_wire};
use crate::{Error, Result};

fn input_with(data: proto::Data) -> proto::Input {
    proto::Input {
        data: Some(data),
        ..Default::default()
    }
}

impl SearchClause {
    pub fn to_wire_form(&self) -> proto::And {
        match &self.kind {
            ClauseKind::Concept { owner, concept } => {
                // Zero floats are not written, so presence must be an explicit 1.0.
                let mut item = proto::Concept {
                    value: 1.0,
                    ..Default::default()
                };
                match concept {
                    ConceptRef::Id(id) => item.id = id.clone(),
                    ConceptRef::Name(name) => item.name = name.clone(),
                }
                let data = proto::Data {
                    concepts: vec![item],
                    ..Default::default()
                };
                match owner {
                    ConceptOwner::Input => proto::And {
                        input: Some(input_with(data)),
                        ..Default::default()
                    },
                    ConceptOwner::Output => proto::And {
                        output: Some(proto::Output {
                            data: Some(data),
                            ..Default::default()
                        }),
                        ..Default::default()
                    },
                }
            }
            ClauseKind::ImageUrl(url) => proto::And {
                input: Some(input_with(proto::Data {
                    image: Some(proto::Image {
                        url: url.clone(),
                        ..Default::default()
                    }),
                    ..Default::default()
                })),
                ..Default::default()
            },
            ClauseKind::VisualSimilarity { source, crop } => proto::And {
                output: Some(proto::Output {
                    input: Some(input_with(proto::Data {
                        image: Some(image_to_wire(source, crop.as_ref(), false)),
                        ..Default::default()
                    })),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ClauseKind::Metadata(metadata) => proto::And {
                input: Some(input_with(proto::Data {
                    metadata: Some(json_to_struct(metadata)),
                    ..Default::default()
                })),
                ..Default::default()
            },
            ClauseKind::GeoCircle { center, radius } => geo_and(proto::Geo {
                geo_point: Some(center.to_wire()),
                geo_limit: Some(radius.to_wire()),
                geo_box: Vec::new(),
            }),
            ClauseKind::GeoRect(geo_box) => geo_and(proto::Geo {
                geo_point: None,
                geo_limit: None,
                geo_box: geo_box.to_wire(),
            }),
        }
    }

    /// Recover the clause a wire form was built from.
    pub fn from_wire_form(and: &proto::And) -> Result<Self> {
        if let Some(output) = &and.output {
            if let Some(image) = output
                .input
                .as_ref()
                .and_then(|i| i.data.as_ref())
                .and_then(|d| d.image.as_ref())
            {
                let (source, crop, _) = image_from_wire(image)?;
                return Ok(Self::from_kind(ClauseKind::VisualSimilarity { source, crop }));
            }
            let data = output
                .data
                .as_ref()
                .ok_or_else(|| Error::decode("output clause has no data"))?;
            return concept_from_wire(ConceptOwner::Output, data);
        }

        let data = and
            .input
            .as_ref()
            .and_then(|i| i.data.as_ref())
            .ok_or_else(|| Error::decode("clause has neither input data nor output"))?;

        if !data.concepts.is_empty() {
            return concept_from_wire(ConceptOwner::Input, data);
        }
        if let Some(image) = &data.image {
            if image.url.is_empty() {
                return Err(Error::decode("image clause has no url"));
            }
            return Ok(Self::from_kind(ClauseKind::ImageUrl(image.url.clone())));
        }
        if let Some(metadata) = &data.metadata {
            return Ok(Self::from_kind(ClauseKind::Metadata(struct_to_json(metadata))));
        }
        if let Some(geo) = &data.geo {
            if !geo.geo_box.is_empty() {
                return Ok(Self::from_kind(ClauseKind::GeoRect(GeoBox::from_wire(&geo.geo_box)?)));
            }
            let point = geo
                .geo_point
                .as_ref()
                .ok_or_else(|| Error::decode("geo clause has no geo_point"))?;
            let limit = geo
                .geo_limit
                .as_ref()
                .ok_or_else(|| Error::decode("geo clause has no geo_limit"))?;
            return Ok(Self::from_kind(ClauseKind::GeoCircle {
                center: GeoPoint::from_wire(point)?,
                radius: GeoRadius::from_wire(limit)?,
            }));
        }
        Err(Error::decode("unrecognized clause message"))
    }
}

fn geo_and(geo: proto::Geo) -> proto::And {
    proto::And {
        input: Some(input_with(proto::Data {
            geo: Some(geo),
            ..Default::default()
        })),
        ..Default::default()
    }
}

fn concept_from_wire(owner: ConceptOwner, data: &proto::Data) -> Result<SearchClause> {
    let item = match data.concepts.as_slice() {
        [item] => item,
        items => {
            return Err(Error::decode(format!(
                "concept clause must hold one concept, found {}",
                items.len()
            )))
        }
    };
    let concept = if !item.id.is_empty() {
        ConceptRef::Id(item.id.clone())
    } else if !item.name.is_empty() {
        ConceptRef::Name(item.name.clone())
    } else {
        return Err(Error::decode("concept has neither id nor name"));
    };
    Ok(SearchClause::from_kind(ClauseKind::Concept { owner, concept }))
}
