use super::{decode_list, decode_one, missing, require_id, require_items};
use crate::proto;
use crate::request::{encode_segment, Method, Pagination, Payload, Request};
use crate::types::Concept;
use crate::Result;
use serde_json::{json, Value};

fn concepts_from(payload: Payload<'_>) -> Result<Vec<Concept>> {
    match payload {
        Payload::Json(envelope) => decode_list(envelope, "concepts", Concept::from_json),
        Payload::Wire(_) => {
            let reply: proto::MultiConceptResponse = payload.decode_wire()?;
            reply.concepts.iter().map(Concept::from_wire).collect()
        }
    }
}

fn concepts_body(concepts: &[Concept]) -> Vec<Value> {
    concepts.iter().map(Concept::to_json).collect()
}

fn require_concept_ids(concepts: &[Concept]) -> Result<()> {
    require_items(concepts, "concepts")?;
    for concept in concepts {
        require_id(&concept.id, "concepts.id")?;
    }
    Ok(())
}

pub fn add_concepts(concepts: Vec<Concept>) -> Result<Request<Vec<Concept>>> {
    require_concept_ids(&concepts)?;
    let body = json!({"concepts": concepts_body(&concepts)});
    let message = proto::PostConceptsRequest {
        concepts: concepts.iter().map(Concept::to_wire).collect(),
    };
    Ok(Request::new("add_concepts", Method::Post, "/v2/concepts", concepts_from)
        .with_json_body(move |_| Ok(body.clone()))
        .with_rpc("PostConcepts", move |_| Ok(message.clone())))
}

pub fn get_concept(concept_id: &str) -> Result<Request<Concept>> {
    let concept_id = require_id(concept_id, "concept_id")?;
    let path = format!("/v2/concepts/{}", encode_segment(&concept_id));
    Ok(Request::new("get_concept", Method::Get, path, |payload| match payload {
        Payload::Json(envelope) => decode_one(envelope, "concept", Concept::from_json),
        Payload::Wire(_) => {
            let reply: proto::SingleConceptResponse = payload.decode_wire()?;
            Concept::from_wire(reply.concept.as_ref().ok_or_else(|| missing("concept"))?)
        }
    })
    .with_empty_body()
    .with_rpc("GetConcept", move |_| {
        Ok(proto::GetConceptRequest {
            concept_id: concept_id.clone(),
        })
    }))
}

pub fn list_concepts(pagination: Pagination) -> Request<Vec<Concept>> {
    Request::new("list_concepts", Method::Get, "/v2/concepts", concepts_from)
        .with_empty_body()
        .with_rpc("ListConcepts", |page| {
            let page = page.copied().unwrap_or_default();
            Ok(proto::ListConceptsRequest {
                page: page.page(),
                per_page: page.per_page(),
            })
        })
        .paginated(pagination)
}

/// Overwrite the names of existing concepts. HTTP only.
pub fn modify_concepts(concepts: Vec<Concept>) -> Result<Request<Vec<Concept>>> {
    require_concept_ids(&concepts)?;
    let body = json!({"concepts": concepts_body(&concepts), "action": "overwrite"});
    Ok(Request::new("modify_concepts", Method::Patch, "/v2/concepts", concepts_from)
        .with_json_body(move |_| Ok(body.clone())))
}
