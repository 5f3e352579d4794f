//! Input operations: upload, fetch, list, delete and processing status.

use super::{decode_list, decode_one, missing, require_id, require_items};
use crate::proto;
use crate::request::{encode_segment, Method, Pagination, Payload, Request};
use crate::types::{Input, InputCounts};
use crate::Result;
use serde_json::{json, Value};

fn inputs_from(payload: Payload<'_>) -> Result<Vec<Input>> {
    match payload {
        Payload::Json(envelope) => decode_list(envelope, "inputs", Input::from_json),
        Payload::Wire(_) => {
            let reply: proto::MultiInputResponse = payload.decode_wire()?;
            reply.inputs.iter().map(Input::from_wire).collect()
        }
    }
}

/// Upload `inputs`; the reply echoes them with ids and statuses assigned.
pub fn add_inputs(inputs: Vec<Input>) -> Result<Request<Vec<Input>>> {
    require_items(&inputs, "inputs")?;
    let body = json!({"inputs": inputs.iter().map(Input::to_json).collect::<Vec<Value>>()});
    let message = proto::PostInputsRequest {
        inputs: inputs.iter().map(Input::to_wire).collect(),
    };
    Ok(Request::new("add_inputs", Method::Post, "/v2/inputs", inputs_from)
        .with_json_body(move |_| Ok(body.clone()))
        .with_rpc("PostInputs", move |_| Ok(message.clone())))
}

pub fn get_input(input_id: &str) -> Result<Request<Input>> {
    let input_id = require_id(input_id, "input_id")?;
    let path = format!("/v2/inputs/{}", encode_segment(&input_id));
    Ok(Request::new("get_input", Method::Get, path, |payload| match payload {
        Payload::Json(envelope) => decode_one(envelope, "input", Input::from_json),
        Payload::Wire(_) => {
            let reply: proto::SingleInputResponse = payload.decode_wire()?;
            Input::from_wire(reply.input.as_ref().ok_or_else(|| missing("input"))?)
        }
    })
    .with_empty_body()
    .with_rpc("GetInput", move |_| {
        Ok(proto::GetInputRequest {
            input_id: input_id.clone(),
        })
    }))
}

/// One page of the application's inputs. Fetch further pages with
/// [`Request::paginated`] and [`Pagination::next_page`].
pub fn list_inputs(pagination: Pagination) -> Request<Vec<Input>> {
    Request::new("list_inputs", Method::Get, "/v2/inputs", inputs_from)
        .with_empty_body()
        .with_rpc("ListInputs", |page| {
            let page = page.copied().unwrap_or_default();
            Ok(proto::ListInputsRequest {
                page: page.page(),
                per_page: page.per_page(),
            })
        })
        .paginated(pagination)
}

pub fn delete_inputs(input_ids: Vec<String>) -> Result<Request<()>> {
    require_items(&input_ids, "ids")?;
    for id in &input_ids {
        require_id(id, "ids")?;
    }
    let body = json!({ "ids": input_ids });
    let message = proto::DeleteInputsRequest { ids: input_ids };
    Ok(Request::new("delete_inputs", Method::Delete, "/v2/inputs", |_| Ok(()))
        .with_json_body(move |_| Ok(body.clone()))
        .with_rpc("DeleteInputs", move |_| Ok(message.clone())))
}

/// Delete every input of the application. HTTP only.
pub fn delete_all_inputs() -> Request<()> {
    Request::new("delete_all_inputs", Method::Delete, "/v2/inputs", |_| Ok(()))
        .with_json_body(|_| Ok(json!({"delete_all": true})))
}

pub fn get_inputs_status() -> Request<InputCounts> {
    Request::new("get_inputs_status", Method::Get, "/v2/inputs/status", |payload| match payload {
        Payload::Json(envelope) => match envelope.get("counts").filter(|v| !v.is_null()) {
            Some(counts) => InputCounts::from_json(counts),
            None => Ok(InputCounts::default()),
        },
        Payload::Wire(_) => {
            let reply: proto::SingleInputCountResponse = payload.decode_wire()?;
            Ok(reply
                .counts
                .as_ref()
                .map(InputCounts::from_wire)
                .unwrap_or_default())
        }
    })
    .with_empty_body()
    .with_rpc("GetInputCount", |_| Ok(proto::GetInputCountRequest {}))
}
