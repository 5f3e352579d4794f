use super::{decode_list, decode_one, missing, require_id, require_items};
use crate::models::{Model, ModelType};
use crate::output::ClarifaiOutput;
use crate::proto;
use crate::request::{encode_segment, Method, Payload, Request};
use crate::types::Input;
use crate::Result;
use serde_json::{json, Value};

fn model_from(payload: Payload<'_>) -> Result<Model> {
    match payload {
        Payload::Json(envelope) => decode_one(envelope, "model", Model::from_json),
        Payload::Wire(_) => {
            let reply: proto::SingleModelResponse = payload.decode_wire()?;
            Model::from_wire(reply.model.as_ref().ok_or_else(|| missing("model"))?)
        }
    }
}

/// Run a model over `inputs`.
///
/// `model_type` decides how the predictions are decoded; a type without a
/// decoder fails the whole reply rather than returning partial outputs.
pub fn predict(
    model_type: ModelType,
    model_id: &str,
    version_id: Option<&str>,
    inputs: Vec<Input>,
) -> Result<Request<Vec<ClarifaiOutput>>> {
    let model_id = require_id(model_id, "model_id")?;
    let version_id = version_id.map(|v| require_id(v, "version_id")).transpose()?;
    require_items(&inputs, "inputs")?;

    let path = match &version_id {
        Some(version) => format!(
            "/v2/models/{}/versions/{}/outputs",
            encode_segment(&model_id),
            encode_segment(version)
        ),
        None => format!("/v2/models/{}/outputs", encode_segment(&model_id)),
    };
    let body = json!({"inputs": inputs.iter().map(Input::to_json).collect::<Vec<Value>>()});
    let message = proto::PostModelOutputsRequest {
        model_id,
        version_id: version_id.unwrap_or_default(),
        inputs: inputs.iter().map(Input::to_wire).collect(),
    };

    Ok(Request::new("predict", Method::Post, path, move |payload| match payload {
        Payload::Json(envelope) => decode_list(envelope, "outputs", |o| ClarifaiOutput::from_json(model_type, o)),
        Payload::Wire(_) => {
            let reply: proto::MultiOutputResponse = payload.decode_wire()?;
            reply
                .outputs
                .iter()
                .map(|o| ClarifaiOutput::from_wire(model_type, o))
                .collect()
        }
    })
    .with_json_body(move |_| Ok(body.clone()))
    .with_rpc("PostModelOutputs", move |_| Ok(message.clone())))
}

pub fn get_model(model_id: &str) -> Result<Request<Model>> {
    let model_id = require_id(model_id, "model_id")?;
    let path = format!("/v2/models/{}", encode_segment(&model_id));
    Ok(Request::new("get_model", Method::Get, path, model_from)
        .with_empty_body()
        .with_rpc("GetModel", move |_| {
            Ok(proto::GetModelRequest {
                model_id: model_id.clone(),
            })
        }))
}

/// Create a model. JSON only.
pub fn create_model(model: Model) -> Result<Request<Model>> {
    require_id(&model.id, "model.id")?;
    let body = json!({"model": model.to_json()});
    Ok(Request::new("create_model", Method::Post, "/v2/models", model_from)
        .with_json_body(move |_| Ok(body.clone())))
}
