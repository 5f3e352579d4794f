//! 二进制 RPC 协议消息：与服务端 protobuf 定义对应的消息结构。
//!
//! # Binary RPC Messages
//!
//! Message types for the binary RPC protocol, declared directly with
//! `prost::Message` derives. Only the fields the client reads or writes are
//! declared; unknown fields sent by the service are skipped by the decoder.
//!
//! Proto3 semantics apply: scalar fields equal to their zero value are not
//! written to the wire, so a `0.0` concept value or an unset status code cannot
//! be told apart from an absent field.

mod convert;

pub use convert::{
    json_to_struct, normalize_numbers, struct_to_json, timestamp_from_wire, timestamp_to_wire,
};

/// Reply status carried as field 1 of every response message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Status {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(string, tag = "3")]
    pub details: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Concept {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(float, tag = "3")]
    pub value: f32,
    #[prost(message, optional, tag = "4")]
    pub created_at: Option<::prost_types::Timestamp>,
    #[prost(string, tag = "5")]
    pub language: String,
    #[prost(string, tag = "6")]
    pub app_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct W3c {
    #[prost(string, tag = "1")]
    pub hex: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Color {
    #[prost(string, tag = "1")]
    pub raw_hex: String,
    #[prost(message, optional, tag = "2")]
    pub w3c: Option<W3c>,
    #[prost(float, tag = "3")]
    pub value: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Embedding {
    #[prost(float, repeated, tag = "1")]
    pub vector: Vec<f32>,
    #[prost(uint32, tag = "2")]
    pub num_dimensions: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoundingBox {
    #[prost(float, tag = "1")]
    pub top_row: f32,
    #[prost(float, tag = "2")]
    pub left_col: f32,
    #[prost(float, tag = "3")]
    pub bottom_row: f32,
    #[prost(float, tag = "4")]
    pub right_col: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegionInfo {
    #[prost(message, optional, tag = "1")]
    pub bounding_box: Option<BoundingBox>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConceptList {
    #[prost(message, repeated, tag = "1")]
    pub concepts: Vec<Concept>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Face {
    #[prost(message, optional, tag = "1")]
    pub identity: Option<ConceptList>,
    #[prost(message, optional, tag = "2")]
    pub age_appearance: Option<ConceptList>,
    #[prost(message, optional, tag = "3")]
    pub gender_appearance: Option<ConceptList>,
    #[prost(message, optional, tag = "4")]
    pub multicultural_appearance: Option<ConceptList>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Region {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(message, optional, tag = "2")]
    pub region_info: Option<RegionInfo>,
    #[prost(message, optional, tag = "3")]
    pub data: Option<Data>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FrameInfo {
    #[prost(uint32, tag = "1")]
    pub index: u32,
    /// Milliseconds from the start of the video.
    #[prost(uint32, tag = "2")]
    pub time: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Frame {
    #[prost(message, optional, tag = "1")]
    pub frame_info: Option<FrameInfo>,
    #[prost(message, optional, tag = "2")]
    pub data: Option<Data>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Image {
    #[prost(string, tag = "1")]
    pub url: String,
    #[prost(bytes = "vec", tag = "2")]
    pub base64: Vec<u8>,
    /// `[top, left, bottom, right]`, empty when uncropped.
    #[prost(float, repeated, tag = "3")]
    pub crop: Vec<f32>,
    #[prost(bool, tag = "4")]
    pub allow_duplicate_url: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Video {
    #[prost(string, tag = "1")]
    pub url: String,
    #[prost(bytes = "vec", tag = "2")]
    pub base64: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeoPoint {
    #[prost(float, tag = "1")]
    pub longitude: f32,
    #[prost(float, tag = "2")]
    pub latitude: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeoLimit {
    /// `withinMiles`, `withinKilometers`, `withinRadians` or `withinDegrees`.
    #[prost(string, tag = "1")]
    pub limit_type: String,
    #[prost(float, tag = "2")]
    pub value: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeoBoxedPoint {
    #[prost(message, optional, tag = "1")]
    pub geo_point: Option<GeoPoint>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Geo {
    #[prost(message, optional, tag = "1")]
    pub geo_point: Option<GeoPoint>,
    #[prost(message, optional, tag = "2")]
    pub geo_limit: Option<GeoLimit>,
    #[prost(message, repeated, tag = "3")]
    pub geo_box: Vec<GeoBoxedPoint>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Data {
    #[prost(message, optional, tag = "1")]
    pub image: Option<Image>,
    #[prost(message, optional, tag = "2")]
    pub video: Option<Video>,
    #[prost(message, repeated, tag = "3")]
    pub concepts: Vec<Concept>,
    #[prost(message, optional, tag = "5")]
    pub metadata: Option<::prost_types::Struct>,
    #[prost(message, optional, tag = "6")]
    pub geo: Option<Geo>,
    #[prost(message, repeated, tag = "7")]
    pub colors: Vec<Color>,
    #[prost(message, repeated, tag = "9")]
    pub embeddings: Vec<Embedding>,
    #[prost(message, repeated, tag = "11")]
    pub regions: Vec<Region>,
    #[prost(message, repeated, tag = "12")]
    pub frames: Vec<Frame>,
    #[prost(message, optional, tag = "13")]
    pub face: Option<Face>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Input {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(message, optional, tag = "2")]
    pub data: Option<Data>,
    #[prost(message, optional, tag = "4")]
    pub created_at: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "6")]
    pub status: Option<Status>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OutputConfig {
    #[prost(bool, tag = "1")]
    pub concepts_mutually_exclusive: bool,
    #[prost(bool, tag = "2")]
    pub closed_environment: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OutputInfo {
    #[prost(message, optional, tag = "1")]
    pub data: Option<Data>,
    #[prost(message, optional, tag = "2")]
    pub output_config: Option<OutputConfig>,
    #[prost(string, tag = "3")]
    pub message: String,
    #[prost(string, tag = "5")]
    pub type_ext: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelVersion {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(message, optional, tag = "2")]
    pub created_at: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "3")]
    pub status: Option<Status>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Model {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(message, optional, tag = "3")]
    pub created_at: Option<::prost_types::Timestamp>,
    #[prost(string, tag = "4")]
    pub app_id: String,
    #[prost(message, optional, tag = "5")]
    pub output_info: Option<OutputInfo>,
    #[prost(message, optional, tag = "6")]
    pub model_version: Option<ModelVersion>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Output {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(message, optional, tag = "2")]
    pub status: Option<Status>,
    #[prost(message, optional, tag = "3")]
    pub created_at: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "4")]
    pub model: Option<Model>,
    #[prost(message, optional, tag = "5")]
    pub input: Option<Input>,
    #[prost(message, optional, tag = "6")]
    pub data: Option<Data>,
}

/// One clause of a search query: an input predicate, an output predicate, or both.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct And {
    #[prost(message, optional, tag = "1")]
    pub input: Option<Input>,
    #[prost(message, optional, tag = "2")]
    pub output: Option<Output>,
    #[prost(bool, tag = "3")]
    pub negate: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Query {
    #[prost(message, repeated, tag = "1")]
    pub ands: Vec<And>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pagination {
    #[prost(uint32, tag = "1")]
    pub page: u32,
    #[prost(uint32, tag = "2")]
    pub per_page: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Hit {
    #[prost(float, tag = "1")]
    pub score: f32,
    #[prost(message, optional, tag = "2")]
    pub input: Option<Input>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InputCount {
    #[prost(uint32, tag = "1")]
    pub processed: u32,
    #[prost(uint32, tag = "2")]
    pub to_process: u32,
    #[prost(uint32, tag = "3")]
    pub errors: u32,
    #[prost(uint32, tag = "4")]
    pub processing: u32,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PostInputsRequest {
    #[prost(message, repeated, tag = "1")]
    pub inputs: Vec<Input>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetInputRequest {
    #[prost(string, tag = "1")]
    pub input_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListInputsRequest {
    #[prost(uint32, tag = "1")]
    pub page: u32,
    #[prost(uint32, tag = "2")]
    pub per_page: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteInputsRequest {
    #[prost(string, repeated, tag = "1")]
    pub ids: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetInputCountRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PostConceptsRequest {
    #[prost(message, repeated, tag = "1")]
    pub concepts: Vec<Concept>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetConceptRequest {
    #[prost(string, tag = "1")]
    pub concept_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListConceptsRequest {
    #[prost(uint32, tag = "1")]
    pub page: u32,
    #[prost(uint32, tag = "2")]
    pub per_page: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PostSearchesRequest {
    #[prost(message, optional, tag = "1")]
    pub query: Option<Query>,
    #[prost(message, optional, tag = "2")]
    pub pagination: Option<Pagination>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PostModelOutputsRequest {
    #[prost(string, tag = "1")]
    pub model_id: String,
    #[prost(string, tag = "2")]
    pub version_id: String,
    #[prost(message, repeated, tag = "3")]
    pub inputs: Vec<Input>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetModelRequest {
    #[prost(string, tag = "1")]
    pub model_id: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Any response read only for its status. Other fields are skipped.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BaseResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MultiInputResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, repeated, tag = "2")]
    pub inputs: Vec<Input>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SingleInputResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, optional, tag = "2")]
    pub input: Option<Input>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SingleInputCountResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, optional, tag = "2")]
    pub counts: Option<InputCount>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MultiConceptResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, repeated, tag = "2")]
    pub concepts: Vec<Concept>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SingleConceptResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, optional, tag = "2")]
    pub concept: Option<Concept>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MultiSearchResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(string, tag = "2")]
    pub id: String,
    #[prost(message, repeated, tag = "3")]
    pub hits: Vec<Hit>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MultiOutputResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, repeated, tag = "2")]
    pub outputs: Vec<Output>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SingleModelResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, optional, tag = "2")]
    pub model: Option<Model>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_base_response_reads_status_of_any_reply() {
        let reply = MultiConceptResponse {
            status: Some(Status {
                code: 10000,
                description: "Ok".into(),
                details: String::new(),
            }),
            concepts: vec![Concept {
                id: "dog".into(),
                value: 0.5,
                ..Default::default()
            }],
        };
        let bytes = reply.encode_to_vec();
        let base = BaseResponse::decode(bytes.as_slice()).unwrap();
        assert_eq!(base.status.unwrap().code, 10000);
    }

    #[test]
    fn test_zero_value_is_not_written() {
        let concept = Concept {
            id: "a".into(),
            value: 0.0,
            ..Default::default()
        };
        let with_value = Concept {
            value: 1.0,
            ..concept.clone()
        };
        assert!(concept.encode_to_vec().len() < with_value.encode_to_vec().len());
    }
}
