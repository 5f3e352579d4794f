//! # clarifai-rust
//!
//! Clarifai 视觉 API 的类型化客户端，同时支持 JSON/HTTP 与二进制 RPC 两种协议。
//!
//! Typed client library for the Clarifai computer-vision API. Every operation is
//! described once as a [`Request`] and can travel over JSON/HTTP or the binary RPC
//! channel; both encodings decode to the same typed values.
//!
//! ## Overview
//!
//! - **Request envelope**: a [`Request`] knows its operation name, HTTP method and
//!   path, how to build its body for each protocol and how to decode the reply.
//!   Executing it issues exactly one transport call and yields a [`Response`].
//! - **Status classification**: service codes are folded into a [`Status`] with a
//!   [`StatusKind`] of success, mixed success or failure. Transport failures become
//!   failed responses, not errors.
//! - **Predictions**: model outputs are decoded by prediction type into
//!   [`Prediction`] values (concepts, colors, embeddings, face regions, frames,
//!   detections).
//! - **Search**: [`SearchClause`] values build the `ands` query in both encodings.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clarifai_rust::operations::search::search_inputs;
//! use clarifai_rust::{ClarifaiClient, Pagination, SearchClause};
//!
//! #[tokio::main]
//! async fn main() -> clarifai_rust::Result<()> {
//!     let client = ClarifaiClient::from_env()?;
//!     let request = search_inputs(
//!         vec![SearchClause::by_concept_name("dog")?],
//!         Pagination::first_page(),
//!     )?;
//!
//!     let response = client.execute(&request).await?;
//!     if let Some(hits) = response.value() {
//!         for hit in hits {
//!             println!("{:?} {}", hit.input.id, hit.score);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Request envelope, pagination and responses |
//! | [`operations`] | Factories for every remote operation |
//! | [`status`] | Status classification of replies |
//! | [`predictions`] | Prediction types and decoding dispatch |
//! | [`models`] | Model types, output info and model entities |
//! | [`search`] | Search clauses and query building |
//! | [`types`] | Concepts, inputs and search hits |
//! | [`transport`] | Transport trait and the reqwest HTTP transport |
//! | [`proto`] | Binary RPC message definitions |

pub mod client;
pub mod config;
pub mod crop;
pub mod error;
pub mod geo;
pub mod models;
pub mod operations;
pub mod output;
pub mod predictions;
pub mod proto;
pub mod request;
pub mod search;
pub mod status;
pub mod status_code;
pub mod transport;
pub mod types;

mod utils;

pub use client::ClarifaiClient;
pub use config::ClientConfig;
pub use crop::Crop;
pub use error::{Error, ErrorContext};
pub use geo::{GeoBox, GeoPoint, GeoRadius, RadiusUnit};
pub use models::{Model, ModelType, OutputInfo};
pub use output::ClarifaiOutput;
pub use predictions::{Prediction, PredictionType};
pub use request::{Method, Pagination, Payload, RawBody, Request, Response};
pub use search::SearchClause;
pub use status::{Status, StatusKind};
pub use status_code::StatusCode;
pub use types::{Concept, Input, InputCounts, Media, MediaSource, SearchHit};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
