//! 数据类型模块：概念、输入与搜索结果等服务端实体。
//!
//! # Types Module
//!
//! Plain entities exchanged with the service. Each type knows its JSON form and
//! its wire-message form; both directions are total over well-formed payloads and
//! report shape mismatches as [`crate::Error::Decode`].
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Concept`] | Named label with optional confidence |
//! | [`Input`] | Uploaded image/video with annotations |
//! | [`Media`] | Image (optionally cropped) or video source |
//! | [`InputCounts`] | Processing counters for the application's inputs |
//! | [`SearchHit`] | Scored search result |

pub mod concept;
pub mod hit;
pub mod input;

pub use concept::Concept;
pub use hit::SearchHit;
pub use input::{Input, InputCounts, Media, MediaSource};
