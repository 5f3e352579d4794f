use crate::proto;
use crate::types::concept::concepts_from_wire;
use crate::types::Concept;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Position of a sampled frame within its video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameInfo {
    #[serde(default)]
    pub index: u32,
    /// Milliseconds from the start of the video.
    #[serde(default)]
    pub time: u32,
}

/// Concepts predicted for one sampled video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FrameFields", into = "FrameFields")]
pub struct Frame {
    pub index: u32,
    /// Milliseconds from the start of the video.
    pub time: u32,
    pub concepts: Vec<Concept>,
}

// `{"frame_info": {...}, "data": {"concepts": [...]}}`
#[derive(Serialize, Deserialize)]
struct FrameFields {
    #[serde(default)]
    frame_info: Option<FrameInfo>,
    #[serde(default)]
    data: Option<FrameData>,
}

#[derive(Serialize, Deserialize)]
struct FrameData {
    #[serde(default)]
    concepts: Vec<Concept>,
}

impl From<FrameFields> for Frame {
    fn from(fields: FrameFields) -> Self {
        let info = fields.frame_info.unwrap_or_default();
        Self {
            index: info.index,
            time: info.time,
            concepts: fields.data.map(|d| d.concepts).unwrap_or_default(),
        }
    }
}

impl From<Frame> for FrameFields {
    fn from(frame: Frame) -> Self {
        Self {
            frame_info: Some(FrameInfo {
                index: frame.index,
                time: frame.time,
            }),
            data: Some(FrameData {
                concepts: frame.concepts,
            }),
        }
    }
}

impl Frame {
    pub fn from_wire(frame: &proto::Frame) -> Result<Self> {
        let info = frame.frame_info.clone().unwrap_or_default();
        let concepts = match &frame.data {
            Some(data) => concepts_from_wire(&data.concepts)?,
            None => Vec::new(),
        };
        Ok(Self {
            index: info.index,
            time: info.time,
            concepts,
        })
    }
}
