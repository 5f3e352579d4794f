//! Input: an uploaded image or video with its user-supplied annotations.

use super::concept::{concepts_from_json, concepts_from_wire, non_empty, Concept};
use crate::crop::Crop;
use crate::geo::GeoPoint;
use crate::proto::{self, json_to_struct, struct_to_json, timestamp_from_wire, timestamp_to_wire};
use crate::status::Status;
use crate::utils::json_fields::{list, opt_str, opt_timestamp, type_name};
use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

/// Where the media bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Url(String),
    Bytes(Vec<u8>),
}

impl MediaSource {
    fn write_json(&self, obj: &mut Map<String, Value>) {
        match self {
            MediaSource::Url(url) => {
                obj.insert("url".into(), json!(url));
            }
            MediaSource::Bytes(bytes) => {
                obj.insert("base64".into(), json!(STANDARD.encode(bytes)));
            }
        }
    }

    fn read_json(obj: &Value) -> Result<Self> {
        if let Some(url) = opt_str(obj, "url") {
            return Ok(MediaSource::Url(url));
        }
        if let Some(encoded) = opt_str(obj, "base64") {
            let bytes = STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| Error::decode(format!("media base64 is invalid: {}", e)))?;
            return Ok(MediaSource::Bytes(bytes));
        }
        Err(Error::decode("media has neither url nor base64"))
    }

    fn read_wire(url: &str, bytes: &[u8]) -> Result<Self> {
        if !url.is_empty() {
            Ok(MediaSource::Url(url.to_string()))
        } else if !bytes.is_empty() {
            Ok(MediaSource::Bytes(bytes.to_vec()))
        } else {
            Err(Error::decode("media message has neither url nor base64"))
        }
    }

    fn wire_parts(&self) -> (String, Vec<u8>) {
        match self {
            MediaSource::Url(url) => (url.clone(), Vec::new()),
            MediaSource::Bytes(bytes) => (String::new(), bytes.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Media {
    Image {
        source: MediaSource,
        crop: Option<Crop>,
        allow_duplicate_url: bool,
    },
    Video {
        source: MediaSource,
    },
}

pub(crate) fn image_to_json(source: &MediaSource, crop: Option<&Crop>, allow_duplicate_url: bool) -> Value {
    let mut image = Map::new();
    source.write_json(&mut image);
    if let Some(crop) = crop {
        image.insert("crop".into(), crop.to_json_array());
    }
    if allow_duplicate_url {
        image.insert("allow_duplicate_url".into(), json!(true));
    }
    Value::Object(image)
}

pub(crate) fn image_from_json(image: &Value) -> Result<(MediaSource, Option<Crop>, bool)> {
    let source = MediaSource::read_json(image)?;
    let crop = match image.get("crop") {
        None | Some(Value::Null) => None,
        Some(c) => Some(Crop::from_json_array(c)?),
    };
    let allow_duplicate_url = image
        .get("allow_duplicate_url")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    Ok((source, crop, allow_duplicate_url))
}

pub(crate) fn image_to_wire(source: &MediaSource, crop: Option<&Crop>, allow_duplicate_url: bool) -> proto::Image {
    let (url, base64) = source.wire_parts();
    proto::Image {
        url,
        base64,
        crop: crop.map(|c| c.to_wire_array()).unwrap_or_default(),
        allow_duplicate_url,
    }
}

pub(crate) fn image_from_wire(image: &proto::Image) -> Result<(MediaSource, Option<Crop>, bool)> {
    Ok((
        MediaSource::read_wire(&image.url, &image.base64)?,
        Crop::from_wire_array(&image.crop)?,
        image.allow_duplicate_url,
    ))
}

/// An input as stored by the service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Input {
    pub id: Option<String>,
    pub media: Option<Media>,
    /// User-tagged concepts (value 1.0 present, 0.0 explicitly absent).
    pub concepts: Vec<Concept>,
    pub metadata: Option<Map<String, Value>>,
    pub geo: Option<GeoPoint>,
    pub status: Option<Status>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Input {
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::with_media(Media::Image {
            source: MediaSource::Url(url.into()),
            crop: None,
            allow_duplicate_url: false,
        })
    }

    pub fn image_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_media(Media::Image {
            source: MediaSource::Bytes(bytes.into()),
            crop: None,
            allow_duplicate_url: false,
        })
    }

    pub fn video_url(url: impl Into<String>) -> Self {
        Self::with_media(Media::Video {
            source: MediaSource::Url(url.into()),
        })
    }

    pub fn video_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_media(Media::Video {
            source: MediaSource::Bytes(bytes.into()),
        })
    }

    fn with_media(media: Media) -> Self {
        Self {
            media: Some(media),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Only images can be cropped.
    pub fn with_crop(mut self, new_crop: Crop) -> Result<Self> {
        match &mut self.media {
            Some(Media::Image { crop, .. }) => {
                *crop = Some(new_crop);
                Ok(self)
            }
            _ => Err(Error::construction("crop can only be applied to an image input")),
        }
    }

    pub fn allow_duplicate_url(mut self, allow: bool) -> Self {
        if let Some(Media::Image {
            allow_duplicate_url,
            ..
        }) = &mut self.media
        {
            *allow_duplicate_url = allow;
        }
        self
    }

    pub fn with_concepts(mut self, concepts: Vec<Concept>) -> Self {
        self.concepts = concepts;
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_geo(mut self, point: GeoPoint) -> Self {
        self.geo = Some(point);
        self
    }

    pub fn to_json(&self) -> Value {
        let mut data = Map::new();
        match &self.media {
            Some(Media::Image {
                source,
                crop,
                allow_duplicate_url,
            }) => {
                data.insert(
                    "image".into(),
                    image_to_json(source, crop.as_ref(), *allow_duplicate_url),
                );
            }
            Some(Media::Video { source }) => {
                let mut video = Map::new();
                source.write_json(&mut video);
                data.insert("video".into(), Value::Object(video));
            }
            None => {}
        }
        if !self.concepts.is_empty() {
            data.insert(
                "concepts".into(),
                Value::Array(self.concepts.iter().map(Concept::to_json).collect()),
            );
        }
        if let Some(metadata) = &self.metadata {
            data.insert("metadata".into(), Value::Object(metadata.clone()));
        }
        if let Some(geo) = &self.geo {
            data.insert("geo".into(), geo.to_json_wrapped());
        }

        let mut input = Map::new();
        if let Some(id) = &self.id {
            input.insert("id".into(), json!(id));
        }
        input.insert("data".into(), Value::Object(data));
        Value::Object(input)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::decode(format!(
                "input must be an object, found {}",
                type_name(value)
            )));
        }
        let data = value.get("data").cloned().unwrap_or(Value::Null);
        let media = if let Some(image) = data.get("image").filter(|v| !v.is_null()) {
            let (source, crop, allow_duplicate_url) = image_from_json(image)?;
            Some(Media::Image {
                source,
                crop,
                allow_duplicate_url,
            })
        } else if let Some(video) = data.get("video").filter(|v| !v.is_null()) {
            Some(Media::Video {
                source: MediaSource::read_json(video)?,
            })
        } else {
            None
        };
        let metadata = match data.get("metadata") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map.clone()),
            Some(other) => {
                return Err(Error::decode(format!(
                    "input metadata must be an object, found {}",
                    type_name(other)
                )))
            }
        };
        let geo = match data.get("geo").filter(|v| !v.is_null()) {
            Some(geo) => Some(GeoPoint::from_json_wrapped(geo)?),
            None => None,
        };
        Ok(Self {
            id: opt_str(value, "id"),
            media,
            concepts: concepts_from_json(list(&data, "concepts", "input")?)?,
            metadata,
            geo,
            status: Status::from_json(value),
            created_at: opt_timestamp(value, "created_at")?,
        })
    }

    pub fn to_wire(&self) -> proto::Input {
        let mut data = proto::Data::default();
        match &self.media {
            Some(Media::Image {
                source,
                crop,
                allow_duplicate_url,
            }) => data.image = Some(image_to_wire(source, crop.as_ref(), *allow_duplicate_url)),
            Some(Media::Video { source }) => {
                let (url, base64) = source.wire_parts();
                data.video = Some(proto::Video { url, base64 });
            }
            None => {}
        }
        data.concepts = self.concepts.iter().map(Concept::to_wire).collect();
        data.metadata = self.metadata.as_ref().map(json_to_struct);
        data.geo = self.geo.map(|p| proto::Geo {
            geo_point: Some(p.to_wire()),
            ..Default::default()
        });
        proto::Input {
            id: self.id.clone().unwrap_or_default(),
            data: Some(data),
            created_at: self.created_at.as_ref().map(timestamp_to_wire),
            status: self.status.as_ref().map(Status::to_wire),
        }
    }

    pub fn from_wire(input: &proto::Input) -> Result<Self> {
        let data = input.data.clone().unwrap_or_default();
        let media = if let Some(image) = &data.image {
            let (source, crop, allow_duplicate_url) = image_from_wire(image)?;
            Some(Media::Image {
                source,
                crop,
                allow_duplicate_url,
            })
        } else if let Some(video) = &data.video {
            Some(Media::Video {
                source: MediaSource::read_wire(&video.url, &video.base64)?,
            })
        } else {
            None
        };
        let geo = match data.geo.as_ref().and_then(|g| g.geo_point.as_ref()) {
            Some(point) => Some(GeoPoint::from_wire(point)?),
            None => None,
        };
        Ok(Self {
            id: non_empty(&input.id),
            media,
            concepts: concepts_from_wire(&data.concepts)?,
            metadata: data.metadata.as_ref().map(struct_to_json),
            geo,
            status: input.status.as_ref().and_then(Status::from_wire),
            created_at: input.created_at.as_ref().and_then(timestamp_from_wire),
        })
    }
}

/// Processing counters returned by the input status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputCounts {
    pub processed: u32,
    pub to_process: u32,
    pub errors: u32,
    pub processing: u32,
}

impl InputCounts {
    pub fn from_json(counts: &Value) -> Result<Self> {
        use crate::utils::json_fields::opt_u32;
        Ok(Self {
            processed: opt_u32(counts, "processed")?.unwrap_or_default(),
            to_process: opt_u32(counts, "to_process")?.unwrap_or_default(),
            errors: opt_u32(counts, "errors")?.unwrap_or_default(),
            processing: opt_u32(counts, "processing")?.unwrap_or_default(),
        })
    }

    pub fn from_wire(counts: &proto::InputCount) -> Self {
        Self {
            processed: counts.processed,
            to_process: counts.to_process,
            errors: counts.errors,
            processing: counts.processing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Input {
        let mut metadata = Map::new();
        metadata.insert("owner".into(), json!("alice"));
        metadata.insert("reviewed".into(), json!(true));
        Input::image_url("https://samples.clarifai.com/metro-north.jpg")
            .with_id("train-1")
            .with_crop(Crop::new(0.0, 0.25, 0.5, 0.75).unwrap())
            .unwrap()
            .allow_duplicate_url(true)
            .with_concepts(vec![Concept::new("train").with_value(1.0)])
            .with_metadata(metadata)
            .with_geo(GeoPoint::new(-30.0, 40.0).unwrap())
    }

    #[test]
    fn test_json_shape() {
        let json = sample().to_json();
        assert_eq!(
            json,
            json!({
                "id": "train-1",
                "data": {
                    "image": {
                        "url": "https://samples.clarifai.com/metro-north.jpg",
                        "crop": [0.0, 0.25, 0.5, 0.75],
                        "allow_duplicate_url": true
                    },
                    "concepts": [{"id": "train", "value": 1.0}],
                    "metadata": {"owner": "alice", "reviewed": true},
                    "geo": {"geo_point": {"longitude": -30.0, "latitude": 40.0}}
                }
            })
        );
    }

    #[test]
    fn test_json_and_wire_round_trip() {
        let input = sample();
        assert_eq!(Input::from_json(&input.to_json()).unwrap(), input);
        assert_eq!(Input::from_wire(&input.to_wire()).unwrap(), input);
    }

    #[test]
    fn test_bytes_are_base64_in_json() {
        let input = Input::video_bytes(vec![1u8, 2, 3]);
        let json = input.to_json();
        assert_eq!(json["data"]["video"]["base64"], json!("AQID"));
        assert_eq!(Input::from_json(&json).unwrap(), input);
    }

    #[test]
    fn test_crop_on_video_is_rejected() {
        let crop = Crop::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(Input::video_url("https://x/v.mp4").with_crop(crop).is_err());
    }

    #[test]
    fn test_counts_from_json() {
        let counts = InputCounts::from_json(&json!({"processed": 3, "errors": 1})).unwrap();
        assert_eq!(counts.processed, 3);
        assert_eq!(counts.errors, 1);
        assert_eq!(counts.to_process, 0);
    }
}
