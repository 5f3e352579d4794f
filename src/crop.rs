//! Crop rectangle in relative image coordinates.

use crate::{proto, Error, ErrorContext, Result};
use serde_json::{json, Value};

/// Relative crop `[top, left, bottom, right]`, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crop {
    top: f32,
    left: f32,
    bottom: f32,
    right: f32,
}

impl Crop {
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Result<Self> {
        for (name, v) in [("top", top), ("left", left), ("bottom", bottom), ("right", right)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::construction_with_context(
                    format!("crop {} must be within 0.0..=1.0, got {}", name, v),
                    ErrorContext::new().with_field_path(format!("crop.{}", name)),
                ));
            }
        }
        if top > bottom || left > right {
            return Err(Error::construction(format!(
                "crop corners are inverted: top={} bottom={} left={} right={}",
                top, bottom, left, right
            )));
        }
        Ok(Self {
            top,
            left,
            bottom,
            right,
        })
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    /// Legacy JSON form: `[top, left, bottom, right]`.
    pub fn to_json_array(&self) -> Value {
        json!([self.top, self.left, self.bottom, self.right])
    }

    pub fn from_json_array(value: &Value) -> Result<Self> {
        let items = value
            .as_array()
            .filter(|a| a.len() == 4)
            .ok_or_else(|| Error::decode(format!("crop must be an array of 4 numbers, got {}", value)))?;
        let mut out = [0f32; 4];
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = item
                .as_f64()
                .ok_or_else(|| Error::decode(format!("crop entry is not a number: {}", item)))?
                as f32;
        }
        Self::new(out[0], out[1], out[2], out[3]).map_err(into_decode)
    }

    /// Region JSON form: `{"top_row", "left_col", "bottom_row", "right_col"}`.
    pub fn to_bounding_box_json(&self) -> Value {
        json!({
            "top_row": self.top,
            "left_col": self.left,
            "bottom_row": self.bottom,
            "right_col": self.right,
        })
    }

    pub fn from_bounding_box_json(value: &Value) -> Result<Self> {
        let field = |name: &str| -> f32 {
            value.get(name).and_then(|v| v.as_f64()).unwrap_or_default() as f32
        };
        if !value.is_object() {
            return Err(Error::decode(format!("bounding_box must be an object, got {}", value)));
        }
        Self::new(
            field("top_row"),
            field("left_col"),
            field("bottom_row"),
            field("right_col"),
        )
        .map_err(into_decode)
    }

    pub fn to_wire(&self) -> proto::BoundingBox {
        proto::BoundingBox {
            top_row: self.top,
            left_col: self.left,
            bottom_row: self.bottom,
            right_col: self.right,
        }
    }

    pub fn from_wire(bbox: &proto::BoundingBox) -> Result<Self> {
        Self::new(bbox.top_row, bbox.left_col, bbox.bottom_row, bbox.right_col).map_err(into_decode)
    }

    /// Packed form used by the wire `Image.crop` field.
    pub fn to_wire_array(&self) -> Vec<f32> {
        vec![self.top, self.left, self.bottom, self.right]
    }

    /// An empty array means "uncropped".
    pub fn from_wire_array(values: &[f32]) -> Result<Option<Self>> {
        match values {
            [] => Ok(None),
            [t, l, b, r] => Self::new(*t, *l, *b, *r).map(Some).map_err(into_decode),
            _ => Err(Error::decode(format!(
                "crop must have 4 entries, got {}",
                values.len()
            ))),
        }
    }
}

// A crop the service sent back that we would reject locally is a contract problem, not a caller one.
fn into_decode(err: Error) -> Error {
    match err {
        Error::Construction { message, context } => Error::Decode { message, context },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Crop::new(0.1, 0.2, 1.3, 0.4).is_err());
        assert!(Crop::new(-0.1, 0.0, 1.0, 1.0).is_err());
        assert!(Crop::new(0.6, 0.0, 0.4, 1.0).is_err());
        assert!(Crop::new(0.0, 0.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_array_and_box_forms_agree() {
        let crop = Crop::new(0.25, 0.5, 0.75, 1.0).unwrap();
        assert_eq!(Crop::from_json_array(&crop.to_json_array()).unwrap(), crop);
        assert_eq!(
            Crop::from_bounding_box_json(&crop.to_bounding_box_json()).unwrap(),
            crop
        );
        assert_eq!(Crop::from_wire(&crop.to_wire()).unwrap(), crop);
        assert_eq!(Crop::from_wire_array(&crop.to_wire_array()).unwrap(), Some(crop));
    }

    #[test]
    fn test_wire_array_shapes() {
        assert_eq!(Crop::from_wire_array(&[]).unwrap(), None);
        let err = Crop::from_wire_array(&[0.1, 0.2]).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_bad_service_crop_is_decode_error() {
        let err = Crop::from_json_array(&serde_json::json!([0.9, 0.0, 0.1, 1.0])).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
