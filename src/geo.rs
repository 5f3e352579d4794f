//! Geographic value types used by inputs and geo search clauses.

use crate::utils::json_fields::from_value;
use crate::{proto, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoPointFields")]
pub struct GeoPoint {
    longitude: f32,
    latitude: f32,
}

#[derive(Deserialize)]
struct GeoPointFields {
    longitude: f32,
    latitude: f32,
}

impl TryFrom<GeoPointFields> for GeoPoint {
    type Error = Error;

    fn try_from(fields: GeoPointFields) -> Result<Self> {
        Self::new(fields.longitude, fields.latitude)
    }
}

impl GeoPoint {
    pub fn new(longitude: f32, latitude: f32) -> Result<Self> {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::construction(format!(
                "longitude must be within -180..=180, got {}",
                longitude
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::construction(format!(
                "latitude must be within -90..=90, got {}",
                latitude
            )));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    pub fn longitude(&self) -> f32 {
        self.longitude
    }

    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        from_value(value, "geo_point")
    }

    pub fn to_wire(&self) -> proto::GeoPoint {
        proto::GeoPoint {
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }

    pub fn from_wire(point: &proto::GeoPoint) -> Result<Self> {
        Self::new(point.longitude, point.latitude).map_err(|e| Error::decode(e.to_string()))
    }

    /// `{"geo_point": {...}}`, the same wrapper whether the point is a circle
    /// center or a box corner.
    pub(crate) fn to_json_wrapped(&self) -> Value {
        json!({"geo_point": self.to_json()})
    }

    pub(crate) fn from_json_wrapped(value: &Value) -> Result<Self> {
        let point = value
            .get("geo_point")
            .ok_or_else(|| Error::decode("missing geo_point"))?;
        Self::from_json(point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RadiusUnit {
    #[serde(rename = "withinMiles")]
    Miles,
    #[serde(rename = "withinKilometers")]
    Kilometers,
    #[serde(rename = "withinRadians")]
    Radians,
    #[serde(rename = "withinDegrees")]
    Degrees,
}

impl RadiusUnit {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Self::Miles => "withinMiles",
            Self::Kilometers => "withinKilometers",
            Self::Radians => "withinRadians",
            Self::Degrees => "withinDegrees",
        }
    }

    pub fn from_wire_str(s: &str) -> Option<Self> {
        match s {
            "withinMiles" => Some(Self::Miles),
            "withinKilometers" => Some(Self::Kilometers),
            "withinRadians" => Some(Self::Radians),
            "withinDegrees" => Some(Self::Degrees),
            _ => None,
        }
    }
}

impl fmt::Display for RadiusUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

/// `{"type": "withinKilometers", "value": 10}` in the JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoRadiusFields")]
pub struct GeoRadius {
    #[serde(rename = "type")]
    unit: RadiusUnit,
    value: f32,
}

#[derive(Deserialize)]
struct GeoRadiusFields {
    #[serde(rename = "type")]
    unit: RadiusUnit,
    value: f32,
}

impl TryFrom<GeoRadiusFields> for GeoRadius {
    type Error = Error;

    fn try_from(fields: GeoRadiusFields) -> Result<Self> {
        Self::new(fields.value, fields.unit)
    }
}

impl GeoRadius {
    pub fn new(value: f32, unit: RadiusUnit) -> Result<Self> {
        if !(value.is_finite() && value > 0.0) {
            return Err(Error::construction(format!(
                "geo radius must be a positive number, got {}",
                value
            )));
        }
        Ok(Self { value, unit })
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn unit(&self) -> RadiusUnit {
        self.unit
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        from_value(value, "geo_limit")
    }

    pub fn to_wire(&self) -> proto::GeoLimit {
        proto::GeoLimit {
            limit_type: self.unit.as_wire_str().to_string(),
            value: self.value,
        }
    }

    pub fn from_wire(limit: &proto::GeoLimit) -> Result<Self> {
        let unit = RadiusUnit::from_wire_str(&limit.limit_type).ok_or_else(|| {
            Error::decode(format!("unrecognized geo limit type '{}'", limit.limit_type))
        })?;
        Self::new(limit.value, unit).map_err(|e| Error::decode(e.to_string()))
    }
}

/// Rectangle spanned by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBox {
    first: GeoPoint,
    second: GeoPoint,
}

impl GeoBox {
    pub fn new(first: GeoPoint, second: GeoPoint) -> Self {
        Self { first, second }
    }

    pub fn corners(&self) -> (GeoPoint, GeoPoint) {
        (self.first, self.second)
    }

    pub fn to_json(&self) -> Value {
        json!([self.first.to_json_wrapped(), self.second.to_json_wrapped()])
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        match value.as_array().map(Vec::as_slice) {
            Some([a, b]) => Ok(Self::new(
                GeoPoint::from_json_wrapped(a)?,
                GeoPoint::from_json_wrapped(b)?,
            )),
            _ => Err(Error::decode(format!(
                "geo_box must hold exactly two corners, got {}",
                value
            ))),
        }
    }

    pub fn to_wire(&self) -> Vec<proto::GeoBoxedPoint> {
        [self.first, self.second]
            .iter()
            .map(|p| proto::GeoBoxedPoint {
                geo_point: Some(p.to_wire()),
            })
            .collect()
    }

    pub fn from_wire(corners: &[proto::GeoBoxedPoint]) -> Result<Self> {
        let point = |c: &proto::GeoBoxedPoint| {
            c.geo_point
                .as_ref()
                .ok_or_else(|| Error::decode("geo_box corner has no geo_point"))
                .and_then(GeoPoint::from_wire)
        };
        match corners {
            [a, b] => Ok(Self::new(point(a)?, point(b)?)),
            _ => Err(Error::decode(format!(
                "geo_box must hold exactly two corners, got {}",
                corners.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_validation() {
        assert!(GeoPoint::new(-122.4, 37.7).is_ok());
        assert!(GeoPoint::new(181.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -91.0).is_err());
    }

    #[test]
    fn test_radius_validation() {
        assert!(GeoRadius::new(0.0, RadiusUnit::Miles).is_err());
        assert!(GeoRadius::new(f32::NAN, RadiusUnit::Miles).is_err());
        assert!(GeoRadius::new(10.0, RadiusUnit::Kilometers).is_ok());
    }

    #[test]
    fn test_radius_json_shape() {
        let radius = GeoRadius::new(5.0, RadiusUnit::Kilometers).unwrap();
        assert_eq!(
            radius.to_json(),
            json!({"type": "withinKilometers", "value": 5.0})
        );
        assert_eq!(GeoRadius::from_json(&radius.to_json()).unwrap(), radius);
        assert_eq!(GeoRadius::from_wire(&radius.to_wire()).unwrap(), radius);
    }

    #[test]
    fn test_unknown_limit_type_is_decode_error() {
        let limit = proto::GeoLimit {
            limit_type: "withinParsecs".into(),
            value: 1.0,
        };
        assert!(GeoRadius::from_wire(&limit).unwrap_err().is_contract_violation());
        let err = GeoRadius::from_json(&json!({"type": "withinParsecs", "value": 1.0})).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_json_forms_are_validated() {
        let err = GeoPoint::from_json(&json!({"longitude": 200.0, "latitude": 0.0})).unwrap_err();
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("longitude"));
        assert!(GeoPoint::from_json(&json!({"longitude": 1.0})).is_err());
        assert!(GeoRadius::from_json(&json!({"type": "withinMiles", "value": 0.0})).is_err());
        assert_eq!(
            GeoPoint::from_json(&json!({"latitude": 40.0, "longitude": -30.0})).unwrap(),
            GeoPoint::new(-30.0, 40.0).unwrap()
        );
    }

    #[test]
    fn test_box_corners_use_point_wrapper() {
        let b = GeoBox::new(
            GeoPoint::new(-10.0, 40.0).unwrap(),
            GeoPoint::new(5.0, 50.0).unwrap(),
        );
        assert_eq!(
            b.to_json(),
            json!([
                {"geo_point": {"longitude": -10.0, "latitude": 40.0}},
                {"geo_point": {"longitude": 5.0, "latitude": 50.0}}
            ])
        );
        assert_eq!(GeoBox::from_json(&b.to_json()).unwrap(), b);
        assert_eq!(GeoBox::from_wire(&b.to_wire()).unwrap(), b);
        assert!(GeoBox::from_wire(&b.to_wire()[..1]).is_err());
    }
}
