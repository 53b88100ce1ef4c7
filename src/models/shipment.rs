use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use sqlx::FromRow;

use super::{require, CreateError, FieldError, Payload};

/// Rendering of `Date` in API responses (RFC 1123, always GMT)
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Shipment {
    pub id: i32,
    /// Invoice reference
    pub reference: Option<i32>,
    pub carrier_id: i32,
    pub packages: i32,
    /// Pounds
    pub weight: f64,
    pub tracking: Option<String>,
    pub packaged_by: i32,
    /// UTC
    pub create_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewShipment {
    pub reference: Option<i32>,
    pub carrier_id: i32,
    pub packages: i32,
    pub weight: f64,
    pub tracking: Option<String>,
    pub packaged_by: i32,
    /// `None` lets the store stamp the insert instant
    pub create_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentView {
    pub id: i32,
    #[serde(rename = "Reference")]
    pub reference: Option<i32>,
    #[serde(rename = "Weight")]
    pub weight: f64,
    #[serde(rename = "Packages")]
    pub packages: i32,
    #[serde(rename = "Packaged By")]
    pub packaged_by: i32,
    #[serde(rename = "Date", serialize_with = "http_date")]
    pub create_date: NaiveDateTime,
}

fn http_date<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(HTTP_DATE))
}

/// Accepts RFC 3339, `YYYY-MM-DD[ T]HH:MM:SS[.f]`, a bare date, or the rendered RFC 1123 form
pub fn parse_create_date(field: &str, value: &Value) -> Result<NaiveDateTime, FieldError> {
    let text = value
        .as_str()
        .ok_or_else(|| FieldError::new(field, "expected a date string"))?
        .trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", HTTP_DATE] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| FieldError::new(field, format!("unrecognised date '{}'", text)))
}

impl NewShipment {
    const REQUIRED: [&'static str; 5] = ["reference", "carrier_id", "packages", "weight", "packaged_by"];

    /// Presence only; whether the referenced rows exist is the store's call
    pub fn from_payload(payload: &Payload) -> Result<Self, CreateError> {
        require(payload, &Self::REQUIRED, Payload::is_present)?;

        let create_date = payload
            .raw("create_date")
            .map(|v| parse_create_date("create_date", v))
            .transpose()?;

        Ok(Self {
            reference: Some(payload.require("reference")?),
            carrier_id: payload.require("carrier_id")?,
            packages: payload.require("packages")?,
            weight: payload.require("weight")?,
            tracking: payload.get("tracking")?,
            packaged_by: payload.require("packaged_by")?,
            create_date,
        })
    }
}

impl Shipment {
    /// `create_date` is fixed at creation and not merged
    pub fn merged(&self, payload: &Payload) -> Result<Self, FieldError> {
        let mut next = self.clone();
        payload.merge_into("reference", &mut next.reference)?;
        payload.merge_into("carrier_id", &mut next.carrier_id)?;
        payload.merge_into("packages", &mut next.packages)?;
        payload.merge_into("weight", &mut next.weight)?;
        payload.merge_into("tracking", &mut next.tracking)?;
        payload.merge_into("packaged_by", &mut next.packaged_by)?;
        Ok(next)
    }

    pub fn view(&self) -> ShipmentView {
        ShipmentView {
            id: self.id,
            reference: self.reference,
            weight: self.weight,
            packages: self.packages,
            packaged_by: self.packaged_by,
            create_date: self.create_date,
        }
    }
}
