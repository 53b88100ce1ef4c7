use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require, CreateError, FieldError, Payload};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Carrier {
    pub id: i32,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCarrier {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarrierView {
    pub id: i32,
    #[serde(rename = "Carrier")]
    pub name: String,
    pub is_active: bool,
}

impl NewCarrier {
    pub fn from_payload(payload: &Payload) -> Result<Self, CreateError> {
        require(payload, &["name"], Payload::is_filled)?;

        Ok(Self {
            name: payload.require("name")?,
            active: payload.get("active")?.unwrap_or(true),
        })
    }
}

impl Carrier {
    /// A body without `name` leaves the name as is
    pub fn merged(&self, payload: &Payload) -> Result<Self, FieldError> {
        let mut next = self.clone();
        payload.merge_into("name", &mut next.name)?;
        payload.merge_into("active", &mut next.active)?;
        Ok(next)
    }

    pub fn view(&self) -> CarrierView {
        CarrierView {
            id: self.id,
            name: self.name.clone(),
            is_active: self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: serde_json::Value) -> Payload {
        Payload::try_from(v).unwrap()
    }

    fn existing() -> Carrier {
        Carrier {
            id: 6,
            name: "Test Transport".to_string(),
            active: true,
        }
    }

    #[test]
    fn create_rejects_empty_name() {
        let err = NewCarrier::from_payload(&payload(json!({"name": ""}))).unwrap_err();
        assert!(matches!(err, CreateError::Missing(ref f) if f.missing == vec!["name"]));
        assert!(NewCarrier::from_payload(&payload(json!({}))).is_err());
    }

    #[test]
    fn create_treats_blank_names_as_missing() {
        for name in [json!(false), json!(0), json!([]), json!({})] {
            let err = NewCarrier::from_payload(&payload(json!({"name": name}))).unwrap_err();
            assert!(matches!(err, CreateError::Missing(ref f) if f.missing == vec!["name"]));
        }
    }

    #[test]
    fn create_defaults_active() {
        let new = NewCarrier::from_payload(&payload(json!({"name": "Stephan Courier"}))).unwrap();
        assert_eq!(new.name, "Stephan Courier");
        assert!(new.active);
    }

    #[test]
    fn merge_without_name_keeps_name() {
        let merged = existing().merged(&payload(json!({"active": false}))).unwrap();
        assert_eq!(merged.name, "Test Transport");
        assert!(!merged.active);
    }

    #[test]
    fn merge_replaces_name() {
        let merged = existing().merged(&payload(json!({"name": "Stephan Courier"}))).unwrap();
        assert_eq!(merged.name, "Stephan Courier");
        let cleared = existing().merged(&payload(json!({"name": ""}))).unwrap();
        assert_eq!(cleared.name, "");
    }

    #[test]
    fn merge_rejects_null_name() {
        assert!(existing().merged(&payload(json!({"name": null}))).is_err());
    }

    #[test]
    fn view_renames_name() {
        let value = serde_json::to_value(existing().view()).unwrap();
        assert_eq!(value, json!({"id": 6, "Carrier": "Test Transport", "is_active": true}));
    }
}
