use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require, CreateError, FieldError, Payload};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Packager {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub initials: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPackager {
    pub first_name: String,
    pub last_name: Option<String>,
    pub initials: String,
    pub active: bool,
}

/// Formatted packager. Names are write-only; reads expose initials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackagerView {
    pub id: i32,
    #[serde(rename = "Packager Initials")]
    pub initials: String,
    pub is_active: bool,
}

impl NewPackager {
    const REQUIRED: [&'static str; 2] = ["first_name", "initials"];

    pub fn from_payload(payload: &Payload) -> Result<Self, CreateError> {
        require(payload, &Self::REQUIRED, Payload::is_filled)?;

        Ok(Self {
            first_name: payload.require("first_name")?,
            last_name: payload.get("last_name")?,
            initials: payload.require("initials")?,
            active: payload.get("active")?.unwrap_or(true),
        })
    }
}

impl Packager {
    /// Shallow per-field override with whatever keys the body carries
    pub fn merged(&self, payload: &Payload) -> Result<Self, FieldError> {
        let mut next = self.clone();
        payload.merge_into("first_name", &mut next.first_name)?;
        payload.merge_into("last_name", &mut next.last_name)?;
        payload.merge_into("initials", &mut next.initials)?;
        payload.merge_into("active", &mut next.active)?;
        Ok(next)
    }

    pub fn view(&self) -> PackagerView {
        PackagerView {
            id: self.id,
            initials: self.initials.clone(),
            is_active: self.active,
        }
    }
}
