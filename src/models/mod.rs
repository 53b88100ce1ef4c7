//! Shipping department records and their request-level validation.
//!
//! Each resource exposes a create-field-check (`NewX::from_payload`) and an
//! update-field-merge (`X::merged`), plus the formatted shape returned by the API.

pub mod carrier;
pub mod packager;
pub mod payload;
pub mod shipment;

use std::fmt;

use thiserror::Error;

pub use carrier::{Carrier, CarrierView, NewCarrier};
pub use packager::{NewPackager, Packager, PackagerView};
pub use payload::{Payload, PayloadError};
pub use shipment::{NewShipment, Shipment, ShipmentView};

/// Required fields absent (or null/empty) on create, in the order they were checked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationFailure {
    pub missing: Vec<&'static str>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.missing.iter().map(|n| format!("'{}'", n)).collect();
        write!(f, "Field(s) [{}] cannot be empty", names.join(", "))
    }
}

/// A present field whose value the column cannot hold
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for '{field}': {reason}")]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &str, reason: impl fmt::Display) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CreateError {
    #[error(transparent)]
    Missing(#[from] ValidationFailure),

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Collects the names of required fields that fail `check`, preserving order
pub(crate) fn require(
    payload: &Payload,
    fields: &[&'static str],
    check: impl Fn(&Payload, &str) -> bool,
) -> Result<(), ValidationFailure> {
    let missing: Vec<&'static str> = fields.iter().copied().filter(|f| !check(payload, *f)).collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failure_lists_fields_in_order() {
        let failure = ValidationFailure {
            missing: vec!["carrier_id", "packages"],
        };
        assert_eq!(failure.to_string(), "Field(s) ['carrier_id', 'packages'] cannot be empty");
    }
}
