use std::fmt;
use std::str::FromStr;

pub const GET_PACKAGERS: &str = "get:packagers";
pub const POST_PACKAGER: &str = "post:packager";
pub const PATCH_PACKAGER: &str = "patch:packager";
pub const GET_CARRIERS: &str = "get:carriers";
pub const POST_CARRIER: &str = "post:carrier";
pub const PATCH_CARRIER: &str = "patch:carrier";
pub const GET_SHIPMENTS: &str = "get:shipments";
pub const POST_SHIPMENTS: &str = "post:shipments";
pub const PATCH_SHIPMENTS: &str = "patch:shipments";
pub const DELETE_SHIPMENTS: &str = "delete:shipments";

/// Every permission a guarded route can require
pub const ALL: [&str; 10] = [
    GET_PACKAGERS,
    POST_PACKAGER,
    PATCH_PACKAGER,
    GET_CARRIERS,
    POST_CARRIER,
    PATCH_CARRIER,
    GET_SHIPMENTS,
    POST_SHIPMENTS,
    PATCH_SHIPMENTS,
    DELETE_SHIPMENTS,
];

/// Role presets issued by the signing authority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Reads everything, records shipments
    Packager,
    Supervisor,
}

impl Role {
    pub fn permissions(self) -> &'static [&'static str] {
        match self {
            Role::Packager => &[GET_PACKAGERS, GET_CARRIERS, GET_SHIPMENTS, POST_SHIPMENTS],
            Role::Supervisor => &ALL,
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "packager" => Ok(Role::Packager),
            "supervisor" => Ok(Role::Supervisor),
            other => Err(format!("unknown role '{}' (expected packager or supervisor)", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Packager => write!(f, "packager"),
            Role::Supervisor => write!(f, "supervisor"),
        }
    }
}
