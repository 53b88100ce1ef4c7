use super::{AuthFailure, Claims};

/// Succeeds iff `required` is one of the verified claims' permissions
pub fn authorize(claims: &Claims, required: &str) -> Result<(), AuthFailure> {
    if claims.has_permission(required) {
        Ok(())
    } else {
        Err(AuthFailure::permission_denied(required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::permissions::{DELETE_SHIPMENTS, GET_SHIPMENTS};

    fn claims(perms: &[&str]) -> Claims {
        Claims {
            subject: Some("auth0|packager".to_string()),
            permissions: perms.iter().map(|p| p.to_string()).collect(),
            expires_at: 0,
        }
    }

    #[test]
    fn grants_exact_membership() {
        assert!(authorize(&claims(&[GET_SHIPMENTS]), GET_SHIPMENTS).is_ok());
    }

    #[test]
    fn denies_missing_permission() {
        let err = authorize(&claims(&[GET_SHIPMENTS]), DELETE_SHIPMENTS).unwrap_err();
        assert_eq!(err.code, "unauthorized");
        assert_eq!(err.status, 403);
    }

    #[test]
    fn no_prefix_or_wildcard_matching() {
        assert!(authorize(&claims(&["get:*", "get:shipment"]), GET_SHIPMENTS).is_err());
        assert!(authorize(&claims(&[]), GET_SHIPMENTS).is_err());
    }
}
