use uuid::Uuid;

use crate::error::ApiError;

/// Ownership gate shared by every mutation of an owned resource. `Forbidden`
/// is distinct from `Unauthorized`: the caller is known, just not entitled.
pub fn require_owner(resource_owner: Uuid, caller: Uuid) -> Result<(), ApiError> {
    if resource_owner != caller {
        return Err(ApiError::Forbidden(
            "you do not have permission to modify this resource".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn owner_passes() {
        let id = Uuid::new_v4();
        assert!(require_owner(id, id).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let err = require_owner(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }
}
