//! Authorization gate.
//!
//! Pure decision functions over already-loaded entities. Callers distinguish
//! "not authenticated" (decided upstream, when no principal could be
//! resolved from the request) from the `Forbidden` results produced here
//! (authenticated but wrong kind or not the owner).

use crate::error::CoreError;
use crate::roles::{ROLE_STARTUP, ROLE_STUDENT};
use crate::types::DbId;

/// Allow a profile mutation only by the profile's own principal.
pub fn ensure_profile_owner(requester: DbId, profile: DbId) -> Result<(), CoreError> {
    if requester == profile {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You may only modify your own profile".to_string(),
        ))
    }
}

/// Allow project creation only for startup principals.
pub fn ensure_startup(role: &str) -> Result<(), CoreError> {
    if role == ROLE_STARTUP {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only startups can access this resource".to_string(),
        ))
    }
}

/// Allow application submission only for student principals.
pub fn ensure_student(role: &str) -> Result<(), CoreError> {
    if role == ROLE_STUDENT {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only students can access this resource".to_string(),
        ))
    }
}

/// Allow project mutation, deletion, applicant listing, and applicant status
/// transitions only for the owning startup. Which student is being updated
/// is irrelevant; ownership of the project is the whole check.
pub fn ensure_project_owner(
    requester: DbId,
    role: &str,
    project_owner: DbId,
) -> Result<(), CoreError> {
    ensure_startup(role)?;
    if requester == project_owner {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You do not own this project".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_profile_owner() {
        assert!(ensure_profile_owner(1, 1).is_ok());
        assert_matches!(ensure_profile_owner(1, 2), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn test_kind_checks() {
        assert!(ensure_startup(ROLE_STARTUP).is_ok());
        assert_matches!(ensure_startup(ROLE_STUDENT), Err(CoreError::Forbidden(_)));

        assert!(ensure_student(ROLE_STUDENT).is_ok());
        assert_matches!(ensure_student(ROLE_STARTUP), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn test_project_owner() {
        assert!(ensure_project_owner(1, ROLE_STARTUP, 1).is_ok());
        // Right kind, wrong owner.
        assert_matches!(
            ensure_project_owner(2, ROLE_STARTUP, 1),
            Err(CoreError::Forbidden(_))
        );
        // Owner id matches but the principal is a student: kind check wins.
        assert_matches!(
            ensure_project_owner(1, ROLE_STUDENT, 1),
            Err(CoreError::Forbidden(_))
        );
    }
}
