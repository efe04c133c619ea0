//! Principal role constants.
//!
//! A principal is either a student or a startup. The role is fixed at
//! registration and never changes; it is embedded in every access token.

/// A student principal: can apply to projects and manage their own profile.
pub const ROLE_STUDENT: &str = "student";

/// A startup principal: can post projects and manage their applicants.
pub const ROLE_STARTUP: &str = "startup";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_STARTUP];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_roles_accepted() {
        assert!(validate_role(ROLE_STUDENT).is_ok());
        assert!(validate_role(ROLE_STARTUP).is_ok());
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(validate_role("admin").is_err());
        assert!(validate_role("").is_err());
    }
}
