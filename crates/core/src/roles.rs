//! Well-known role name constants and role-change rules.
//!
//! The names must match the `CHECK` constraint on `user_roles.role` in
//! `20260301000001_create_academy_schema.sql`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EMPLOYEE: &str = "employee";

/// Every assignable role.
pub const ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EMPLOYEE];

pub fn is_valid_role(role: &str) -> bool {
    ROLES.contains(&role)
}

/// Check that moving a user from `current` to `new` keeps the system
/// administrable.
///
/// `current` is `None` for users without a role row (treated as employees);
/// `admin_count` is the number of admins before the change.
pub fn check_role_change(
    current: Option<&str>,
    new: &str,
    admin_count: i64,
) -> Result<(), CoreError> {
    if !is_valid_role(new) {
        return Err(CoreError::Validation(format!(
            "Unknown role '{new}'. Expected one of: {}",
            ROLES.join(", ")
        )));
    }

    if current == Some(ROLE_ADMIN) && new != ROLE_ADMIN && admin_count <= 1 {
        return Err(CoreError::Conflict(
            "Cannot demote the last remaining admin".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(is_valid_role("admin"));
        assert!(is_valid_role("employee"));
        assert!(!is_valid_role("Admin"));
        assert!(!is_valid_role("superuser"));
    }

    #[test]
    fn unknown_target_role_is_a_validation_error() {
        assert!(matches!(
            check_role_change(None, "owner", 3),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn promoting_and_reassigning_is_allowed() {
        assert!(check_role_change(None, ROLE_ADMIN, 0).is_ok());
        assert!(check_role_change(Some(ROLE_EMPLOYEE), ROLE_ADMIN, 1).is_ok());
        assert!(check_role_change(Some(ROLE_ADMIN), ROLE_ADMIN, 1).is_ok());
    }

    #[test]
    fn demoting_one_of_several_admins_is_allowed() {
        assert!(check_role_change(Some(ROLE_ADMIN), ROLE_EMPLOYEE, 2).is_ok());
    }

    #[test]
    fn demoting_the_last_admin_conflicts() {
        assert!(matches!(
            check_role_change(Some(ROLE_ADMIN), ROLE_EMPLOYEE, 1),
            Err(CoreError::Conflict(_))
        ));
    }
}
