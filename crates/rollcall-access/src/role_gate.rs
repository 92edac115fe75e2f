//! Operation-level role checks.
//!
//! The gate only looks at the role claim, so it runs before identity
//! resolution and never touches the data store.

use rollcall_auth::AuthError;
use rollcall_models::Role;

pub const ALL_ROLES: &[Role] = &Role::ALL;
pub const SUPER_ADMIN_ONLY: &[Role] = &[Role::SuperAdmin];

/// Describes who may invoke one exposed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationConfig {
    pub name: &'static str,
    pub permitted_roles: &'static [Role],
}

impl OperationConfig {
    pub const fn new(name: &'static str, permitted_roles: &'static [Role]) -> Self {
        Self {
            name,
            permitted_roles,
        }
    }

    pub fn permits(&self, role: Role) -> bool {
        self.permitted_roles.contains(&role)
    }
}

pub fn check_role(role: Role, operation: &OperationConfig) -> Result<(), AuthError> {
    if operation.permits(role) {
        return Ok(());
    }

    tracing::warn!(
        security.event = "role_denied",
        role = %role,
        operation = operation.name,
        "Role not permitted for operation"
    );
    Err(AuthError::Forbidden {
        role,
        operation: operation.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_PARENT_SCHOOLS: OperationConfig =
        OperationConfig::new("list parent schools", SUPER_ADMIN_ONLY);

    #[test]
    fn test_permitted_role_passes() {
        assert!(check_role(Role::SuperAdmin, &LIST_PARENT_SCHOOLS).is_ok());
    }

    #[test]
    fn test_other_roles_are_forbidden() {
        for role in [Role::SchoolAdmin, Role::Principal, Role::Teacher, Role::Parent] {
            let err = check_role(role, &LIST_PARENT_SCHOOLS).unwrap_err();
            assert!(matches!(err, AuthError::Forbidden { role: r, .. } if r == role));
        }
    }

    #[test]
    fn test_predefined_sets() {
        assert_eq!(ALL_ROLES.len(), 5);
        assert_eq!(SUPER_ADMIN_ONLY, &[Role::SuperAdmin]);
    }

    #[test]
    fn test_forbidden_message_names_operation() {
        let err = check_role(Role::Parent, &LIST_PARENT_SCHOOLS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Access denied. Role parent is not permitted to list parent schools"
        );
    }
}
