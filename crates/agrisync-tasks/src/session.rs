/*
[INPUT]:  Authenticated user supplied by the caller
[OUTPUT]: Session context with role checks and list scoping
[POS]:    Context layer - passed explicitly into the task list controller
[UPDATE]: When role rules change
*/

use agrisync_adapter::{Role, User};

/// Active user context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }

    /// Assignment filter for the task list: workers only see their own tasks
    pub fn task_scope(&self) -> Option<u64> {
        match self.user.role {
            Role::Worker => Some(self.user.id),
            Role::Admin => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user(id: u64, role: Role) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: None,
            role,
        }
    }

    #[rstest]
    #[case(user(7, Role::Worker), Some(7))]
    #[case(user(1, Role::Admin), None)]
    fn scope_follows_role(#[case] user: User, #[case] expected: Option<u64>) {
        assert_eq!(Session::new(user).task_scope(), expected);
    }

    #[test]
    fn admin_check() {
        assert!(Session::new(user(1, Role::Admin)).is_admin());
        assert!(!Session::new(user(2, Role::Worker)).is_admin());
    }
}
