/*
[INPUT]:  Task and user identifiers
[OUTPUT]: Backend resource paths relative to the API base URL
[POS]:    HTTP layer - single source of truth for REST paths
[UPDATE]: When backend routes change
*/

/// Task collection path (list, create)
pub const TASKS: &str = "/tasks/tasks/";

/// Assignable users collection path
pub const USERS: &str = "/auth/users/";

/// Task collection scoped to one assignee
pub fn tasks_assigned_to(user_id: u64) -> String {
    format!("{TASKS}?assigned_to={user_id}")
}

/// Task item path (replace, delete)
pub fn task(task_id: u64) -> String {
    format!("{TASKS}{task_id}/")
}

/// Status-only update path, separate from the task item path
pub fn task_status(task_id: u64) -> String {
    format!("/tasks/update-status/{task_id}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_backend_routes() {
        assert_eq!(tasks_assigned_to(12), "/tasks/tasks/?assigned_to=12");
        assert_eq!(task(5), "/tasks/tasks/5/");
        assert_eq!(task_status(5), "/tasks/update-status/5/");
        assert_ne!(task(5), task_status(5));
    }
}
