//! The fixed records every collection starts from and is reset to.

use serde::de::DeserializeOwned;

use restbox_core::error::{RecordStoreError, RecordStoreResult};

use crate::resources::{todo::Todo, user::User};

const TODOS: &str = include_str!("../seed/todos.json");
const USERS: &str = include_str!("../seed/users.json");

/// The seed todos: ids 1 through 12.
pub fn todos() -> RecordStoreResult<Vec<Todo>> {
    decode("todos", TODOS)
}

/// The seed users: ids 1 through 5.
pub fn users() -> RecordStoreResult<Vec<User>> {
    decode("users", USERS)
}

fn decode<T: DeserializeOwned>(collection: &str, raw: &str) -> RecordStoreResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|err| {
        RecordStoreError::ValidationFailed(format!("invalid {collection} seed: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn todo_seed_has_ids_one_to_twelve() {
        let todos = todos().unwrap();

        assert_eq!(todos.iter().map(|t| t.id).collect::<Vec<_>>(), (1..=12).collect::<Vec<_>>());
        assert!(todos.iter().all(|t| !t.title.is_empty() && t.created_at <= t.updated_at));
    }

    #[test]
    fn user_seed_is_unique() {
        let users = users().unwrap();

        assert_eq!(users.len(), 5);
        assert_eq!(users.iter().map(|u| &u.username).collect::<HashSet<_>>().len(), 5);
        assert_eq!(users.iter().map(|u| &u.email).collect::<HashSet<_>>().len(), 5);
    }
}
