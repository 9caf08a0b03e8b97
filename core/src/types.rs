//! Domain DTOs for the todo API.
//!
//! These mirror the mock-server's schema but are defined independently;
//! the integration tests catch schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single todo item as returned by the API.
///
/// `created_at` is kept exactly as the server sent it and only formatted when
/// rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
}

/// Request payload for creating a new todo. A missing description is sent as
/// an explicit `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_todo_sends_null_description() {
        let input = CreateTodo {
            title: "Buy milk".to_string(),
            description: None,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["title"], "Buy milk");
        assert!(json["description"].is_null());
        assert!(json.as_object().unwrap().contains_key("description"));
    }

    #[test]
    fn completion_update_only_carries_completed() {
        let json = serde_json::to_value(UpdateTodo::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn todo_accepts_missing_description() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":3,"title":"Read","completed":false,"created_at":"2024-03-01T09:30:00"}"#,
        )
        .unwrap();
        assert_eq!(todo.id, 3);
        assert!(todo.description.is_none());
    }
}
