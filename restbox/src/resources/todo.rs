use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use restbox_core::{
    error::RecordStoreResult,
    query::{Expr, Filter},
    record::{Record, RecordField, RecordId, reject_empty_text, require_positive, require_text},
    value::FieldValue,
};

use crate::{adapter::QueryParams, resources::Resource};

/// A todo item owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: RecordId,
    /// Owning user. Not checked against the user collection.
    pub user_id: RecordId,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoField {
    Id,
    UserId,
    Title,
    Completed,
    CreatedAt,
    UpdatedAt,
}

impl RecordField for TodoField {
    fn all() -> &'static [Self] {
        &[
            TodoField::Id,
            TodoField::UserId,
            TodoField::Title,
            TodoField::Completed,
            TodoField::CreatedAt,
            TodoField::UpdatedAt,
        ]
    }

    fn searchable() -> &'static [Self] {
        &[TodoField::Title]
    }

    fn name(&self) -> &'static str {
        match self {
            TodoField::Id => "id",
            TodoField::UserId => "userId",
            TodoField::Title => "title",
            TodoField::Completed => "completed",
            TodoField::CreatedAt => "createdAt",
            TodoField::UpdatedAt => "updatedAt",
        }
    }
}

/// Body of a todo create or full replace.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDraft {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    /// Defaults to `false`.
    pub completed: Option<bool>,
}

/// Body of a todo merge. Only the supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl Record for Todo {
    type Field = TodoField;
    type Draft = TodoDraft;
    type Patch = TodoPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn collection_name() -> &'static str {
        "todos"
    }

    fn record_name() -> &'static str {
        "todo"
    }

    fn field(&self, field: TodoField) -> FieldValue<'_> {
        match field {
            TodoField::Id => FieldValue::Integer(self.id as i64),
            TodoField::UserId => FieldValue::Integer(self.user_id as i64),
            TodoField::Title => FieldValue::Text(&self.title),
            TodoField::Completed => FieldValue::Bool(self.completed),
            TodoField::CreatedAt => FieldValue::Timestamp(self.created_at),
            TodoField::UpdatedAt => FieldValue::Timestamp(self.updated_at),
        }
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }

    fn validate_draft(draft: &TodoDraft) -> RecordStoreResult<()> {
        require_positive("userId", draft.user_id)?;
        require_text("title", draft.title.as_deref())
    }

    fn validate_patch(patch: &TodoPatch) -> RecordStoreResult<()> {
        if patch.user_id.is_some() {
            require_positive("userId", patch.user_id)?;
        }

        reject_empty_text("title", patch.title.as_deref())
    }

    fn from_draft(id: RecordId, draft: TodoDraft, now: DateTime<Utc>) -> Self {
        Todo {
            id,
            user_id: draft.user_id.unwrap_or_default().unsigned_abs(),
            title: draft.title.unwrap_or_default(),
            completed: draft.completed.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn replaced_by(&self, draft: TodoDraft, now: DateTime<Utc>) -> Self {
        Todo {
            created_at: self.created_at,
            ..Todo::from_draft(self.id, draft, now)
        }
    }

    fn merged_with(&self, patch: TodoPatch, now: DateTime<Utc>) -> Self {
        Todo {
            id: self.id,
            user_id: patch
                .user_id
                .map_or(self.user_id, i64::unsigned_abs),
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            completed: patch.completed.unwrap_or(self.completed),
            created_at: self.created_at,
            updated_at: now,
        }
    }
}

impl Resource for Todo {
    fn filters(params: &QueryParams) -> RecordStoreResult<Vec<Expr<TodoField>>> {
        let mut filters = Vec::new();

        if let Some(user_id) = params.integer("userId")? {
            filters.push(Filter::eq(TodoField::UserId, user_id));
        }

        if let Some(completed) = params.boolean("completed")? {
            filters.push(Filter::eq(TodoField::Completed, completed));
        }

        Ok(filters)
    }

    fn default_sort() -> Option<TodoField> {
        Some(TodoField::Id)
    }
}
