use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use restbox_core::{
    error::RecordStoreResult,
    record::{Record, RecordField, RecordId, reject_empty_text, require_positive, require_text},
    value::FieldValue,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub owner: RecordId,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Id,
    Owner,
    Title,
    Done,
    CreatedAt,
}

impl RecordField for TaskField {
    fn all() -> &'static [Self] {
        &[TaskField::Id, TaskField::Owner, TaskField::Title, TaskField::Done, TaskField::CreatedAt]
    }

    fn searchable() -> &'static [Self] {
        &[TaskField::Title]
    }

    fn name(&self) -> &'static str {
        match self {
            TaskField::Id => "id",
            TaskField::Owner => "owner",
            TaskField::Title => "title",
            TaskField::Done => "done",
            TaskField::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskDraft {
    pub owner: Option<i64>,
    pub title: Option<String>,
    pub done: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskPatch {
    pub owner: Option<i64>,
    pub title: Option<String>,
    pub done: Option<bool>,
}

impl Record for Task {
    type Field = TaskField;
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn collection_name() -> &'static str {
        "tasks"
    }

    fn record_name() -> &'static str {
        "task"
    }

    fn field(&self, field: TaskField) -> FieldValue<'_> {
        match field {
            TaskField::Id => FieldValue::Integer(self.id as i64),
            TaskField::Owner => FieldValue::Integer(self.owner as i64),
            TaskField::Title => FieldValue::Text(&self.title),
            TaskField::Done => FieldValue::Bool(self.done),
            TaskField::CreatedAt => FieldValue::Timestamp(self.created_at),
        }
    }

    fn validate_draft(draft: &TaskDraft) -> RecordStoreResult<()> {
        require_positive("owner", draft.owner)?;
        require_text("title", draft.title.as_deref())
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }

    fn validate_patch(patch: &TaskPatch) -> RecordStoreResult<()> {
        if patch.owner.is_some() {
            require_positive("owner", patch.owner)?;
        }
        reject_empty_text("title", patch.title.as_deref())
    }

    fn from_draft(id: RecordId, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Task {
            id,
            owner: draft.owner.unwrap_or_default() as RecordId,
            title: draft.title.unwrap_or_default(),
            done: draft.done.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn replaced_by(&self, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Task {
            created_at: self.created_at,
            ..Task::from_draft(self.id, draft, now)
        }
    }

    fn merged_with(&self, patch: TaskPatch, now: DateTime<Utc>) -> Self {
        Task {
            id: self.id,
            owner: patch.owner.map_or(self.owner, |owner| owner as RecordId),
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            done: patch.done.unwrap_or(self.done),
            created_at: self.created_at,
            updated_at: now,
        }
    }

    fn conflict_with(&self, other: &Self) -> Option<&'static str> {
        (self.title == other.title).then_some("title")
    }
}

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap()
}

pub fn task(id: RecordId, owner: RecordId, title: &str, done: bool, day: u32) -> Task {
    Task {
        id,
        owner,
        title: title.to_string(),
        done,
        created_at: at(day),
        updated_at: at(day),
    }
}

pub fn seed() -> Vec<Task> {
    vec![
        task(1, 1, "Write docs", false, 3),
        task(2, 1, "Unit tests", true, 1),
        task(3, 2, "Code review", true, 5),
        task(4, 2, "Release notes", false, 2),
        task(5, 3, "Review budget", false, 4),
    ]
}

pub fn draft(owner: i64, title: &str) -> TaskDraft {
    TaskDraft {
        owner: Some(owner),
        title: Some(title.to_string()),
        done: None,
    }
}
