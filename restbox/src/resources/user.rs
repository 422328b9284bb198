use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use restbox_core::{
    error::RecordStoreResult,
    query::Expr,
    record::{Record, RecordField, RecordId, reject_empty_text, require_text},
    value::FieldValue,
};

use crate::{adapter::QueryParams, resources::Resource};

/// A registered user. `username` and `email` are unique across the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Name,
    Username,
    Email,
}

impl RecordField for UserField {
    fn all() -> &'static [Self] {
        &[UserField::Id, UserField::Name, UserField::Username, UserField::Email]
    }

    fn searchable() -> &'static [Self] {
        &[UserField::Name, UserField::Username, UserField::Email]
    }

    fn name(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Name => "name",
            UserField::Username => "username",
            UserField::Email => "email",
        }
    }
}

/// Body of a user create or full replace.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserDraft {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub company: Option<Company>,
    pub address: Option<Address>,
}

/// Body of a user merge. Nested records are replaced as a whole when supplied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub company: Option<Company>,
    pub address: Option<Address>,
}

impl Record for User {
    type Field = UserField;
    type Draft = UserDraft;
    type Patch = UserPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn collection_name() -> &'static str {
        "users"
    }

    fn record_name() -> &'static str {
        "user"
    }

    fn field(&self, field: UserField) -> FieldValue<'_> {
        match field {
            UserField::Id => FieldValue::Integer(self.id as i64),
            UserField::Name => FieldValue::Text(&self.name),
            UserField::Username => FieldValue::Text(&self.username),
            UserField::Email => FieldValue::Text(&self.email),
        }
    }

    fn validate_draft(draft: &UserDraft) -> RecordStoreResult<()> {
        require_text("name", draft.name.as_deref())?;
        require_text("email", draft.email.as_deref())?;
        require_text("username", draft.username.as_deref())
    }

    fn validate_patch(patch: &UserPatch) -> RecordStoreResult<()> {
        reject_empty_text("name", patch.name.as_deref())?;
        reject_empty_text("email", patch.email.as_deref())?;
        reject_empty_text("username", patch.username.as_deref())
    }

    fn from_draft(id: RecordId, draft: UserDraft, _now: DateTime<Utc>) -> Self {
        User {
            id,
            name: draft.name.unwrap_or_default(),
            username: draft.username.unwrap_or_default(),
            email: draft.email.unwrap_or_default(),
            phone: draft.phone.unwrap_or_default(),
            website: draft.website.unwrap_or_default(),
            company: draft.company.unwrap_or_default(),
            address: draft.address.unwrap_or_default(),
        }
    }

    fn replaced_by(&self, draft: UserDraft, now: DateTime<Utc>) -> Self {
        User::from_draft(self.id, draft, now)
    }

    fn merged_with(&self, patch: UserPatch, _now: DateTime<Utc>) -> Self {
        let current = self.clone();

        User {
            id: current.id,
            name: patch.name.unwrap_or(current.name),
            username: patch.username.unwrap_or(current.username),
            email: patch.email.unwrap_or(current.email),
            phone: patch.phone.unwrap_or(current.phone),
            website: patch.website.unwrap_or(current.website),
            company: patch.company.unwrap_or(current.company),
            address: patch.address.unwrap_or(current.address),
        }
    }

    fn conflict_with(&self, other: &Self) -> Option<&'static str> {
        if self.username == other.username {
            Some("username")
        } else if self.email == other.email {
            Some("email")
        } else {
            None
        }
    }
}

impl Resource for User {
    fn filters(_params: &QueryParams) -> RecordStoreResult<Vec<Expr<UserField>>> {
        Ok(Vec::new())
    }
}
