//! Convenient re-exports of commonly used types from restbox.
//!
//! ```ignore
//! use restbox::prelude::*;
//! ```

pub use restbox_core::{
    backend::{CollectionBackend, CollectionBackendBuilder},
    clock::{Clock, SystemClock},
    error::{RecordStoreError, RecordStoreResult},
    page::{Listing, Page, PageInfo, PaginationParams},
    query::{Expr, FieldOp, Filter, Pagination, Query, QueryBuilder, Sort, SortDirection},
    record::{Record, RecordField, RecordId},
};
pub use restbox_memory::{InMemoryCollection, MutationPolicy};

pub use crate::{
    adapter::{QueryParams, ResourceHandler, Response},
    api::{Api, ApiBuilder},
    resources::{
        Resource,
        todo::{Todo, TodoDraft, TodoField, TodoPatch},
        user::{Address, Company, Geo, User, UserDraft, UserField, UserPatch},
    },
};
