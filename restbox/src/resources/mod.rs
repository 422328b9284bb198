//! The resource kinds served by restbox.
//!
//! Each kind is a [`Record`] plus the list parameters its boundary understands.

use restbox_core::{error::RecordStoreResult, query::Expr, record::Record};

use crate::adapter::QueryParams;

pub mod todo;
pub mod user;

/// A record kind exposed through the boundary adapter.
pub trait Resource: Record {
    /// Builds the equality filters named in list or bulk-delete parameters.
    ///
    /// Parameters this resource does not know are ignored.
    fn filters(params: &QueryParams) -> RecordStoreResult<Vec<Expr<Self::Field>>>;

    /// The sort applied when the caller names none.
    fn default_sort() -> Option<Self::Field> {
        None
    }
}
