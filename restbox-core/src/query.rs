//! Query construction for collection reads.
//!
//! A query is applied strictly in this order: equality filters, free-text search,
//! stable sort, then pagination. Field names are closed enumerations
//! ([`RecordField`]), so a query can only ever name fields the record kind has.
//!
//! # Query Building
//!
//! ```ignore
//! use restbox_core::query::{Query, Filter, Pagination, SortDirection};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq(TodoField::UserId, 1).and(Filter::eq(TodoField::Completed, false)))
//!     .search("rapor")
//!     .sort(TodoField::CreatedAt, SortDirection::Desc)
//!     .paginate(Pagination::windowed(2, 5)?)
//!     .build();
//! ```

use std::str::FromStr;

use crate::{
    error::{RecordStoreError, RecordStoreResult},
    page::PaginationParams,
    record::RecordField,
    value::FilterValue,
};

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    #[default]
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    Desc,
}

impl FromStr for SortDirection {
    type Err = RecordStoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(RecordStoreError::ValidationFailed(format!(
                "invalid sort order '{other}', expected 'asc' or 'desc'"
            ))),
        }
    }
}

/// Sort specification for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    /// The field to sort by.
    pub field: F,
    /// The sort direction.
    pub direction: SortDirection,
}

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    /// Equal to (exact match).
    Eq,
    /// Text field contains the value, ignoring case.
    Contains,
}

/// A filter expression over the fields `F` of one record kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<F> {
    /// Logical AND of multiple expressions (all must match).
    And(Vec<Expr<F>>),
    /// Logical OR of multiple expressions (any must match).
    Or(Vec<Expr<F>>),
    /// Field comparison expression.
    Field {
        field: F,
        op: FieldOp,
        value: FilterValue,
    },
}

impl<F> Expr<F> {
    /// Creates a field comparison expression.
    pub fn field(field: F, op: FieldOp, value: FilterValue) -> Self {
        Expr::Field { field, op, value }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: Expr<F>) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Matches records where the field equals the value.
    pub fn eq<F>(field: F, value: impl Into<FilterValue>) -> Expr<F> {
        Expr::field(field, FieldOp::Eq, value.into())
    }

    /// Matches records whose text field contains the value, ignoring case.
    pub fn contains<F>(field: F, value: impl Into<FilterValue>) -> Expr<F> {
        Expr::field(field, FieldOp::Contains, value.into())
    }

    /// Combines expressions such that all must match. An empty list matches everything.
    pub fn and<F>(exprs: impl IntoIterator<Item = Expr<F>>) -> Expr<F> {
        Expr::And(exprs.into_iter().collect())
    }

    /// Combines expressions such that any can match. An empty list matches nothing.
    pub fn or<F>(exprs: impl IntoIterator<Item = Expr<F>>) -> Expr<F> {
        Expr::Or(exprs.into_iter().collect())
    }

    /// Builds the free-text search expression for `term` over the searchable fields.
    pub fn search<F: RecordField>(term: &str) -> Expr<F> {
        Filter::or(
            F::searchable()
                .iter()
                .map(|field| Filter::contains(*field, term)),
        )
    }
}

/// How the sorted result is cut down before it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// Return the full result.
    #[default]
    Unbounded,
    /// Return at most this many records, without page metadata.
    Capped(usize),
    /// Return one page together with page metadata.
    Windowed(PaginationParams),
}

impl Pagination {
    /// Creates a capped pagination.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::ValidationFailed`] if `limit` is zero.
    pub fn capped(limit: usize) -> RecordStoreResult<Self> {
        if limit == 0 {
            return Err(RecordStoreError::ValidationFailed("limit must be positive".into()));
        }

        Ok(Pagination::Capped(limit))
    }

    /// Creates a windowed pagination. See [`PaginationParams::new`].
    pub fn windowed(page: usize, per_page: usize) -> RecordStoreResult<Self> {
        Ok(Pagination::Windowed(PaginationParams::new(page, per_page)?))
    }
}

/// A structured read query over records with fields `F`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<F> {
    /// Equality filter. Every predicate must hold.
    pub filter: Option<Expr<F>>,
    /// Free-text search term.
    pub search: Option<String>,
    /// Sort specification. Without one, insertion order is kept.
    pub sort: Option<Sort<F>>,
    /// Output mode.
    pub pagination: Pagination,
}

impl<F> Default for Query<F> {
    fn default() -> Self {
        Query {
            filter: None,
            search: None,
            sort: None,
            pagination: Pagination::Unbounded,
        }
    }
}

impl<F> Query<F> {
    /// Creates a query that returns the whole collection in insertion order.
    pub fn new() -> Self {
        Query::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder<F> {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone)]
pub struct QueryBuilder<F> {
    query: Query<F>,
}

impl<F> QueryBuilder<F> {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Adds a filter expression. Repeated calls are combined with AND.
    pub fn filter(mut self, filter: Expr<F>) -> Self {
        self.query.filter = Some(match self.query.filter.take() {
            Some(existing) => existing.and(filter),
            None => filter,
        });
        self
    }

    /// Sets the free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.query.search = Some(term.into());
        self
    }

    /// Sets the sort specification.
    pub fn sort(mut self, field: F, direction: SortDirection) -> Self {
        self.query.sort = Some(Sort { field, direction });
        self
    }

    /// Sets the output mode.
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.query.pagination = pagination;
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query<F> {
        self.query
    }
}

impl<F> Default for QueryBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Visitor over filter expressions, implemented by each backend's evaluator.
pub trait QueryVisitor<F> {
    type Output;

    fn visit_and(&mut self, exprs: &[Expr<F>]) -> RecordStoreResult<Self::Output>;
    fn visit_or(&mut self, exprs: &[Expr<F>]) -> RecordStoreResult<Self::Output>;
    fn visit_field(
        &mut self,
        field: &F,
        op: &FieldOp,
        value: &FilterValue,
    ) -> RecordStoreResult<Self::Output>;

    fn visit_expr(&mut self, expr: &Expr<F>) -> RecordStoreResult<Self::Output> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Or(exprs) => self.visit_or(exprs),
            Expr::Field { field, op, value } => self.visit_field(field, op, value),
        }
    }
}
