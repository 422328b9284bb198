//! Query-string parameters and their translation into engine queries.

use std::collections::HashMap;

use restbox_core::{
    error::{RecordStoreError, RecordStoreResult},
    query::{Filter, Pagination, Query, SortDirection},
    record::RecordField,
};

use crate::resources::Resource;

/// Raw query-string parameters. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from key/value pairs. Later duplicates win.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect()
        )
    }

    /// Returns a non-empty parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Parses an integer parameter.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::ValidationFailed`] if the value is not an integer.
    pub fn integer(&self, key: &str) -> RecordStoreResult<Option<i64>> {
        self.get(key)
            .map(|raw| {
                raw.parse::<i64>().map_err(|_| {
                    RecordStoreError::ValidationFailed(format!("{key} must be an integer, got '{raw}'"))
                })
            })
            .transpose()
    }

    /// Parses a strictly positive integer parameter.
    pub fn positive(&self, key: &str) -> RecordStoreResult<Option<usize>> {
        match self.integer(key)? {
            Some(value) if value > 0 => Ok(usize::try_from(value).ok()),
            Some(_) => Err(RecordStoreError::ValidationFailed(format!("{key} must be positive"))),
            None => Ok(None),
        }
    }

    /// Parses a `true`/`false` parameter.
    pub fn boolean(&self, key: &str) -> RecordStoreResult<Option<bool>> {
        match self.get(key) {
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(raw) => Err(RecordStoreError::ValidationFailed(format!(
                "{key} must be 'true' or 'false', got '{raw}'"
            ))),
            None => Ok(None),
        }
    }

    /// Translates list parameters into a query over `R`.
    ///
    /// Recognized keys: the resource's filter keys, `search`, `sort`, `order`, `page`,
    /// and `limit` (or its alias `pageSize`). `page` together with a limit selects a
    /// windowed page; a limit alone caps the result.
    pub fn to_query<R: Resource>(&self) -> RecordStoreResult<Query<R::Field>> {
        let mut builder = Query::builder();

        let filters = R::filters(self)?;
        if !filters.is_empty() {
            builder = builder.filter(Filter::and(filters));
        }

        if let Some(term) = self.get("search") {
            builder = builder.search(term);
        }

        let direction = self
            .get("order")
            .map(str::parse::<SortDirection>)
            .transpose()?
            .unwrap_or_default();

        let field = match self.get("sort") {
            Some(name) => Some(R::Field::parse(name)?),
            None => R::default_sort(),
        };

        if let Some(field) = field {
            builder = builder.sort(field, direction);
        }

        let page_size = self.positive("pageSize")?;
        let limit = self.positive("limit")?.or(page_size);

        let pagination = match (self.positive("page")?, limit) {
            (Some(page), Some(limit)) => Pagination::windowed(page, limit)?,
            (None, Some(limit)) => Pagination::capped(limit)?,
            _ => Pagination::Unbounded,
        };

        Ok(builder.paginate(pagination).build())
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(params: HashMap<String, String>) -> Self {
        Self(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{todo::{Todo, TodoField}, user::{User, UserField}};
    use restbox_core::{page::PaginationParams, query::Sort};
    use rstest::rstest;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn todo_defaults_sort_by_id_ascending() {
        let query = QueryParams::new().to_query::<Todo>().unwrap();

        assert_eq!(query.sort, Some(Sort { field: TodoField::Id, direction: SortDirection::Asc }));
        assert_eq!(query.pagination, Pagination::Unbounded);
        assert!(query.filter.is_none());
    }

    #[test]
    fn user_defaults_to_insertion_order() {
        assert_eq!(QueryParams::new().to_query::<User>().unwrap().sort, None);
    }

    #[test]
    fn todo_filters_are_combined() {
        let query = params(&[("userId", "1"), ("completed", "false"), ("color", "red")])
            .to_query::<Todo>()
            .unwrap();

        assert_eq!(
            query.filter,
            Some(Filter::and([
                Filter::eq(TodoField::UserId, 1),
                Filter::eq(TodoField::Completed, false),
            ]))
        );
    }

    #[test]
    fn user_ignores_todo_filter_keys() {
        let query = params(&[("userId", "1")]).to_query::<User>().unwrap();

        assert!(query.filter.is_none());
    }

    #[rstest]
    #[case(&[("page", "2"), ("limit", "5")], Pagination::Windowed(PaginationParams::new(2, 5).unwrap()))]
    #[case(&[("page", "2"), ("pageSize", "5")], Pagination::Windowed(PaginationParams::new(2, 5).unwrap()))]
    #[case(&[("limit", "3")], Pagination::Capped(3))]
    #[case(&[("limit", "3"), ("pageSize", "7")], Pagination::Capped(3))]
    #[case(&[("page", "3")], Pagination::Unbounded)]
    #[case(&[("page", ""), ("limit", "")], Pagination::Unbounded)]
    fn pagination_modes(#[case] pairs: &[(&str, &str)], #[case] expected: Pagination) {
        assert_eq!(params(pairs).to_query::<Todo>().unwrap().pagination, expected);
    }

    #[rstest]
    #[case(&[("page", "0"), ("limit", "5")])]
    #[case(&[("page", "1"), ("limit", "-5")])]
    #[case(&[("limit", "0")])]
    #[case(&[("page", "1"), ("limit", "5"), ("pageSize", "0")])]
    #[case(&[("limit", "5"), ("pageSize", "many")])]
    #[case(&[("page", "-1")])]
    #[case(&[("limit", "ten")])]
    #[case(&[("userId", "abc")])]
    #[case(&[("completed", "yes")])]
    #[case(&[("order", "up")])]
    #[case(&[("sort", "priority")])]
    fn invalid_parameters_fail_validation(#[case] pairs: &[(&str, &str)]) {
        assert!(matches!(
            params(pairs).to_query::<Todo>(),
            Err(RecordStoreError::ValidationFailed(_))
        ));
    }

    #[test]
    fn user_sort_fields_are_closed() {
        let query = params(&[("sort", "email"), ("order", "desc")]).to_query::<User>().unwrap();

        assert_eq!(query.sort, Some(Sort { field: UserField::Email, direction: SortDirection::Desc }));
        assert!(params(&[("sort", "phone")]).to_query::<User>().is_err());
    }

    #[test]
    fn search_term_is_passed_through() {
        let query = params(&[("search", "Yap")]).to_query::<Todo>().unwrap();

        assert_eq!(query.search.as_deref(), Some("Yap"));
    }
}
