//! Typed field values and their comparison rules.
//!
//! Records expose their fields as borrowed [`FieldValue`]s, and filters carry owned
//! [`FilterValue`]s to compare against. Comparison rules depend on the value type:
//! text compares case-insensitively, numbers, booleans and timestamps by natural ordering.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// A borrowed view of a single record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Integer value (ids and foreign references)
    Integer(i64),
    /// Boolean value
    Bool(bool),
    /// Text value
    Text(&'a str),
    /// Point in time
    Timestamp(DateTime<Utc>),
}

impl<'a> FieldValue<'a> {
    /// Returns `true` if this field value equals the filter value exactly.
    ///
    /// Values of different types never match.
    pub fn matches(&self, value: &FilterValue) -> bool {
        match (self, value) {
            (FieldValue::Integer(a), FilterValue::Integer(b)) => a == b,
            (FieldValue::Bool(a), FilterValue::Bool(b)) => a == b,
            (FieldValue::Text(a), FilterValue::Text(b)) => *a == b.as_str(),
            _ => false,
        }
    }

    /// Returns `true` if this is a text value containing `needle`, ignoring case.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(text) => text
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => false,
        }
    }

    /// Orders two values of the same field.
    ///
    /// Values of different types compare as equal so that a stable sort leaves them in place.
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase()),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// An owned value that a filter compares record fields against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Integer(i64),
    Bool(bool),
    Text(String),
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Integer(value.into())
    }
}

/// Values past `i64::MAX` saturate instead of wrapping.
impl From<u64> for FilterValue {
    fn from(value: u64) -> Self {
        FilterValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}
