//! Row-query builder for the backend's REST row-access surface.
//!
//! A [`Query`] is a table plus an ordered list of query parameters in the
//! surface's filter grammar (`col=eq.value`, `or=(a,b)`, `order=col.desc`).
//! It performs no I/O; `supabase` turns it into a
//! [`RestRequest`](super::transport::RestRequest).

#[cfg(test)]
#[path = "postgrest_test.rs"]
mod postgrest_test;

use std::fmt::Display;

/// Sort direction for [`Query::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A row query against one table or view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn table(table: &str) -> Self {
        Self { table: table.to_owned(), params: Vec::new() }
    }

    #[must_use]
    pub fn select(self, columns: &str) -> Self {
        self.param("select", columns)
    }

    /// `column = value`.
    #[must_use]
    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("eq.{value}"))
    }

    /// `column IN (values)`.
    #[must_use]
    pub fn in_list<T: Display>(self, column: &str, values: &[T]) -> Self {
        self.param(column, format!("in.({})", join(values)))
    }

    /// Disjunction of raw filter expressions, e.g. [`eq_filter`] outputs.
    #[must_use]
    pub fn or(self, filters: &[String]) -> Self {
        self.param("or", format!("({})", filters.join(",")))
    }

    #[must_use]
    pub fn order(self, column: &str, direction: Direction) -> Self {
        self.param("order", format!("{column}.{}", direction.as_str()))
    }

    /// Inclusive row range, as `offset`/`limit`.
    #[must_use]
    pub fn range(self, from: usize, to: usize) -> Self {
        let limit = to.saturating_sub(from) + 1;
        self.param("offset", from).param("limit", limit)
    }

    #[must_use]
    pub fn limit(self, n: usize) -> Self {
        self.param("limit", n)
    }

    fn param(mut self, key: &str, value: impl Display) -> Self {
        self.params.push((key.to_owned(), value.to_string()));
        self
    }

    /// URL path relative to the backend base.
    pub fn path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Value of the first parameter named `key`.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn into_parts(self) -> (String, Vec<(String, String)>) {
        (self.path(), self.params)
    }
}

/// `column.eq.value`, for use inside [`Query::or`].
pub fn eq_filter(column: &str, value: impl Display) -> String {
    format!("{column}.eq.{value}")
}

/// `column.in.(values)`, for use inside [`Query::or`].
pub fn in_filter<T: Display>(column: &str, values: &[T]) -> String {
    format!("{column}.in.({})", join(values))
}

/// Case-insensitive substring match, for use inside [`Query::or`].
///
/// The term matches literally. `*` (the wildcard in PostgREST patterns) is
/// dropped since it cannot be escaped, and `%`/`_` are escaped for `LIKE`.
/// The result is double-quoted so commas and parentheses in user input
/// cannot break out of the surrounding `or=(..)` group.
pub fn ilike_filter(column: &str, term: &str) -> String {
    let literal: String = term.chars().filter(|c| *c != '*').collect();
    let pattern = literal.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    let quoted = pattern.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{column}.ilike.\"*{quoted}*\"")
}

fn join<T: Display>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}
