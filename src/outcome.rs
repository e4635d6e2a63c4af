use serde::Serialize;

/// Result of a presentation-facing query.
///
/// No-match conditions are ordinary outcomes rather than errors so callers can render a
/// "no data" state by matching on the variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum QueryOutcome<T> {
    Found(T),
    Empty,
    ParseError(String),
}

impl<R> QueryOutcome<Vec<R>> {
    /// `Found` for a non-empty row set, `Empty` otherwise.
    pub fn from_rows(rows: Vec<R>) -> Self {
        if rows.is_empty() {
            QueryOutcome::Empty
        } else {
            QueryOutcome::Found(rows)
        }
    }
}

impl<T> QueryOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, QueryOutcome::Found(_))
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            QueryOutcome::Found(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<T> {
        match self {
            QueryOutcome::Found(data) => Some(data),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> QueryOutcome<U> {
        match self {
            QueryOutcome::Found(data) => QueryOutcome::Found(f(data)),
            QueryOutcome::Empty => QueryOutcome::Empty,
            QueryOutcome::ParseError(reason) => QueryOutcome::ParseError(reason),
        }
    }
}
