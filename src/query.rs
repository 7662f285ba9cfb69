use time::Date;

use crate::normalization::fold;
use crate::record::{Kind, Record, Span, Status};

/// An inclusive range of calendar dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    pub fn new(from: Date, to: Date) -> Self {
        DateRange { from, to }
    }

    /// A range covering a single day.
    pub fn day(date: Date) -> Self {
        DateRange::new(date, date)
    }

    pub fn contains(&self, date: Date) -> bool {
        self.from <= date && date <= self.to
    }

    /// Whether the whole span lies within the range. A reversed range
    /// covers nothing.
    pub fn covers(&self, span: Span) -> bool {
        match span {
            Span::On(date) => self.contains(date),
            Span::Between(start, end) => self.contains(start) && self.contains(end),
        }
    }
}

/// What to select from a collection. Every criterion is optional and
/// they combine with AND; the default selects everything.
#[derive(Clone, Debug, PartialEq)]
pub struct Query<S: Status> {
    /// Case-insensitive substring to look for in the searchable fields.
    pub text: String,

    pub date_range: Option<DateRange>,

    pub status: Option<S>,
}

impl<S: Status> Default for Query<S> {
    fn default() -> Self {
        Query {
            text: String::new(),
            date_range: None,
            status: None,
        }
    }
}

impl<S: Status> Query<S> {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Query {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn within(from: Date, to: Date) -> Self {
        Query {
            date_range: Some(DateRange::new(from, to)),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    /// Prepares the query for matching many records.
    pub(crate) fn matcher(&self) -> Matcher<'_, S> {
        Matcher {
            needle: fold(&self.text),
            query: self,
        }
    }
}

/// A query with its search text folded once up front.
pub(crate) struct Matcher<'a, S: Status> {
    needle: String,
    query: &'a Query<S>,
}

impl<'a, S: Status> Matcher<'a, S> {
    /// Whether `record` is selected. `related` is extra searchable text
    /// that doesn’t live on the record itself.
    pub(crate) fn matches<K>(&self, record: &Record<K>, related: &[String]) -> bool
    where K: Kind<Status = S> {
        self.matches_status(record) && self.matches_dates(record) && self.matches_text(record, related)
    }

    fn matches_status<K>(&self, record: &Record<K>) -> bool
    where K: Kind<Status = S> {
        self.query.status.map_or(true, |status| status == record.status)
    }

    fn matches_dates<K>(&self, record: &Record<K>) -> bool
    where K: Kind<Status = S> {
        self.query
            .date_range
            .map_or(true, |range| range.covers(record.span()))
    }

    fn matches_text<K>(&self, record: &Record<K>, related: &[String]) -> bool
    where K: Kind<Status = S> {
        if self.needle.is_empty() {
            return true;
        }

        let needle = self.needle.as_str();
        let fields = record.fields.searchable();

        fields
            .iter()
            .map(|field| &**field)
            .chain(related.iter().map(String::as_str))
            .any(|field| fold(field).contains(needle))
    }
}
