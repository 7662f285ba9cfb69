use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::errors::DeskError;

/// The identifier of a record. Opaque; unique within one collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Draws a new random ID. Callers that need uniqueness within a
    /// collection still have to check for collisions.
    pub fn generate() -> Self {
        RecordId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The lifecycle label of a record. Every kind declares its own closed
/// set with `statuses!`; any member may replace any other.
pub trait Status:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Every status, in declaration order.
    const ALL: &'static [Self];
}

/// The dates a record is filtered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Span {
    /// A single date, such as the day a complaint was filed.
    On(Date),

    /// A start and an end, such as a campaign’s run.
    Between(Date, Date),
}

/// The fields of one kind of record, along with what the collection
/// needs to know about them.
pub trait Kind:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Status: Status;

    /// The name of the collection, also used as its URL path segment.
    const COLLECTION: &'static str;

    /// The status assigned to newly created records.
    const INITIAL_STATUS: Self::Status;

    /// The fields inspected by text queries.
    fn searchable(&self) -> Vec<Cow<'_, str>>;

    /// The dates inspected by date range queries.
    fn span(&self, created_at: OffsetDateTime) -> Span;

    /// Checks that every required field is present. The collection
    /// never calls this; it’s for whoever collects the input.
    fn validate(&self) -> Result<(), DeskError> {
        Ok(())
    }
}

/// Fails with [`DeskError::MissingField`] if `value` is blank.
pub fn require(name: &'static str, value: &str) -> Result<(), DeskError> {
    if value.trim().is_empty() {
        Err(DeskError::MissingField(name))
    } else {
        Ok(())
    }
}

/// A single record in a collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record<K: Kind> {
    /// The ID of the record.
    pub(crate) id: RecordId,

    /// The current status.
    pub(crate) status: K::Status,

    /// The date and time it was created.
    #[serde(with = "time::serde::timestamp")]
    pub(crate) created_at: OffsetDateTime,

    /// The kind-specific fields.
    #[serde(flatten)]
    pub(crate) fields: K,
}

impl<K: Kind> Record<K> {
    pub fn new(id: RecordId, status: K::Status, created_at: OffsetDateTime, fields: K) -> Self {
        Record {
            id,
            status,
            created_at,
            fields,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn status(&self) -> K::Status {
        self.status
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn fields(&self) -> &K {
        &self.fields
    }

    pub fn span(&self) -> Span {
        self.fields.span(self.created_at)
    }
}
