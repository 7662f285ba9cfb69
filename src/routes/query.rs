use serde::Deserialize;
use time::Date;

use crate::errors::DeskError;
use crate::query::{DateRange, Query};
use crate::record::Status;
use crate::roster::District;

/// The query string of a collection listing.
#[derive(Debug, Deserialize)]
#[serde(bound = "S: Status")]
pub struct ListQuery<S> {
    /// Text to search for.
    #[serde(default)]
    pub q: String,

    #[serde(default, with = "crate::dates::option")]
    pub from: Option<Date>,

    #[serde(default, with = "crate::dates::option")]
    pub to: Option<Date>,

    #[serde(default)]
    pub status: Option<S>,
}

impl<S: Status> ListQuery<S> {
    /// Checks that the date range is either complete or absent.
    pub fn into_query(self) -> Result<Query<S>, DeskError> {
        let date_range = match (self.from, self.to) {
            (Some(from), Some(to)) => Some(DateRange::new(from, to)),
            (None, None) => None,
            _ => return Err(DeskError::IncompleteDateRange),
        };

        let mut query = Query::all().with_text(self.q);

        if let Some(range) = date_range {
            query = query.with_date_range(range);
        }

        if let Some(status) = self.status {
            query = query.with_status(status);
        }

        Ok(query)
    }
}

#[derive(Debug, Deserialize)]
pub struct TechnicianQuery {
    #[serde(default)]
    pub district: Option<District>,
}

/// The body of a status change.
#[derive(Debug, Deserialize)]
#[serde(bound = "S: Status")]
pub struct StatusUpdate<S> {
    pub status: S,
}
