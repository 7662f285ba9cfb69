use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::DeskError;
use crate::normalization;
use crate::record::{require, Kind, RecordId, Span};
use crate::roster::District;

statuses! {
    IssueStatus {
        Open => "Open",
        InProgress => "In Progress",
        Resolved => "Resolved",
    }
}

/// A customer issue assigned to a technician.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Issue {
    pub icno: String,

    pub mobile: String,

    #[serde(deserialize_with = "normalization::deserialize")]
    pub user_name: String,

    /// The technician the issue is assigned to.
    pub technician_id: RecordId,

    #[serde(default)]
    pub district: Option<District>,

    #[serde(default)]
    pub description: String,
}

impl Kind for Issue {
    type Status = IssueStatus;

    const COLLECTION: &'static str = "issues";
    const INITIAL_STATUS: IssueStatus = IssueStatus::Open;

    // the technician's name is searchable too, but lives on the roster
    fn searchable(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.icno.as_str()),
            Cow::Borrowed(self.mobile.as_str()),
            Cow::Borrowed(self.user_name.as_str()),
        ]
    }

    fn span(&self, created_at: OffsetDateTime) -> Span {
        Span::On(created_at.date())
    }

    fn validate(&self) -> Result<(), DeskError> {
        require("icno", &self.icno)?;
        require("mobile", &self.mobile)?;
        require("user_name", &self.user_name)?;
        require("technician_id", self.technician_id.as_str())
    }
}
