use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::DeskError;
use crate::normalization;
use crate::record::{require, Kind, Span};

statuses! {
    /// Complaints are either open or resolved, and may be reopened.
    ComplaintStatus {
        Open => "Open",
        Resolved => "Resolved",
    }
}

/// A customer complaint about a wrongly registered IC number.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Complaint {
    /// The IC number on file.
    pub icno: String,

    /// The customer’s mobile number.
    pub mobile: String,

    /// The IC number the customer was wrongly charged under.
    pub wrong_icno: String,

    /// The customer’s name.
    #[serde(deserialize_with = "normalization::deserialize")]
    pub user_name: String,
}

impl Kind for Complaint {
    type Status = ComplaintStatus;

    const COLLECTION: &'static str = "complaints";
    const INITIAL_STATUS: ComplaintStatus = ComplaintStatus::Open;

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
        require("wrong_icno", &self.wrong_icno)?;
        require("user_name", &self.user_name)
    }
}
