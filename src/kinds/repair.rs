use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::DeskError;
use crate::normalization;
use crate::record::{require, Kind, Span};

statuses! {
    RepairStatus {
        Pending => "Pending",
        InProgress => "In Progress",
        Completed => "Completed",
    }
}

/// A set-top box brought in for repair.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Repair {
    pub icno: String,

    pub mobile: String,

    #[serde(deserialize_with = "normalization::deserialize")]
    pub user_name: String,

    /// The model of the box.
    pub stb_model: String,

    /// What the customer reported.
    pub issue_description: String,
}

impl Kind for Repair {
    type Status = RepairStatus;

    const COLLECTION: &'static str = "repairs";
    const INITIAL_STATUS: RepairStatus = RepairStatus::Pending;

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
        require("stb_model", &self.stb_model)?;
        require("issue_description", &self.issue_description)
    }
}
