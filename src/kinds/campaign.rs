use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::dates;
use crate::errors::DeskError;
use crate::record::{require, Kind, Span};

statuses! {
    CampaignStatus {
        Active => "Active",
        Scheduled => "Scheduled",
        Completed => "Completed",
    }
}

/// A bulk SMS campaign running between two dates.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Campaign {
    pub name: String,

    /// The text sent to every recipient.
    #[serde(default)]
    pub message: String,

    /// How many messages have gone out so far.
    #[serde(default)]
    pub sent_count: u64,

    /// The percentage of sent messages that were delivered.
    #[serde(default)]
    pub delivery_rate: f64,

    #[serde(with = "dates")]
    pub start_date: Date,

    #[serde(with = "dates")]
    pub end_date: Date,
}

impl Kind for Campaign {
    type Status = CampaignStatus;

    const COLLECTION: &'static str = "campaigns";
    const INITIAL_STATUS: CampaignStatus = CampaignStatus::Scheduled;

    fn searchable(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.name.as_str())]
    }

    fn span(&self, _created_at: OffsetDateTime) -> Span {
        Span::Between(self.start_date, self.end_date)
    }

    fn validate(&self) -> Result<(), DeskError> {
        require("name", &self.name)
    }
}
