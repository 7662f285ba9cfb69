use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::DeskError;
use crate::normalization;
use crate::record::{require, Kind, RecordId, Span};

statuses! {
    AppointmentStatus {
        Scheduled => "Scheduled",
        InProgress => "In Progress",
        Completed => "Completed",
    }
}

/// A technician’s visit to a customer.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Appointment {
    pub technician_id: RecordId,

    /// When the visit is due.
    #[serde(with = "time::serde::timestamp")]
    pub scheduled_for: OffsetDateTime,

    #[serde(deserialize_with = "normalization::deserialize")]
    pub customer_name: String,

    pub address: String,
}

impl Kind for Appointment {
    type Status = AppointmentStatus;

    const COLLECTION: &'static str = "appointments";
    const INITIAL_STATUS: AppointmentStatus = AppointmentStatus::Scheduled;

    fn searchable(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.customer_name.as_str()),
            Cow::Borrowed(self.address.as_str()),
        ]
    }

    fn span(&self, _created_at: OffsetDateTime) -> Span {
        Span::On(self.scheduled_for.date())
    }

    fn validate(&self) -> Result<(), DeskError> {
        require("technician_id", self.technician_id.as_str())?;
        require("customer_name", &self.customer_name)?;
        require("address", &self.address)
    }
}
