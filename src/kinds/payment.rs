use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::dates;
use crate::errors::DeskError;
use crate::record::{require, Kind, Span};

statuses! {
    PaymentStatus {
        Completed => "Completed",
        Pending => "Pending",
        Failed => "Failed",
    }
}

/// A subscription payment covering a billing period.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Payment {
    pub icno: String,

    pub mobile: String,

    /// The amount paid, in whole currency units.
    pub amount: u64,

    /// The day the payment was made.
    #[serde(with = "dates")]
    pub date: Date,

    #[serde(with = "dates")]
    pub period_start: Date,

    #[serde(with = "dates")]
    pub period_end: Date,
}

impl Kind for Payment {
    type Status = PaymentStatus;

    const COLLECTION: &'static str = "payments";
    const INITIAL_STATUS: PaymentStatus = PaymentStatus::Pending;

    fn searchable(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.icno.as_str()),
            Cow::Borrowed(self.mobile.as_str()),
            Cow::Owned(self.amount.to_string()),
        ]
    }

    fn span(&self, _created_at: OffsetDateTime) -> Span {
        Span::On(self.date)
    }

    fn validate(&self) -> Result<(), DeskError> {
        require("icno", &self.icno)?;
        require("mobile", &self.mobile)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::Payment;
    use crate::record::Kind;

    #[test]
    fn amounts_are_searchable_as_text() {
        let payment: Payment = serde_json::from_str(
            r#"{"icno":"123456","mobile":"1234567890","amount":100,"date":"2023-01-01","period_start":"2023-01-01","period_end":"2023-01-31"}"#,
        )
        .expect("parse payment");

        assert_eq!(payment.period_end, date!(2023 - 01 - 31));

        let searchable = payment.searchable();
        assert!(searchable.iter().any(|field| field == "100"));
    }
}
