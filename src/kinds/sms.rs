use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::DeskError;
use crate::record::{require, Kind, Span};

statuses! {
    SmsStatus {
        Queued => "Queued",
        Sent => "Sent",
        Failed => "Failed",
    }
}

/// The canned messages an agent can start from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    Appointment,
    Payment,
    Promotion,
}

impl Template {
    /// The text sent when the agent doesn’t write one.
    pub fn default_body(self) -> &'static str {
        match self {
            Template::Appointment => {
                "Reminder: a technician will visit you as scheduled. Reply to this message to reschedule."
            }
            Template::Payment => "Thank you, we have received your payment.",
            Template::Promotion => "Check out our latest offers on new packages this month.",
        }
    }
}

/// A text message sent to a single customer.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Sms {
    /// The recipient’s phone number.
    pub recipient: String,

    #[serde(default)]
    pub template: Option<Template>,

    #[serde(default)]
    pub body: String,
}

impl Sms {
    /// Fills in a blank body from the template, if there is one.
    pub fn with_template_body(mut self) -> Self {
        if self.body.trim().is_empty() {
            if let Some(template) = self.template {
                self.body = template.default_body().to_owned();
            }
        }

        self
    }
}

impl Kind for Sms {
    type Status = SmsStatus;

    const COLLECTION: &'static str = "sms";
    const INITIAL_STATUS: SmsStatus = SmsStatus::Queued;

    fn searchable(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.recipient.as_str()),
            Cow::Borrowed(self.body.as_str()),
        ]
    }

    fn span(&self, created_at: OffsetDateTime) -> Span {
        Span::On(created_at.date())
    }

    fn validate(&self) -> Result<(), DeskError> {
        require("recipient", &self.recipient)?;

        if self.template.is_none() {
            require("body", &self.body)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Sms, Template};
    use crate::errors::DeskError;
    use crate::record::Kind;

    fn sms(template: Option<Template>, body: &str) -> Sms {
        Sms {
            recipient: "1234567890".to_owned(),
            template,
            body: body.to_owned(),
        }
    }

    #[test]
    fn templates_fill_blank_bodies() {
        let filled = sms(Some(Template::Payment), "").with_template_body();

        assert_eq!(filled.body, Template::Payment.default_body());
    }

    #[test]
    fn templates_keep_written_bodies() {
        let kept = sms(Some(Template::Payment), "Paid, thanks!").with_template_body();

        assert_eq!(kept.body, "Paid, thanks!");
    }

    #[test]
    fn untemplated_messages_need_a_body() {
        assert!(matches!(sms(None, "").validate(), Err(DeskError::MissingField("body"))));
        assert!(sms(Some(Template::Promotion), "").validate().is_ok());
    }
}
