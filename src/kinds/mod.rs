//! The kinds of record the desk keeps.

pub mod appointment;
pub mod campaign;
pub mod complaint;
pub mod issue;
pub mod payment;
pub mod repair;
pub mod sms;

pub use appointment::{Appointment, AppointmentStatus};
pub use campaign::{Campaign, CampaignStatus};
pub use complaint::{Complaint, ComplaintStatus};
pub use issue::{Issue, IssueStatus};
pub use payment::{Payment, PaymentStatus};
pub use repair::{Repair, RepairStatus};
pub use sms::{Sms, SmsStatus, Template};
