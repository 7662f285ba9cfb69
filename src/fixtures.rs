//! The sample data the dashboard starts with.

use time::macros::{date, datetime};
use time::OffsetDateTime;

use crate::desk::{Desk, Registered};
use crate::errors::DeskError;
use crate::kinds::*;
use crate::record::{Record, RecordId};
use crate::roster::{Day, District, Technician};

/// Fills `desk` with the sample records. Fails if any of their IDs are
/// already taken.
pub fn seed(desk: &Desk) -> Result<(), DeskError> {
    seed_technicians(desk)?;

    put(desk, "1", ComplaintStatus::Open, datetime!(2023-06-01 0:00 UTC), Complaint {
        icno: "123456".to_owned(),
        mobile: "1234567890".to_owned(),
        wrong_icno: "654321".to_owned(),
        user_name: "John Doe".to_owned(),
    })?;
    put(desk, "2", ComplaintStatus::Resolved, datetime!(2023-06-05 0:00 UTC), Complaint {
        icno: "234567".to_owned(),
        mobile: "2345678901".to_owned(),
        wrong_icno: "765432".to_owned(),
        user_name: "Alice Johnson".to_owned(),
    })?;

    put(desk, "1", IssueStatus::Open, datetime!(2023-06-01 0:00 UTC), Issue {
        icno: "123456".to_owned(),
        mobile: "1234567890".to_owned(),
        user_name: "John Doe".to_owned(),
        technician_id: "1".into(),
        district: Some(District::North),
        description: String::new(),
    })?;
    put(desk, "2", IssueStatus::InProgress, datetime!(2023-06-05 0:00 UTC), Issue {
        icno: "234567".to_owned(),
        mobile: "2345678901".to_owned(),
        user_name: "Alice Johnson".to_owned(),
        technician_id: "2".into(),
        district: Some(District::South),
        description: String::new(),
    })?;

    put(desk, "1", RepairStatus::InProgress, datetime!(2023-06-01 0:00 UTC), Repair {
        icno: "123456".to_owned(),
        mobile: "1234567890".to_owned(),
        user_name: "John Doe".to_owned(),
        stb_model: "Model X".to_owned(),
        issue_description: "No signal".to_owned(),
    })?;
    put(desk, "2", RepairStatus::Pending, datetime!(2023-06-05 0:00 UTC), Repair {
        icno: "234567".to_owned(),
        mobile: "2345678901".to_owned(),
        user_name: "Alice Johnson".to_owned(),
        stb_model: "Model Y".to_owned(),
        issue_description: "Freezing screen".to_owned(),
    })?;

    seed_campaigns(desk)?;

    put(desk, "1", AppointmentStatus::Scheduled, datetime!(2023-06-10 9:00 UTC), Appointment {
        technician_id: "1".into(),
        scheduled_for: datetime!(2023-06-15 10:00 UTC),
        customer_name: "Alice Johnson".to_owned(),
        address: "123 Main St".to_owned(),
    })?;
    put(desk, "2", AppointmentStatus::InProgress, datetime!(2023-06-10 9:00 UTC), Appointment {
        technician_id: "2".into(),
        scheduled_for: datetime!(2023-06-16 14:00 UTC),
        customer_name: "Bob Williams".to_owned(),
        address: "456 Elm St".to_owned(),
    })?;

    seed_payments(desk)
}

fn seed_technicians(desk: &Desk) -> Result<(), DeskError> {
    let technicians = vec![
        ("1", "John Doe", District::North, vec![Day::Monday, Day::Wednesday, Day::Friday]),
        ("2", "Jane Smith", District::South, vec![Day::Tuesday, Day::Thursday, Day::Saturday]),
        ("3", "Bob Brown", District::East, vec![Day::Monday, Day::Thursday]),
    ];

    for (id, name, district, availability) in technicians {
        desk.insert_technician(Technician {
            id: id.into(),
            name: name.to_owned(),
            district,
            availability,
        })?;
    }

    Ok(())
}

fn seed_campaigns(desk: &Desk) -> Result<(), DeskError> {
    let campaign = |name: &str, sent_count, delivery_rate, start_date, end_date| Campaign {
        name: name.to_owned(),
        message: String::new(),
        sent_count,
        delivery_rate,
        start_date,
        end_date,
    };

    put(desk, "1", CampaignStatus::Active, datetime!(2023-05-25 0:00 UTC),
        campaign("Summer Sale", 5000, 98.5, date!(2023 - 06 - 01), date!(2023 - 06 - 30)))?;
    put(desk, "2", CampaignStatus::Scheduled, datetime!(2023-06-20 0:00 UTC),
        campaign("New Product Launch", 0, 0.0, date!(2023 - 07 - 01), date!(2023 - 07 - 15)))?;
    put(desk, "3", CampaignStatus::Completed, datetime!(2023-04-25 0:00 UTC),
        campaign("Customer Feedback", 10000, 99.1, date!(2023 - 05 - 01), date!(2023 - 05 - 31)))
}

fn seed_payments(desk: &Desk) -> Result<(), DeskError> {
    let payments = vec![
        ("1", "123456", "1234567890", 100, PaymentStatus::Completed, date!(2023 - 01 - 01), date!(2023 - 01 - 31)),
        ("2", "234567", "2345678901", 200, PaymentStatus::Pending, date!(2023 - 01 - 02), date!(2023 - 02 - 01)),
        ("3", "345678", "3456789012", 300, PaymentStatus::Failed, date!(2023 - 01 - 03), date!(2023 - 02 - 02)),
    ];

    for (id, icno, mobile, amount, status, date, period_end) in payments {
        let created_at = date.midnight().assume_utc();

        put(desk, id, status, created_at, Payment {
            icno: icno.to_owned(),
            mobile: mobile.to_owned(),
            amount,
            date,
            period_start: date,
            period_end,
        })?;
    }

    Ok(())
}

fn put<K: Registered>(
    desk: &Desk,
    id: &str,
    status: K::Status,
    created_at: OffsetDateTime,
    fields: K,
) -> Result<(), DeskError> {
    desk.insert(Record::new(RecordId::from(id), status, created_at, fields))
}
