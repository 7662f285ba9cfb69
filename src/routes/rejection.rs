use serde::Serialize;
use warp::reject;

use crate::errors::DeskError;

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: DeskError,
}

impl Rejection {
    pub fn new(context: Context, error: DeskError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        FlattenedRejection {
            context: self.context.clone(),
            message: format!("{}", self.error),
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    #[serde(flatten)]
    pub(crate) context: Context,
    pub(crate) message: String,
}

/// The operation that failed, echoed back in error replies.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Context {
    List { collection: &'static str },
    Create { collection: &'static str },
    Retrieve { collection: &'static str, id: String },
    Update { collection: &'static str, id: String },
    UpdateStatus { collection: &'static str, id: String },
    Delete { collection: &'static str, id: String },
    ToggleComplaint { id: String },
    Technicians,
    AddTechnician,
    Technician { id: String },
    TechnicianReport { id: String },
    AppointmentsOn { date: String },
    AvailableTechnicians { date: String },
    SendSms,
    Summary,
}

impl Context {
    pub fn list(collection: &'static str) -> Context {
        Context::List { collection }
    }

    pub fn create(collection: &'static str) -> Context {
        Context::Create { collection }
    }

    pub fn retrieve(collection: &'static str, id: String) -> Context {
        Context::Retrieve { collection, id }
    }

    pub fn update(collection: &'static str, id: String) -> Context {
        Context::Update { collection, id }
    }

    pub fn update_status(collection: &'static str, id: String) -> Context {
        Context::UpdateStatus { collection, id }
    }

    pub fn delete(collection: &'static str, id: String) -> Context {
        Context::Delete { collection, id }
    }

    pub fn toggle_complaint(id: String) -> Context {
        Context::ToggleComplaint { id }
    }

    pub fn technicians() -> Context {
        Context::Technicians
    }

    pub fn add_technician() -> Context {
        Context::AddTechnician
    }

    pub fn technician(id: String) -> Context {
        Context::Technician { id }
    }

    pub fn technician_report(id: String) -> Context {
        Context::TechnicianReport { id }
    }

    pub fn appointments_on(date: String) -> Context {
        Context::AppointmentsOn { date }
    }

    pub fn available_technicians(date: String) -> Context {
        Context::AvailableTechnicians { date }
    }

    pub fn send_sms() -> Context {
        Context::SendSms
    }

    pub fn summary() -> Context {
        Context::Summary
    }
}

#[cfg(test)]
mod tests {
    use warp::reject;

    use super::{Context, Rejection};
    use crate::errors::DeskError;

    fn reject_summary() -> Result<(), reject::Rejection> {
        Err::<(), _>(Rejection::new(Context::summary(), DeskError::LockPoisoned))?;
        Ok(())
    }

    fn reject_plain() -> Result<(), reject::Rejection> {
        Err::<(), _>(DeskError::IncompleteDateRange)?;
        Ok(())
    }

    #[test]
    fn errors_convert_into_warp_rejections() {
        let wrapped = reject_summary().expect_err("reject summary");
        let found = wrapped.find::<Rejection>().expect("find wrapped rejection");
        assert!(matches!(found.error, DeskError::LockPoisoned));

        let plain = reject_plain().expect_err("reject plainly");
        assert!(matches!(plain.find::<DeskError>(), Some(DeskError::IncompleteDateRange)));
    }

    #[test]
    fn rejections_flatten_to_operation_and_message() {
        let rejection = Rejection::new(
            Context::delete("complaints", "9".to_owned()),
            DeskError::not_found("complaints", &"9".into()),
        );

        let json = serde_json::to_value(&rejection.flatten()).expect("serialize rejection");

        assert_eq!(
            json,
            serde_json::json!({
                "operation": "delete",
                "collection": "complaints",
                "id": "9",
                "message": "No record with ID 9 in complaints",
            })
        );
    }
}
