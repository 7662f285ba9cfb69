use std::time::{Duration, Instant};

use log::debug;
use warp::{
    http::StatusCode,
    reject,
    reply::{json, with_header, with_status, Reply},
};

use crate::dates::parse_date;
use crate::desk::Registered;
use crate::environment::Environment;
use crate::errors::DeskError;
use crate::kinds::Sms;
use crate::record::{Kind, RecordId};
use crate::roster::NewTechnician;
use crate::routes::{
    query::{ListQuery, StatusUpdate, TechnicianQuery},
    rejection::{Context, Rejection},
    response::SuccessResponse,
};

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($expression:stmt);+) => {
        let start = Instant::now();

        let result = { $($expression)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

pub async fn list<K: Registered>(
    environment: Environment,
    query: ListQuery<K::Status>,
) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::list(K::COLLECTION), e);

        let query = query.into_query().map_err(error_handler)?;
        let records = environment.desk.query::<K>(&query).map_err(error_handler)?;

        json(&records)
    }
}

pub async fn create<K: Registered>(environment: Environment, fields: K) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::create(K::COLLECTION), e);

        fields.validate().map_err(error_handler)?;
        let record = environment.desk.create(fields).map_err(error_handler)?;

        let url = environment
            .urls
            .record(K::COLLECTION, record.id())
            .map_err(|source| DeskError::InvalidUrl { source })
            .map_err(error_handler)?;

        with_header(with_status(json(&record), StatusCode::CREATED), "location", url.as_str())
    }
}

pub async fn retrieve<K: Registered>(environment: Environment, id: String) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::retrieve(K::COLLECTION, id.clone()), e);

        let record = environment
            .desk
            .get::<K>(&RecordId::from(id.as_str()))
            .map_err(error_handler)?;

        json(&record)
    }
}

pub async fn update<K: Registered>(environment: Environment, id: String, fields: K) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::update(K::COLLECTION, id.clone()), e);

        fields.validate().map_err(error_handler)?;
        let record = environment
            .desk
            .update(&RecordId::from(id.as_str()), fields)
            .map_err(error_handler)?;

        json(&record)
    }
}

pub async fn update_status<K: Registered>(
    environment: Environment,
    id: String,
    update: StatusUpdate<K::Status>,
) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::update_status(K::COLLECTION, id.clone()), e);

        let record = environment
            .desk
            .update_status::<K>(&RecordId::from(id.as_str()), update.status)
            .map_err(error_handler)?;

        json(&record)
    }
}

pub async fn delete<K: Registered>(environment: Environment, id: String) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::delete(K::COLLECTION, id.clone()), e);

        debug!(environment.logger, "Deleting record..."; "collection" => K::COLLECTION, "id" => &id);
        environment
            .desk
            .remove::<K>(&RecordId::from(id.as_str()))
            .map_err(error_handler)?;

        StatusCode::NO_CONTENT
    }
}

pub async fn toggle_complaint(environment: Environment, id: String) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::toggle_complaint(id.clone()), e);

        let status = environment
            .desk
            .toggle_complaint(&RecordId::from(id.as_str()))
            .map_err(error_handler)?;

        json(&SuccessResponse::Toggled {
            id: id.clone(),
            status: status.to_string(),
        })
    }
}

pub async fn technicians(environment: Environment, query: TechnicianQuery) -> RouteResult {
    timed! {
        let technicians = environment
            .desk
            .technicians(query.district)
            .map_err(|e| Rejection::new(Context::technicians(), e))?;

        json(&technicians)
    }
}

pub async fn add_technician(environment: Environment, new: NewTechnician) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::add_technician(), e);

        let technician = environment.desk.add_technician(new).map_err(error_handler)?;

        let url = environment
            .urls
            .record("technicians", &technician.id)
            .map_err(|source| DeskError::InvalidUrl { source })
            .map_err(error_handler)?;

        with_header(with_status(json(&technician), StatusCode::CREATED), "location", url.as_str())
    }
}

pub async fn technician(environment: Environment, id: String) -> RouteResult {
    timed! {
        let technician = environment
            .desk
            .technician(&RecordId::from(id.as_str()))
            .map_err(|e| Rejection::new(Context::technician(id.clone()), e))?;

        json(&technician)
    }
}

pub async fn technician_report(environment: Environment, id: String) -> RouteResult {
    timed! {
        let report = environment
            .desk
            .technician_report(&RecordId::from(id.as_str()))
            .map_err(|e| Rejection::new(Context::technician_report(id.clone()), e))?;

        json(&report)
    }
}

pub async fn appointments_on(environment: Environment, date: String) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::appointments_on(date.clone()), e);

        let day = parse_date(&date)
            .map_err(|source| DeskError::InvalidDate { source })
            .map_err(error_handler)?;
        let appointments = environment.desk.appointments_on(day).map_err(error_handler)?;

        json(&appointments)
    }
}

pub async fn available_technicians(environment: Environment, date: String) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::available_technicians(date.clone()), e);

        let day = parse_date(&date)
            .map_err(|source| DeskError::InvalidDate { source })
            .map_err(error_handler)?;
        let technicians = environment.desk.available_technicians(day).map_err(error_handler)?;

        json(&technicians)
    }
}

pub async fn send_sms(environment: Environment, sms: Sms) -> RouteResult {
    timed! {
        let error_handler = |e: DeskError| Rejection::new(Context::send_sms(), e);

        let record = environment
            .desk
            .send_sms(&environment.config.sms_sender, sms)
            .map_err(error_handler)?;

        let url = environment
            .urls
            .record(Sms::COLLECTION, record.id())
            .map_err(|source| DeskError::InvalidUrl { source })
            .map_err(error_handler)?;

        with_header(with_status(json(&record), StatusCode::CREATED), "location", url.as_str())
    }
}

pub async fn summary(environment: Environment) -> RouteResult {
    timed! {
        let summary = environment
            .desk
            .summary()
            .map_err(|e| Rejection::new(Context::summary(), e))?;

        json(&summary)
    }
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
