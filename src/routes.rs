use std::sync::Arc;

use log::{error, Logger};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, with_status, Json, WithStatus};

use crate::errors::DeskError;

pub mod admin;
mod handlers;
mod query;
mod rejection;
mod response;

pub use internal::*;

/// The largest JSON body to accept.
const MAX_CONTENT_LENGTH: u64 = 64 * 1024;

pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<WithStatus<Json>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let e = &r.error;
        error!(logger, "Desk error"; "context" => ?r.context, "error" => ?r.error, "status" => %status_code_for(e), "message" => %r.error);
        let flattened = r.flatten();

        return Ok(with_status(json(&flattened), status_code_for(e)));
    }

    Err(rej)
}

fn status_code_for(e: &DeskError) -> StatusCode {
    use DeskError::*;

    match e {
        NotFound { .. } => StatusCode::NOT_FOUND,
        DuplicateId(..) => StatusCode::CONFLICT,
        MissingField(..) | IncompleteDateRange | InvalidDate { .. } => StatusCode::BAD_REQUEST,
        InvalidUrl { .. } | LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

mod internal {
    use warp::body::{content_length_limit, json};
    use warp::filters::BoxedFilter;
    use warp::path::end;
    use warp::reject::Rejection;
    use warp::{delete, get as g, path as p, path::param as par, post, put, query};
    use warp::{Filter, Reply};

    use super::{handlers, query as q, MAX_CONTENT_LENGTH};
    use crate::desk::Registered;
    use crate::environment::Environment;
    use crate::kinds::Sms;
    use crate::roster::NewTechnician;

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    macro_rules! route_filter {
    ($route_variable:ident; $first:expr) => (let $route_variable = $route_variable.and($first););
    ($route_variable:ident; $first:expr, $($rest:expr),+) => (
        let $route_variable = $route_variable.and($first);
        route_filter!($route_variable; $($rest),+);
    )
}

    macro_rules! route {
    ($name:ident<K> => $handler:ident, $route_variable:ident; $($filters:expr),+) => (
        pub fn $name<K: Registered>(environment: Environment) -> Route {
            let $route_variable = warp::any()
                .map(move || environment.clone())
                .and(p(K::COLLECTION));

            route_filter!($route_variable; $($filters),+);

            $route_variable.and_then(handlers::$handler::<K>)
                .boxed()
        }
    );
    ($name:ident => $handler:ident, $route_variable:ident; $prefix:expr; $($filters:expr),+) => (
        pub fn $name(environment: Environment) -> Route {
            let $route_variable = warp::any()
                .map(move || environment.clone())
                .and(p($prefix));

            route_filter!($route_variable; $($filters),+);

            $route_variable.and_then(handlers::$handler)
                .boxed()
        }
    );
}

    route!(make_list_route<K> => list, rt; end(), g(), query::<q::ListQuery<K::Status>>());
    route!(make_create_route<K> => create, rt; end(), post(), content_length_limit(MAX_CONTENT_LENGTH), json::<K>());
    route!(make_retrieve_route<K> => retrieve, rt; p("id"), par::<String>(), end(), g());
    route!(make_update_route<K> => update, rt; p("id"), par::<String>(), end(), put(), content_length_limit(MAX_CONTENT_LENGTH), json::<K>());
    route!(make_status_route<K> => update_status, rt; p("id"), par::<String>(), p("status"), end(), put(), content_length_limit(MAX_CONTENT_LENGTH), json::<q::StatusUpdate<K::Status>>());
    route!(make_delete_route<K> => delete, rt; p("id"), par::<String>(), end(), delete());

    route!(make_toggle_complaint_route => toggle_complaint, rt; "complaints"; p("id"), par::<String>(), p("toggle"), end(), post());
    route!(make_technicians_route => technicians, rt; "technicians"; end(), g(), query::<q::TechnicianQuery>());
    route!(make_add_technician_route => add_technician, rt; "technicians"; end(), post(), content_length_limit(MAX_CONTENT_LENGTH), json::<NewTechnician>());
    route!(make_technician_route => technician, rt; "technicians"; p("id"), par::<String>(), end(), g());
    route!(make_technician_report_route => technician_report, rt; "technicians"; p("id"), par::<String>(), p("report"), end(), g());
    route!(make_appointments_on_route => appointments_on, rt; "appointments"; p("on"), par::<String>(), end(), g());
    route!(make_available_technicians_route => available_technicians, rt; "technicians"; p("available"), par::<String>(), end(), g());
    route!(make_send_sms_route => send_sms, rt; "sms"; p("send"), end(), post(), content_length_limit(MAX_CONTENT_LENGTH), json::<Sms>());
    route!(make_summary_route => summary, rt; "summary"; end(), g());

    /// Every route for one kind of record.
    pub fn make_collection_routes<K: Registered>(environment: Environment) -> Route {
        make_list_route::<K>(environment.clone())
            .or(make_create_route::<K>(environment.clone()))
            .unify()
            .or(make_retrieve_route::<K>(environment.clone()))
            .unify()
            .or(make_update_route::<K>(environment.clone()))
            .unify()
            .or(make_status_route::<K>(environment.clone()))
            .unify()
            .or(make_delete_route::<K>(environment))
            .unify()
            .boxed()
    }

    /// The whole public API, with desk errors turned into JSON replies.
    pub fn make_api(
        environment: Environment,
    ) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        use crate::kinds::{Appointment, Campaign, Complaint, Issue, Payment, Repair};

        let logger = environment.logger.clone();

        make_toggle_complaint_route(environment.clone())
            .or(make_available_technicians_route(environment.clone()))
            .unify()
            .or(make_technician_route(environment.clone()))
            .unify()
            .or(make_technician_report_route(environment.clone()))
            .unify()
            .or(make_appointments_on_route(environment.clone()))
            .unify()
            .or(make_technicians_route(environment.clone()))
            .unify()
            .or(make_add_technician_route(environment.clone()))
            .unify()
            .or(make_send_sms_route(environment.clone()))
            .unify()
            .or(make_summary_route(environment.clone()))
            .unify()
            .or(make_collection_routes::<Complaint>(environment.clone()))
            .unify()
            .or(make_collection_routes::<Issue>(environment.clone()))
            .unify()
            .or(make_collection_routes::<Repair>(environment.clone()))
            .unify()
            .or(make_collection_routes::<Campaign>(environment.clone()))
            .unify()
            .or(make_collection_routes::<Appointment>(environment.clone()))
            .unify()
            .or(make_collection_routes::<Payment>(environment.clone()))
            .unify()
            .or(make_collection_routes::<Sms>(environment))
            .unify()
            .recover(move |r| super::format_rejection(logger.clone(), r))
    }
}
