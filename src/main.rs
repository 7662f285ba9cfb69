use std::error::Error;
use std::sync::Arc;

use futures::future::FutureExt;
use tokio::sync::mpsc;
use warp::Filter;

use caredesk::config::{get_variable, get_variable_or, is_enabled};
use caredesk::desk::Desk;
use caredesk::environment::{Config, Environment};
use caredesk::routes;
use caredesk::urls::Urls;
use log::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    #[cfg(feature = "env_logging")]
    let (logger, _guard) = log::initialize_env_logger();
    #[cfg(not(feature = "env_logging"))]
    let logger = log::initialize_logger();

    let main_port: u16 = get_variable("CAREDESK_PORT").parse()?;
    let admin_port: u16 = get_variable("CAREDESK_ADMIN_PORT").parse()?;

    info!(logger, "Starting..."; "main_port" => main_port, "admin_port" => admin_port);

    let desk = if is_enabled("CAREDESK_SEED_FIXTURES") {
        Desk::with_fixtures(logger.clone())?
    } else {
        Desk::new(logger.clone())
    };

    let logger = Arc::new(logger);
    let urls = Arc::new(Urls::new(get_variable("CAREDESK_BASE_URL"))?);
    let config = Config::new(get_variable_or("CAREDESK_SMS_SENDER", "CAREDESK"));
    let environment = Environment::new(logger.clone(), Arc::new(desk), urls, config);

    let (termination_sender, mut termination_receiver) = mpsc::channel::<()>(1);

    let terminate = {
        let logger = logger.clone();

        Arc::new(move || {
            let termination_sender = termination_sender.clone();
            let logger = logger.clone();

            async move {
                if termination_sender.send(()).await.is_err() {
                    warn!(logger, "Already shutting down");
                }
            }
            .boxed()
        })
    };

    let should_terminate = async move {
        termination_receiver.recv().await;
    }
    .shared();

    let ctrlc = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let signal = tokio::signal::ctrl_c();

        async move {
            tokio::select! {
                _ = should_terminate => {},
                _ = signal => {
                    terminate().await;
                }
            }
        }
    };

    let main_server = {
        let should_terminate = should_terminate.clone();

        let routes = routes::make_api(environment.clone());

        let (_, main_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], main_port), async {
                should_terminate.await;
            });

        main_server
    };

    let admin_server = {
        let should_terminate = should_terminate.clone();

        let routes = routes::admin::make_healthz_route()
            .or(routes::admin::make_termination_route(terminate));

        let (_, admin_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], admin_port), async {
                should_terminate.await;
            });

        admin_server
    };

    tokio::join!(ctrlc, main_server, admin_server);

    info!(logger, "Exiting gracefully...");

    Ok(())
}
