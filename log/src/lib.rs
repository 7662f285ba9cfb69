use std::sync::Mutex;

use slog::Drain;
use slog::Fuse;
use slog_async::Async;
use slog_json::Json;

pub use slog::{debug, error, info, o, trace, warn, Logger};

/// Builds the root logger: JSON records on standard error, written
/// from a background thread.
pub fn initialize_logger() -> slog::Logger {
    let drain = Mutex::new(Json::default(std::io::stderr())).map(Fuse);
    let drain = Async::new(drain).build().fuse();

    Logger::root(drain, root_values())
}

/// Builds a logger that honours `RUST_LOG` filtering, for local
/// debugging. The returned guard must be kept alive for as long as the
/// global scope logger is in use.
#[cfg(feature = "env_logging")]
pub fn initialize_env_logger() -> (slog::Logger, slog_scope::GlobalLoggerGuard) {
    let guard = slog_envlogger::init().expect("initialize slog-envlogger");
    let logger = slog_scope::logger().new(root_values());

    (logger, guard)
}

fn root_values() -> slog::OwnedKV<impl slog::SendSyncRefUnwindSafeKV> {
    o!(
        "service" => info::SERVICE,
        "version" => info::VERSION,
        "revision" => info::REVISION,
        "build_timestamp" => info::BUILD_TIMESTAMP
    )
}
