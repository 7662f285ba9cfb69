use std::sync::Arc;

use slog::Logger;

use crate::desk::Desk;
use crate::urls::Urls;

/// Everything a request handler needs.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub desk: Arc<Desk>,
    pub urls: Arc<Urls>,
    pub config: Config,
}

impl Environment {
    pub fn new(logger: Arc<Logger>, desk: Arc<Desk>, urls: Arc<Urls>, config: Config) -> Self {
        Self {
            logger,
            desk,
            urls,
            config,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// The sender name outgoing SMS messages are logged under.
    pub(crate) sms_sender: Arc<str>,
}

impl Config {
    pub fn new(sms_sender: impl Into<String>) -> Self {
        Self {
            sms_sender: Arc::from(sms_sender.into()),
        }
    }
}
