#[macro_use]
mod macros;

pub mod collection;
pub mod config;
pub mod dates;
pub mod desk;
pub mod environment;
pub mod errors;
pub mod fixtures;
pub mod kinds;
pub mod normalization;
pub mod query;
pub mod record;
pub mod roster;
pub mod routes;
pub mod store;
pub mod urls;
