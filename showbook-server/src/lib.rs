//! showbook-server: booking directory for venues, artists and shows
//!
//! Axum handlers over a Postgres store. Every page is a JSON context and
//! every create/edit/delete answers with a [`models::Notice`].

pub mod db;
pub mod http;
pub mod models;

pub use db::{connect, DbError};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
