//! Database layer - connection pool, schema bootstrap and repositories
//!
//! - One repository per table, borrowing the shared pool
//! - List and detail queries JOIN their counts in (no N+1)
//! - Every mutation runs in its own transaction; dropping it rolls back

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect, pool_options};
pub use repos::*;
