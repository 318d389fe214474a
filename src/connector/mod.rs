//! The connector
//!
//! This module handles:
//! * Session lifecycle (connect, disconnect, liveness checks)
//! * Pass-through query execution with the original transaction discipline
//! * Catalog lookups (table and column listings)

mod handler;

pub use handler::MaxDbConnector;
