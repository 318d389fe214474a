//! JDBC bridge seam
//!
//! This module handles:
//! * The driver/session trait pair the connector is written against
//! * The wire codec for talking to the bridge gateway (`wire`)
//! * The default gateway-backed driver implementation (`gateway`)
//!
//! The actual JDBC driver lives in an external gateway process; this crate
//! only marshals requests to it and translates its errors. Alternative
//! bridges (or test doubles) plug in by implementing `MaxDbDriver`.

mod gateway;
mod wire;

pub use gateway::{GatewaySession, JdbcGateway};

use crate::config::ConnectionParams;
use crate::response::QueryResponse;
use crate::Result;
use async_trait::async_trait;

/// Factory for driver sessions.
///
/// `open` fails with the connection error kind when the server is
/// unreachable, credentials are rejected, or the database name is invalid.
#[async_trait]
pub trait MaxDbDriver: Send + Sync + std::fmt::Debug {
    /// Open one authenticated session to the database server.
    async fn open(&self, params: &ConnectionParams) -> Result<Box<dyn DriverSession>>;
}

/// One live session to the database server.
///
/// Owned exclusively by the connector for its lifetime. Dropping the session
/// releases the underlying resource even if `close` was never called.
#[async_trait]
pub trait DriverSession: Send + std::fmt::Debug {
    /// Send literal SQL text and return rows plus column metadata, or a
    /// query error carrying the driver's native message.
    async fn execute(&mut self, sql: &str) -> Result<QueryResponse>;

    /// Commit the current transaction.
    async fn commit(&mut self) -> Result<()>;

    /// Roll back the current transaction.
    async fn rollback(&mut self) -> Result<()>;

    /// Trivial round trip for liveness checks.
    async fn ping(&mut self) -> Result<()>;

    /// Release the session. Safe to call once; the connector never calls it twice.
    async fn close(&mut self) -> Result<()>;
}
