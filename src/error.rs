//! Error types
//!
//! The connector surfaces exactly two kinds of failure to the host:
//! connection errors (session establishment, authentication, network,
//! session lifecycle) and query errors (execution-time failures carrying the
//! driver's native message). Nothing is retried or recovered locally.

use thiserror::Error;

/// Connector error
#[derive(Debug, Error)]
pub enum Error {
    /// Session establishment / auth / network / lifecycle failure
    #[error("connection error: {0}")]
    Connection(String),

    /// Execution-time failure, wrapping the driver's native error text
    #[error("query error: {0}")]
    Query(String),
}

impl Error {
    /// Build a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Error::Connection(msg.into())
    }

    /// Build a query error
    pub fn query(msg: impl Into<String>) -> Self {
        Error::Query(msg.into())
    }

    /// True for the connection error kind
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// True for the query error kind
    pub fn is_query(&self) -> bool {
        matches!(self, Error::Query(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Connection(e.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
