//! SAP MaxDB data-source connector.
//!
//! A thin adapter that lets a host analytics platform query a SAP MaxDB server
//! through a JDBC bridge. The crate validates connection parameters, manages a
//! single bridge-backed session, forwards SQL text unchanged, and translates
//! tabular results and native driver errors into the host's response shapes.
//! Query execution, transactions, and storage all live in the external MaxDB
//! server and its JDBC driver.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> maxdb_connector::Result<()> {
//! use maxdb_connector::{ConnectionParams, MaxDbConnector, QueryResponse};
//!
//! let params = ConnectionParams::new("localhost", 7210, "test", "test", "testdb");
//! let mut connector = MaxDbConnector::new(params);
//!
//! connector.connect().await?;
//!
//! match connector.execute("SELECT 1 FROM DUAL").await? {
//!     QueryResponse::Table(table) => println!("{} row(s)", table.row_count()),
//!     QueryResponse::Done => println!("statement ok"),
//! }
//!
//! connector.disconnect().await;
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod config;
pub mod connector;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod response;

pub use bridge::{DriverSession, JdbcGateway, MaxDbDriver};
pub use config::ConnectionParams;
pub use connector::MaxDbConnector;
pub use error::{Error, Result};
pub use response::{Column, ConnectionStatus, QueryResponse, ResultTable};
