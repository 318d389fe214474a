//! Connection parameters
//!
//! The host platform hands the connector a string-keyed map with five required
//! entries: `host`, `port`, `user`, `password`, `database`. All five must be
//! present and non-empty before a connection attempt is made; no other
//! validation is performed.

use crate::{Error, Result};
use std::collections::HashMap;

/// JDBC driver class loaded by the bridge gateway.
pub const DRIVER_CLASS: &str = "com.sap.dbtech.jdbc.DriverSapDB";

const REQUIRED_KEYS: [&str; 5] = ["host", "port", "user", "password", "database"];

/// Parameters for one MaxDB session
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Host name or IP address of the MaxDB server
    pub host: String,
    /// Server port
    pub port: u16,
    /// User name, also treated as the schema by the server
    pub user: String,
    /// Password (redacted from `Debug` output)
    pub password: String,
    /// Database name
    pub database: String,
}

impl ConnectionParams {
    /// Typed construction. Call `validate()` (or let `connect` do it) before use.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    /// Parse the host platform's configuration map.
    ///
    /// All five keys are required and must be non-empty. `port` accepts a
    /// numeric string. Failures use the connection error kind so they surface
    /// exactly like any other pre-connect failure.
    pub fn from_map(options: &HashMap<String, String>) -> Result<Self> {
        for key in REQUIRED_KEYS {
            match options.get(key) {
                None => {
                    return Err(Error::connection(format!(
                        "missing required connection parameter: {}",
                        key
                    )));
                }
                Some(value) if value.trim().is_empty() => {
                    return Err(Error::connection(format!(
                        "connection parameter must not be empty: {}",
                        key
                    )));
                }
                Some(_) => {}
            }
        }

        let port_raw = &options["port"];
        let port = port_raw
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|&p| p != 0)
            .ok_or_else(|| Error::connection(format!("invalid port: {}", port_raw)))?;

        Ok(Self {
            host: options["host"].clone(),
            port,
            user: options["user"].clone(),
            password: options["password"].clone(),
            database: options["database"].clone(),
        })
    }

    /// Check that every required parameter is present and non-empty.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("host", &self.host),
            ("user", &self.user),
            ("password", &self.password),
            ("database", &self.database),
        ];
        for (key, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::connection(format!(
                    "connection parameter must not be empty: {}",
                    key
                )));
            }
        }
        if self.port == 0 {
            return Err(Error::connection("invalid port: 0"));
        }
        Ok(())
    }

    /// Render the JDBC URL the bridge hands to the driver.
    pub fn jdbc_url(&self) -> String {
        format!("jdbc:sapdb://{}:{}/{}", self.host, self.port, self.database)
    }
}

impl std::fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}
