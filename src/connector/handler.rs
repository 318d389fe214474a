//! MaxDbConnector implementation

use crate::bridge::{DriverSession, JdbcGateway, MaxDbDriver};
use crate::config::ConnectionParams;
use crate::metrics::{counters, histograms, labels};
use crate::response::{ConnectionStatus, QueryResponse};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// SAP MaxDB connector
///
/// Manages one external session and forwards SQL text to it. Single session,
/// single caller at a time; the host serializes access per connector
/// instance, so no locking happens here.
pub struct MaxDbConnector {
    params: ConnectionParams,
    driver: Arc<dyn MaxDbDriver>,
    session: Option<Box<dyn DriverSession>>,
}

impl MaxDbConnector {
    /// Connector backed by the JDBC gateway configured in the environment
    pub fn new(params: ConnectionParams) -> Self {
        Self::with_driver(params, Arc::new(JdbcGateway::from_env()))
    }

    /// Connector backed by an explicit driver (alternative bridges, tests)
    pub fn with_driver(params: ConnectionParams, driver: Arc<dyn MaxDbDriver>) -> Self {
        Self {
            params,
            driver,
            session: None,
        }
    }

    /// Whether a session is currently open
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// The parameters this connector was built with
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Open a session to the database server.
    ///
    /// Parameters are validated before any network I/O; a missing or empty
    /// parameter fails without touching the driver. No-op when a session is
    /// already open.
    pub async fn connect(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Ok(());
        }

        self.params.validate()?;

        let span = tracing::info_span!(
            "connect",
            user = %self.params.user,
            database = %self.params.database
        );
        async {
            counters::connect_attempted();
            let start = Instant::now();

            match self.driver.open(&self.params).await {
                Ok(session) => {
                    self.session = Some(session);
                    counters::connect_completed(labels::STATUS_SUCCESS);
                    histograms::connect_duration(start.elapsed().as_millis() as u64);
                    tracing::info!("connected");
                    Ok(())
                }
                Err(e) => {
                    counters::connect_completed(labels::STATUS_ERROR);
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Close the session.
    ///
    /// Idempotent: calling with no open session does nothing. Close failures
    /// are logged, never surfaced; the session is released either way.
    pub async fn disconnect(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        if let Err(e) = session.close().await {
            tracing::error!(
                database = %self.params.database,
                error = %e,
                "error while disconnecting"
            );
        }
    }

    /// Trivial round trip reporting boolean health, never an `Err`.
    ///
    /// When no session is open, a temporary one is opened for the check and
    /// closed again. A live session that fails the check is dropped so the
    /// next `connect` starts fresh.
    pub async fn check_connection(&mut self) -> ConnectionStatus {
        let need_to_close = !self.is_connected();

        let status = match self.ping_once().await {
            Ok(()) => ConnectionStatus::ok(),
            Err(e) => {
                tracing::error!(
                    database = %self.params.database,
                    error = %e,
                    "connection check failed"
                );
                ConnectionStatus::failed(e.to_string())
            }
        };

        if status.success {
            counters::health_check(labels::STATUS_SUCCESS);
            if need_to_close {
                self.disconnect().await;
            }
        } else {
            counters::health_check(labels::STATUS_ERROR);
            // A session that failed its ping is no longer trustworthy.
            self.session = None;
        }

        status
    }

    async fn ping_once(&mut self) -> Result<()> {
        self.connect().await?;
        match self.session.as_mut() {
            Some(session) => session.ping().await,
            None => Err(Error::connection("not connected")),
        }
    }

    /// Send literal SQL text to the open session.
    ///
    /// No local parsing, rewriting, or validation of the SQL occurs. On
    /// driver success the transaction is committed; on driver failure it is
    /// rolled back and the driver's error is surfaced, with the session left
    /// usable for subsequent calls. Fails with the connection error kind when
    /// no session is open.
    pub async fn execute(&mut self, sql: &str) -> Result<QueryResponse> {
        let span = tracing::debug_span!("execute", database = %self.params.database);
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| Error::connection("not connected"))?;
        async {
            let start = Instant::now();

            match session.execute(sql).await {
                Ok(response) => {
                    if let Err(e) = session.commit().await {
                        tracing::error!(error = %e, "commit failed");
                        if let Err(rb) = session.rollback().await {
                            tracing::error!(error = %rb, "rollback failed");
                        }
                        counters::query_completed(labels::STATUS_ERROR);
                        let msg = match e {
                            Error::Connection(msg) | Error::Query(msg) => msg,
                        };
                        return Err(Error::Query(msg));
                    }
                    counters::query_completed(labels::STATUS_SUCCESS);
                    histograms::query_duration(start.elapsed().as_millis() as u64);
                    Ok(response)
                }
                Err(e) => {
                    tracing::error!(error = %e, "error running query");
                    if let Err(rb) = session.rollback().await {
                        tracing::error!(error = %rb, "rollback failed");
                    }
                    counters::query_completed(labels::STATUS_ERROR);
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// List table names visible through the system catalog.
    pub async fn list_tables(&mut self) -> Result<QueryResponse> {
        self.execute("SELECT TABLENAME FROM DOMAIN.TABLES WHERE SCHEMANAME='SYSINFO'")
            .await
    }

    /// List column names of one table.
    pub async fn list_columns(&mut self, table_name: &str) -> Result<QueryResponse> {
        let escaped = table_name.replace('\'', "''");
        self.execute(&format!(
            "SELECT COLUMNNAME FROM DOMAIN.COLUMNS WHERE TABLENAME='{}'",
            escaped
        ))
        .await
    }
}

impl std::fmt::Debug for MaxDbConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaxDbConnector")
            .field("params", &self.params)
            .field("connected", &self.is_connected())
            .finish()
    }
}
