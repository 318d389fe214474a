//! Gateway-backed driver
//!
//! The production bridge: a small TCP client for the JDBC gateway process
//! that owns the actual `sapdbc` driver. One TCP connection per session,
//! one request in flight at a time.

use super::wire::{decode_reply, encode_request, split_frame, Reply, Request};
use super::{DriverSession, MaxDbDriver};
use crate::config::{ConnectionParams, DRIVER_CLASS};
use crate::response::{QueryResponse, ResultTable};
use crate::{Error, Result};
use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::Instrument;

/// Default gateway address when `MAXDB_GATEWAY_ADDR` is unset
pub const DEFAULT_GATEWAY_ADDR: &str = "127.0.0.1:7777";

/// Environment variable overriding the gateway address
pub const GATEWAY_ADDR_ENV: &str = "MAXDB_GATEWAY_ADDR";

/// Driver implementation backed by the JDBC gateway process
#[derive(Debug, Clone)]
pub struct JdbcGateway {
    addr: String,
}

impl JdbcGateway {
    /// Gateway at an explicit address
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// Gateway address from `MAXDB_GATEWAY_ADDR`, falling back to the default
    pub fn from_env() -> Self {
        let addr =
            std::env::var(GATEWAY_ADDR_ENV).unwrap_or_else(|_| DEFAULT_GATEWAY_ADDR.to_string());
        Self::new(addr)
    }

    /// Configured gateway address
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Default for JdbcGateway {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl MaxDbDriver for JdbcGateway {
    async fn open(&self, params: &ConnectionParams) -> Result<Box<dyn DriverSession>> {
        let url = params.jdbc_url();
        async {
            let stream = TcpStream::connect(&self.addr).await.map_err(|e| {
                Error::connection(format!("bridge gateway unreachable at {}: {}", self.addr, e))
            })?;

            let mut session = GatewaySession {
                stream,
                read_buf: BytesMut::with_capacity(8192),
            };

            let reply = session
                .call(&Request::Open {
                    class: DRIVER_CLASS,
                    url: &url,
                    user: &params.user,
                    password: &params.password,
                })
                .await?;

            match reply {
                Reply::Ok { .. } => {
                    tracing::info!("session opened");
                    Ok(Box::new(session) as Box<dyn DriverSession>)
                }
                Reply::Error { message } => Err(Error::connection(message)),
            }
        }
        .instrument(tracing::debug_span!("bridge_open", url = %url, user = %params.user))
        .await
    }
}

/// One live gateway-backed session
pub struct GatewaySession {
    stream: TcpStream,
    read_buf: BytesMut,
}

impl GatewaySession {
    /// Send one request frame and read the matching reply frame.
    async fn call(&mut self, req: &Request<'_>) -> Result<Reply> {
        let buf = encode_request(req)?;
        self.stream.write_all(&buf).await?;
        self.stream.flush().await?;

        loop {
            if let Some(frame) = split_frame(&mut self.read_buf) {
                return decode_reply(&frame);
            }

            let n = self.stream.read_buf(&mut self.read_buf).await?;
            if n == 0 {
                return Err(Error::connection("bridge gateway closed the connection"));
            }
        }
    }

    /// Unit operation: any error reply is a connection-kind failure.
    async fn call_unit(&mut self, req: &Request<'_>) -> Result<()> {
        match self.call(req).await? {
            Reply::Ok { .. } => Ok(()),
            Reply::Error { message } => Err(Error::connection(message)),
        }
    }
}

impl std::fmt::Debug for GatewaySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GatewaySession")
    }
}

#[async_trait]
impl DriverSession for GatewaySession {
    async fn execute(&mut self, sql: &str) -> Result<QueryResponse> {
        tracing::debug!(sql = %sql, "executing statement");
        match self.call(&Request::Execute { sql }).await? {
            Reply::Ok {
                columns: Some(columns),
                rows,
            } => Ok(QueryResponse::Table(ResultTable { columns, rows })),
            Reply::Ok { columns: None, .. } => Ok(QueryResponse::Done),
            Reply::Error { message } => Err(Error::query(message)),
        }
    }

    async fn commit(&mut self) -> Result<()> {
        self.call_unit(&Request::Commit).await
    }

    async fn rollback(&mut self) -> Result<()> {
        self.call_unit(&Request::Rollback).await
    }

    async fn ping(&mut self) -> Result<()> {
        self.call_unit(&Request::Ping).await
    }

    async fn close(&mut self) -> Result<()> {
        // Best effort on the gateway side; the socket shutdown is what
        // actually releases the session if the gateway is already gone.
        let result = self.call_unit(&Request::Close).await;
        let _ = self.stream.shutdown().await;
        result
    }
}
