//! End-to-end tests through the wire codec against an in-process gateway.
//!
//! A loopback TCP listener stands in for the JDBC gateway, speaking the
//! one-JSON-object-per-line protocol with scripted answers.

use maxdb_connector::{ConnectionParams, JdbcGateway, MaxDbConnector, QueryResponse};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

async fn spawn_fake_gateway() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    tokio::spawn(handle_session(stream));
                }
                Err(_) => break,
            }
        }
    });
    addr
}

async fn handle_session(stream: TcpStream) {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let request: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(_) => break,
        };

        let reply = match request["op"].as_str().unwrap_or("") {
            "open" => {
                assert_eq!(request["class"], "com.sap.dbtech.jdbc.DriverSapDB");
                if request["password"] == "wrong" {
                    json!({"status": "error", "message": "authentication failed"})
                } else if request["url"]
                    .as_str()
                    .is_some_and(|u| u.ends_with("/nosuchdb"))
                {
                    json!({"status": "error", "message": "database NOSUCHDB not found"})
                } else {
                    json!({"status": "ok"})
                }
            }
            "execute" => match request["sql"].as_str().unwrap_or("") {
                "SELECT 1 FROM DUAL" => json!({
                    "status": "ok",
                    "columns": [{"name": "EXPRESSION1", "type_name": "FIXED"}],
                    "rows": [[1]]
                }),
                sql if sql.contains("DOMAIN.TABLES") => json!({
                    "status": "ok",
                    "columns": [{"name": "TABLENAME", "type_name": "VARCHAR"}],
                    "rows": [["CUSTOMERS"], ["ORDERS"]]
                }),
                sql if sql.starts_with("CREATE") => json!({"status": "ok"}),
                sql => json!({
                    "status": "error",
                    "message": format!("SQL syntax error near: {}", sql)
                }),
            },
            "commit" | "rollback" | "ping" => json!({"status": "ok"}),
            "close" => {
                let _ = write_half.write_all(b"{\"status\":\"ok\"}\n").await;
                break;
            }
            _ => json!({"status": "error", "message": "unknown op"}),
        };

        let mut frame = reply.to_string().into_bytes();
        frame.push(b'\n');
        if write_half.write_all(&frame).await.is_err() {
            break;
        }
    }
}

fn params() -> ConnectionParams {
    ConnectionParams::new("localhost", 7210, "test", "test", "testdb")
}

fn connector_for(addr: SocketAddr) -> MaxDbConnector {
    MaxDbConnector::with_driver(params(), Arc::new(JdbcGateway::new(addr.to_string())))
}

#[tokio::test]
async fn test_full_lifecycle_over_the_wire() {
    let addr = spawn_fake_gateway().await;
    let mut connector = connector_for(addr);

    connector.connect().await.expect("connect");
    assert!(connector.check_connection().await.success);

    let response = connector.execute("SELECT 1 FROM DUAL").await.expect("execute");
    match response {
        QueryResponse::Table(table) => {
            assert_eq!(table.row_count(), 1);
            assert_eq!(table.column_names(), vec!["EXPRESSION1"]);
            assert_eq!(table.rows[0][0], json!(1));
        }
        QueryResponse::Done => panic!("expected a result set"),
    }

    connector.disconnect().await;
    connector.disconnect().await; // idempotent over the wire too
    assert!(!connector.is_connected());
}

#[tokio::test]
async fn test_rejected_credentials_over_the_wire() {
    let addr = spawn_fake_gateway().await;
    let bad = ConnectionParams::new("localhost", 7210, "test", "wrong", "testdb");
    let mut connector =
        MaxDbConnector::with_driver(bad, Arc::new(JdbcGateway::new(addr.to_string())));

    let err = connector.connect().await.unwrap_err();
    assert!(err.is_connection());
    assert!(err.to_string().contains("authentication failed"));
}

#[tokio::test]
async fn test_invalid_database_over_the_wire() {
    let addr = spawn_fake_gateway().await;
    let bad = ConnectionParams::new("localhost", 7210, "test", "test", "nosuchdb");
    let mut connector =
        MaxDbConnector::with_driver(bad, Arc::new(JdbcGateway::new(addr.to_string())));

    let err = connector.connect().await.unwrap_err();
    assert!(err.is_connection());
    assert!(err.to_string().contains("NOSUCHDB"));
}

#[tokio::test]
async fn test_query_error_keeps_session_usable_over_the_wire() {
    let addr = spawn_fake_gateway().await;
    let mut connector = connector_for(addr);
    connector.connect().await.expect("connect");

    let err = connector.execute("SELCT oops").await.unwrap_err();
    assert!(err.is_query());
    assert!(err.to_string().contains("SQL syntax error"));

    let response = connector.execute("SELECT 1 FROM DUAL").await.expect("retry");
    assert!(matches!(response, QueryResponse::Table(_)));
}

#[tokio::test]
async fn test_statement_without_result_set_over_the_wire() {
    let addr = spawn_fake_gateway().await;
    let mut connector = connector_for(addr);
    connector.connect().await.expect("connect");

    let response = connector
        .execute("CREATE TABLE t (id FIXED(10))")
        .await
        .expect("execute");
    assert_eq!(response, QueryResponse::Done);
}

#[tokio::test]
async fn test_list_tables_over_the_wire() {
    let addr = spawn_fake_gateway().await;
    let mut connector = connector_for(addr);
    connector.connect().await.expect("connect");

    let response = connector.list_tables().await.expect("list_tables");
    match response {
        QueryResponse::Table(table) => {
            assert_eq!(table.column_names(), vec!["TABLENAME"]);
            assert_eq!(table.row_count(), 2);
        }
        QueryResponse::Done => panic!("expected a result set"),
    }
}

#[tokio::test]
async fn test_gateway_down_is_connection_error() {
    // Bind then drop so the port is very likely closed
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        listener.local_addr().expect("local addr")
    };
    let mut connector = connector_for(addr);

    let err = connector.connect().await.unwrap_err();
    assert!(err.is_connection());
}
