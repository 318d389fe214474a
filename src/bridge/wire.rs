//! Bridge wire codec
//!
//! One JSON object per line in each direction. Requests are tagged by `op`,
//! replies by `status`. An `ok` reply without a `columns` field means the
//! statement produced no result set.

use crate::response::Column;
use crate::{Error, Result};
use bytes::{Buf, BytesMut};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frame sent to the gateway
#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum Request<'a> {
    /// Load the driver class and open a JDBC connection
    Open {
        class: &'a str,
        url: &'a str,
        user: &'a str,
        password: &'a str,
    },
    /// Execute literal SQL text
    Execute { sql: &'a str },
    Commit,
    Rollback,
    Ping,
    Close,
}

/// Frame received from the gateway
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum Reply {
    Ok {
        /// Present (possibly empty) when the statement produced a result set
        #[serde(default)]
        columns: Option<Vec<Column>>,
        #[serde(default)]
        rows: Vec<Vec<Value>>,
    },
    Error {
        message: String,
    },
}

/// Encode a request as one newline-terminated JSON frame.
pub(crate) fn encode_request(req: &Request<'_>) -> Result<Vec<u8>> {
    let mut buf = serde_json::to_vec(req)
        .map_err(|e| Error::connection(format!("failed to encode bridge request: {}", e)))?;
    buf.push(b'\n');
    Ok(buf)
}

/// Split one complete frame off the front of the read buffer, if present.
pub(crate) fn split_frame(buf: &mut BytesMut) -> Option<BytesMut> {
    let pos = buf.iter().position(|&b| b == b'\n')?;
    let frame = buf.split_to(pos);
    buf.advance(1); // drop the newline
    Some(frame)
}

/// Decode a reply frame.
pub(crate) fn decode_reply(frame: &[u8]) -> Result<Reply> {
    serde_json::from_slice(frame)
        .map_err(|e| Error::connection(format!("malformed bridge reply: {}", e)))
}
