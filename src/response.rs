//! Host-facing response shapes
//!
//! The connector does not retain or transform results beyond converting the
//! driver's rows and column metadata into these types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column metadata as reported by the driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Driver-reported type name
    #[serde(default)]
    pub type_name: String,
}

/// An ordered sequence of rows plus column metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub columns: Vec<Column>,
    /// Each row is an ordered sequence of column values
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Outcome of one statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryResponse {
    /// Statement produced a result set
    Table(ResultTable),
    /// Statement completed without a result set (DDL, DML)
    Done,
}

/// Liveness-check report returned by `check_connection`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ConnectionStatus {
    /// Healthy
    pub fn ok() -> Self {
        Self {
            success: true,
            error_message: None,
        }
    }

    /// Unhealthy, with the underlying error text
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
        }
    }
}
