//! Warehouse abstraction layer for sqlpipe.
//!
//! Provides a trait-based interface for executing single SQL statements,
//! allowing different backends (and test doubles) to be used interchangeably.

mod mock;
mod postgres;
mod types;

pub use mock::MockWarehouse;
pub use postgres::PostgresWarehouse;
pub use types::{ColumnInfo, ResultTable, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Outcome of executing a single statement.
///
/// Whether a statement produced a result set is data, not an error: a DDL or
/// DML statement completing without rows is a normal outcome and must not be
/// conflated with an execution failure.
#[derive(Debug, Clone)]
pub enum StatementOutput {
    /// The statement produced a result set (possibly with zero rows).
    Rows(ResultTable),

    /// The statement completed without producing a result set (DDL/DML).
    NoResultSet,
}

impl StatementOutput {
    /// Converts the outcome into an optional result table.
    pub fn into_table(self) -> Option<ResultTable> {
        match self {
            Self::Rows(table) => Some(table),
            Self::NoResultSet => None,
        }
    }

    /// Returns true if the statement produced a result set.
    pub fn is_result_set(&self) -> bool {
        matches!(self, Self::Rows(_))
    }
}

/// Creates a warehouse client for the given connection configuration.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn WarehouseClient>> {
    let client = PostgresWarehouse::connect(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for warehouse clients.
///
/// All operations are async and return Results with PipeError.
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    /// Executes a single SQL statement and reports whether it produced a
    /// result set.
    ///
    /// An `Err` means the statement failed to run. `Ok(NoResultSet)` means it
    /// ran but returned no rows by nature (e.g. CREATE TABLE).
    async fn execute_statement(&self, sql: &str) -> Result<StatementOutput>;

    /// Closes the underlying connection.
    async fn close(&self) -> Result<()>;
}
