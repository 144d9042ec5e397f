//! PostgreSQL warehouse client implementation.
//!
//! Provides the `PostgresWarehouse` struct that implements the
//! `WarehouseClient` trait using sqlx.

use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, ResultTable, Row, StatementOutput, Value, WarehouseClient};
use crate::error::{PipeError, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column as SqlxColumn, Executor, Row as SqlxRow, TypeInfo};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Per-statement timeout in seconds. Pipeline stages (CTAS over joins,
/// aggregations) can run long; the cap exists to bound hangs, not slow SQL.
const STATEMENT_TIMEOUT_SECS: u64 = 300;

/// Maximum number of connection retry attempts.
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts (doubles each retry).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// PostgreSQL warehouse client.
///
/// The pool is pinned to a single connection: statements in a block depend on
/// the side effects and session state (temp tables, search_path) of earlier
/// statements, so every statement must run on the same session.
#[derive(Debug)]
pub struct PostgresWarehouse {
    pool: PgPool,
}

impl PostgresWarehouse {
    /// Connects to the database described by `config`.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let conn_str = config.to_connection_string()?;

        let mut last_error = None;
        let mut delay = Duration::from_millis(RETRY_BASE_DELAY_MS);

        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            debug!("Connection attempt {} of {}", attempt, MAX_RETRY_ATTEMPTS);

            let result = PgPoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Duration::from_secs(10))
                .connect(&conn_str)
                .await;

            match result {
                Ok(pool) => {
                    debug!("Successfully connected to database");
                    return Ok(Self { pool });
                }
                Err(e) => {
                    let is_transient = is_transient_error(&e);
                    last_error = Some(e);

                    if attempt < MAX_RETRY_ATTEMPTS && is_transient {
                        warn!(
                            "Connection attempt {} failed (transient error), retrying in {:?}",
                            attempt, delay
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(map_connection_error(
            last_error.expect("at least one attempt was made"),
            config,
        ))
    }

    /// Creates a PostgresWarehouse from an existing connection pool.
    ///
    /// This is primarily useful for testing.
    #[allow(dead_code)]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Probes whether a statement is row-returning by describing it.
    ///
    /// Describe prepares the statement without executing it. A statement with
    /// no row description (DDL, plain DML) yields no columns.
    async fn describe_columns(&self, sql: &str) -> Option<Vec<ColumnInfo>> {
        match (&self.pool).describe(sql).await {
            Ok(described) => {
                let columns: Vec<ColumnInfo> = described
                    .columns()
                    .iter()
                    .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                    .collect();
                if columns.is_empty() {
                    None
                } else {
                    Some(columns)
                }
            }
            Err(e) => {
                // Some statements cannot be described at all; they are not
                // row-returning either way.
                debug!("Describe failed, treating statement as non-row-returning: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl WarehouseClient for PostgresWarehouse {
    async fn execute_statement(&self, sql: &str) -> Result<StatementOutput> {
        let start = Instant::now();

        let result = tokio::time::timeout(
            Duration::from_secs(STATEMENT_TIMEOUT_SECS),
            sqlx::query(sql).fetch_all(&self.pool),
        )
        .await
        .map_err(|_| {
            PipeError::execution(format!(
                "Statement timed out after {STATEMENT_TIMEOUT_SECS} seconds"
            ))
        })?
        .map_err(|e| PipeError::execution(format_execution_error(e)))?;

        let execution_time = start.elapsed();

        if let Some(first_row) = result.first() {
            let columns: Vec<ColumnInfo> = first_row
                .columns()
                .iter()
                .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                .collect();
            let rows: Vec<Row> = result.iter().map(convert_row).collect();

            return Ok(StatementOutput::Rows(
                ResultTable::with_data(columns, rows).with_execution_time(execution_time),
            ));
        }

        // Zero rows: an empty SELECT still has a row description, DDL/DML do
        // not. The statement has already succeeded; this probe only decides
        // between an empty table and "no result set".
        match self.describe_columns(sql).await {
            Some(columns) => Ok(StatementOutput::Rows(
                ResultTable::with_data(columns, Vec::new()).with_execution_time(execution_time),
            )),
            None => Ok(StatementOutput::NoResultSet),
        }
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Converts a sqlx PgRow to our Row type.
fn convert_row(row: &PgRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a PgRow to our Value type.
fn convert_value(row: &PgRow, index: usize, type_name: &str) -> Value {
    match type_name.to_uppercase().as_str() {
        "BOOL" | "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "INT2" | "SMALLINT" => row
            .try_get::<Option<i16>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(v as i64))
            .unwrap_or(Value::Null),

        "INT4" | "INT" | "INTEGER" => row
            .try_get::<Option<i32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(v as i64))
            .unwrap_or(Value::Null),

        "INT8" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "FLOAT4" | "REAL" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Float(v as f64))
            .unwrap_or(Value::Null),

        "FLOAT8" | "DOUBLE PRECISION" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BYTEA" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        // For all other types, try to get as string
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Determines if an error is transient and worth retrying.
fn is_transient_error(error: &sqlx::Error) -> bool {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused")
        || error_str.contains("timed out")
        || error_str.contains("timeout")
        || error_str.contains("temporarily unavailable")
        || error_str.contains("connection reset")
        || error_str.contains("broken pipe")
    {
        return true;
    }

    // Authentication and database-not-found errors are not transient
    if error_str.contains("password authentication failed")
        || error_str.contains("authentication failed")
        || error_str.contains("does not exist")
        || error_str.contains("ssl")
        || error_str.contains("tls")
    {
        return false;
    }

    false
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> PipeError {
    let host = config.host.as_deref().unwrap_or("localhost");
    let port = config.port;
    let user = config.user.as_deref().unwrap_or("unknown");
    let database = config.database.as_deref().unwrap_or("unknown");

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") || error_str.contains("could not connect") {
        PipeError::connection(format!(
            "Cannot connect to {host}:{port}. Check that the server is running."
        ))
    } else if error_str.contains("password authentication failed")
        || error_str.contains("authentication failed")
    {
        PipeError::connection(format!(
            "Authentication failed for user '{user}'. Check your credentials."
        ))
    } else if error_str.contains("does not exist") && error_str.contains("database") {
        PipeError::connection(format!("Database '{database}' does not exist."))
    } else if error_str.contains("ssl") || error_str.contains("tls") {
        PipeError::connection(
            "Server requires SSL. Add '?sslmode=require' to connection string.".to_string(),
        )
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        PipeError::connection(format!(
            "Connection to {host}:{port} timed out. The server may be overloaded or unreachable."
        ))
    } else {
        PipeError::connection(error.to_string())
    }
}

/// Formats a statement execution error with server-side details if available.
fn format_execution_error(error: sqlx::Error) -> String {
    let mut result = String::new();

    if let Some(db_error) = error.as_database_error() {
        result.push_str("ERROR: ");
        result.push_str(db_error.message());

        if let Some(pg_error) = db_error.try_downcast_ref::<sqlx::postgres::PgDatabaseError>() {
            if let Some(detail) = pg_error.detail() {
                result.push_str("\n  DETAIL: ");
                result.push_str(detail);
            }

            if let Some(hint) = pg_error.hint() {
                result.push_str("\n  HINT: ");
                result.push_str(hint);
            }

            if let Some(table) = pg_error.table() {
                result.push_str("\n  TABLE: ");
                result.push_str(table);
            }

            if let Some(constraint) = pg_error.constraint() {
                result.push_str("\n  CONSTRAINT: ");
                result.push_str(constraint);
            }
        }
    } else {
        result = error.to_string();
    }

    result
}
