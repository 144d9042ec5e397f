//! Mock warehouse client for testing.
//!
//! Provides an in-memory client that records every statement it executes, so
//! tests can assert on execution order and count.

use super::{ColumnInfo, ResultTable, StatementOutput, Value, WarehouseClient};
use crate::error::{PipeError, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// A mock warehouse client that returns predefined results.
///
/// Statements beginning with SELECT, WITH, SHOW, or VALUES produce a one-row
/// result set; everything else completes with no result set. An optional
/// failure trigger makes execution fail on the first statement containing the
/// configured fragment.
pub struct MockWarehouse {
    executed: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl MockWarehouse {
    /// Creates a new mock warehouse client.
    pub fn new() -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    /// Creates a mock that fails any statement containing `fragment`.
    pub fn failing_on(fragment: impl Into<String>) -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
            fail_on: Some(fragment.into()),
        }
    }

    /// Returns the statements executed so far, in execution order.
    pub fn executed_statements(&self) -> Vec<String> {
        self.executed.lock().expect("statement log lock").clone()
    }

    fn is_row_returning(sql: &str) -> bool {
        let upper = sql.trim_start().to_uppercase();
        upper.starts_with("SELECT")
            || upper.starts_with("WITH")
            || upper.starts_with("SHOW")
            || upper.starts_with("VALUES")
    }
}

impl Default for MockWarehouse {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WarehouseClient for MockWarehouse {
    async fn execute_statement(&self, sql: &str) -> Result<StatementOutput> {
        if let Some(fragment) = &self.fail_on {
            if sql.contains(fragment.as_str()) {
                return Err(PipeError::execution(format!(
                    "mock failure triggered by: {sql}"
                )));
            }
        }

        self.executed
            .lock()
            .expect("statement log lock")
            .push(sql.to_string());

        if Self::is_row_returning(sql) {
            let columns = vec![ColumnInfo::new("result", "text")];
            let rows = vec![vec![Value::String(format!("Mock result for: {sql}"))]];

            Ok(StatementOutput::Rows(
                ResultTable::with_data(columns, rows)
                    .with_execution_time(Duration::from_millis(1)),
            ))
        } else {
            Ok(StatementOutput::NoResultSet)
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
