//! Sequential execution of multi-statement SQL blocks.
//!
//! A block is a string of semicolon-separated statements. Statements run
//! strictly in textual order on one connection — later statements routinely
//! read tables created or populated by earlier ones — and only the final
//! statement's result set is captured.

use std::time::{Duration, Instant};

use crate::db::{ResultTable, WarehouseClient};
use crate::error::Result;
use tracing::debug;

/// Splits a SQL block into trimmed, non-empty statements.
///
/// Splitting is naive: the delimiter is `;`, with no awareness of string
/// literals or comments. Blocks must not contain `;` inside literals.
pub fn split_statements(block: &str) -> Vec<&str> {
    block
        .split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .collect()
}

/// Runs SQL blocks against a caller-supplied warehouse client.
///
/// The runner never opens or closes the connection; lifecycle stays with the
/// caller. The connection must not be used from elsewhere during a run.
pub struct StatementRunner<'a> {
    client: &'a dyn WarehouseClient,
}

impl<'a> StatementRunner<'a> {
    /// Creates a new runner over the given client.
    pub fn new(client: &'a dyn WarehouseClient) -> Self {
        Self { client }
    }

    /// Executes every statement in `block` in order and captures the result
    /// set of the last one.
    ///
    /// Any statement failure aborts the block immediately: remaining
    /// statements are not attempted and no partial result is returned. A
    /// final statement that produces no result set (DDL/DML) yields
    /// `BlockOutcome` with an absent result — that is success, not failure.
    /// A block with no non-empty statements is a no-op.
    pub async fn run_block(&self, block: &str) -> Result<BlockOutcome> {
        let statements = split_statements(block);
        let total = statements.len();
        let start = Instant::now();

        let mut result = None;
        for (index, statement) in statements.iter().enumerate() {
            debug!("Executing statement {} of {}", index + 1, total);
            let output = self.client.execute_statement(statement).await?;

            // Only the last statement's rows matter; earlier statements
            // contribute side effects.
            if index + 1 == total {
                result = output.into_table();
            }
        }

        Ok(BlockOutcome {
            result,
            statements_executed: total,
            execution_time: start.elapsed(),
        })
    }
}

/// Outcome of running a block of statements.
#[derive(Debug)]
pub struct BlockOutcome {
    /// Result set of the final statement, if it produced one.
    pub result: Option<ResultTable>,

    /// Number of statements executed.
    pub statements_executed: usize,

    /// Wall-clock time for the whole block.
    pub execution_time: Duration,
}
