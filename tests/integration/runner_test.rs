//! Block execution tests against the mock warehouse client.
//!
//! These cover the runner's contract through the public API: splitting,
//! ordering, last-statement capture, and failure propagation.

use sqlpipe::db::{MockWarehouse, Value};
use sqlpipe::error::PipeError;
use sqlpipe::runner::{split_statements, StatementRunner};

#[tokio::test]
async fn test_single_ddl_statement() {
    let mock = MockWarehouse::new();
    let runner = StatementRunner::new(&mock);

    let outcome = runner.run_block("CREATE TABLE t (x INT);").await.unwrap();

    assert_eq!(outcome.statements_executed, 1);
    assert!(outcome.result.is_none());
    assert_eq!(mock.executed_statements(), vec!["CREATE TABLE t (x INT)"]);
}

#[tokio::test]
async fn test_ddl_then_select_returns_table() {
    let mock = MockWarehouse::new();
    let runner = StatementRunner::new(&mock);

    let outcome = runner
        .run_block("CREATE TABLE t (x INT); SELECT 1 AS x;")
        .await
        .unwrap();

    assert_eq!(outcome.statements_executed, 2);
    let table = outcome.result.expect("final SELECT should produce a table");
    assert_eq!(table.row_count, 1);
    assert_eq!(
        mock.executed_statements(),
        vec!["CREATE TABLE t (x INT)", "SELECT 1 AS x"]
    );
}

#[tokio::test]
async fn test_failure_stops_the_block() {
    let mock = MockWarehouse::failing_on("1/0");
    let runner = StatementRunner::new(&mock);

    let result = runner.run_block("SELECT 1; SELECT 1/0;").await;

    let error = result.expect_err("division statement should fail");
    assert!(matches!(error, PipeError::Execution(_)));
    // The first statement ran; nothing after the failure did.
    assert_eq!(mock.executed_statements(), vec!["SELECT 1"]);
}

#[tokio::test]
async fn test_delimiters_only_block() {
    let mock = MockWarehouse::new();
    let runner = StatementRunner::new(&mock);

    let outcome = runner.run_block(";  ; ").await.unwrap();

    assert_eq!(outcome.statements_executed, 0);
    assert!(outcome.result.is_none());
    assert!(mock.executed_statements().is_empty());
}

#[tokio::test]
async fn test_multi_block_pipeline_keeps_last_result() {
    let mock = MockWarehouse::new();
    let runner = StatementRunner::new(&mock);

    // A setup block ending in DML, then a report block ending in SELECT —
    // the shape of the built-in demo pipeline.
    let setup = runner
        .run_block("CREATE TABLE t (x INT); INSERT INTO t VALUES (1)")
        .await
        .unwrap();
    assert!(setup.result.is_none());

    let report = runner
        .run_block("CREATE TABLE r AS SELECT x FROM t; SELECT x FROM r")
        .await
        .unwrap();
    let table = report.result.expect("report block ends in SELECT");
    assert_eq!(table.rows[0][0], Value::String("Mock result for: SELECT x FROM r".to_string()));
}

#[test]
fn test_split_statements_is_exposed_and_idempotent() {
    let block = "CREATE TABLE t (x INT);\n SELECT 1 ;";
    let once = split_statements(block);
    assert_eq!(once, vec!["CREATE TABLE t (x INT)", "SELECT 1"]);

    let twice: Vec<&str> = once
        .iter()
        .flat_map(|stmt| split_statements(stmt))
        .collect();
    assert_eq!(once, twice);
}
