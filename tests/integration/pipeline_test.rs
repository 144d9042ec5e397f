//! Pipeline execution tests against a real PostgreSQL database.
//!
//! Set DATABASE_URL to run these; they are skipped otherwise.

use sqlpipe::config::ConnectionConfig;
use sqlpipe::db::{PostgresWarehouse, Value, WarehouseClient};
use sqlpipe::demo;
use sqlpipe::error::PipeError;
use sqlpipe::runner::StatementRunner;

/// Helper to create a test client.
async fn get_test_client() -> Option<PostgresWarehouse> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let config = ConnectionConfig::from_connection_string(&url).ok()?;
    PostgresWarehouse::connect(&config).await.ok()
}

#[tokio::test]
async fn test_block_with_data_dependencies() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let runner = StatementRunner::new(&client);

    let outcome = runner
        .run_block(
            "DROP TABLE IF EXISTS sqlpipe_dep_test;
             CREATE TABLE sqlpipe_dep_test (x INT);
             INSERT INTO sqlpipe_dep_test VALUES (1), (2), (3);
             SELECT COUNT(*) AS n FROM sqlpipe_dep_test",
        )
        .await
        .unwrap();

    assert_eq!(outcome.statements_executed, 4);
    let table = outcome.result.expect("final SELECT returns a table");
    assert_eq!(table.column_names(), vec!["n"]);
    assert_eq!(table.rows[0][0], Value::Int(3));

    runner
        .run_block("DROP TABLE sqlpipe_dep_test")
        .await
        .unwrap();
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_block_ending_in_ddl_has_no_result() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let runner = StatementRunner::new(&client);

    let outcome = runner
        .run_block("DROP TABLE IF EXISTS sqlpipe_ddl_test; CREATE TABLE sqlpipe_ddl_test (x INT)")
        .await
        .unwrap();

    assert_eq!(outcome.statements_executed, 2);
    assert!(outcome.result.is_none());

    runner
        .run_block("DROP TABLE sqlpipe_ddl_test")
        .await
        .unwrap();
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_failure_mid_block_leaves_rest_unexecuted() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let runner = StatementRunner::new(&client);

    runner
        .run_block("DROP TABLE IF EXISTS sqlpipe_abort_test")
        .await
        .unwrap();

    let result = runner
        .run_block(
            "SELECT 1;
             SELECT 1/0;
             CREATE TABLE sqlpipe_abort_test (x INT)",
        )
        .await;

    let error = result.expect_err("division by zero should fail the block");
    assert!(matches!(error, PipeError::Execution(_)));
    assert!(error.to_string().contains("division by zero"));

    // The statement after the failure never ran, so the table must not exist.
    let check = runner
        .run_block("SELECT * FROM sqlpipe_abort_test")
        .await;
    assert!(check.is_err());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_demo_pipeline_end_to_end() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let runner = StatementRunner::new(&client);

    let mut final_result = None;
    for block in demo::blocks() {
        let outcome = runner.run_block(block).await.unwrap();
        final_result = outcome.result;
    }

    let table = final_result.expect("demo pipeline ends in a SELECT");
    assert_eq!(
        table.column_names(),
        vec![
            "customer_id",
            "name",
            "region",
            "order_count",
            "total_spent",
            "spend_rank"
        ]
    );
    // Four customers, ranked by spend; Umbrella has the largest total.
    assert_eq!(table.row_count, 4);
    assert_eq!(table.rows[0][1], Value::String("Umbrella".to_string()));

    runner
        .run_block(
            "DROP TABLE demo_revenue_report;
             DROP TABLE stage_customer_totals;
             DROP TABLE demo_orders;
             DROP TABLE demo_customers",
        )
        .await
        .unwrap();
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_empty_select_still_reports_columns() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let runner = StatementRunner::new(&client);

    let outcome = runner
        .run_block("SELECT 1 AS x WHERE false")
        .await
        .unwrap();

    let table = outcome.result.expect("empty SELECT still has a result set");
    assert!(table.is_empty());
    assert_eq!(table.column_names(), vec!["x"]);

    client.close().await.unwrap();
}
