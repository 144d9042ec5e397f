//! sqlpipe - A lightweight CLI for running multi-statement SQL pipelines
//! against PostgreSQL.

use sqlpipe::cli::Cli;
use sqlpipe::config::{Config, ConnectionConfig};
use sqlpipe::db;
use sqlpipe::demo;
use sqlpipe::error::{PipeError, Result};
use sqlpipe::format::{self, OutputFormat};
use sqlpipe::runner::StatementRunner;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let output_format: OutputFormat = cli.format.parse().map_err(PipeError::config)?;
    let blocks = load_blocks(&cli)?;

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = resolve_connection(&cli, &config)?.ok_or_else(|| {
        PipeError::config("No database connection configured. Use --help for usage information.")
    })?;

    info!("Connecting to {}", connection.display_string());
    let client = db::connect(&connection).await?;

    let runner = StatementRunner::new(client.as_ref());
    let mut final_result = None;
    for block in &blocks {
        let outcome = runner.run_block(block).await?;
        info!(
            "Executed {} statements in {:.2?}",
            outcome.statements_executed, outcome.execution_time
        );
        final_result = outcome.result;
    }

    match final_result {
        Some(table) => {
            let rendered = format::render(&table, output_format)?;
            match &cli.output {
                Some(path) => {
                    format::write_output(path, &rendered)?;
                    info!("Wrote {} rows to {}", table.row_count, path.display());
                }
                None => print!("{rendered}"),
            }
        }
        None => info!("Pipeline completed without a result set"),
    }

    client.close().await?;
    Ok(())
}

/// Collects the SQL blocks to run, in order, from the chosen source.
fn load_blocks(cli: &Cli) -> Result<Vec<String>> {
    let sources = [cli.demo, cli.file.is_some(), cli.execute.is_some()]
        .iter()
        .filter(|given| **given)
        .count();
    if sources > 1 {
        return Err(PipeError::config(
            "Choose one SQL source: --demo, --file, or --execute",
        ));
    }

    if cli.demo {
        return Ok(demo::blocks().iter().map(|block| block.to_string()).collect());
    }

    if let Some(path) = &cli.file {
        let sql = if path == "-" {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
                .map_err(|e| PipeError::config(format!("Failed to read stdin: {e}")))?;
            buf
        } else {
            std::fs::read_to_string(path)
                .map_err(|e| PipeError::config(format!("Failed to read {path}: {e}")))?
        };
        return Ok(vec![sql]);
    }

    if let Some(sql) = &cli.execute {
        return Ok(vec![sql.clone()]);
    }

    Err(PipeError::config(
        "No SQL to run. Use --demo, --file, or --execute.",
    ))
}

/// Resolves the final connection configuration.
///
/// Precedence: CLI arguments, then the named connection from config, then the
/// default connection from config; PG* environment variables fill whatever is
/// still missing.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<Option<ConnectionConfig>> {
    let mut connection = cli.to_connection_config()?;

    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(PipeError::config(format!(
                    "Connection '{name}' not found in config file"
                )));
            }
        }
    }

    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    let mut connection = connection.unwrap_or_default();
    connection.apply_env_defaults();

    if connection.host.is_none() && connection.database.is_none() && connection.user.is_none() {
        return Ok(None);
    }

    Ok(Some(connection))
}
