use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;
use sql_gateway_client::config::{BASE_URL_ENV, DEFAULT_BASE_URL, TIMEOUT_MS_ENV};
use sql_gateway_client::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Send a SQL statement to the SQL gateway")]
struct Args {
    #[arg(long, value_enum, default_value = "mssql")]
    backend: Backend,
    /// Use the backend's read-write route instead of the read-only one.
    #[arg(long)]
    write: bool,
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, env = TIMEOUT_MS_ENV, default_value_t = 60_000)]
    timeout_ms: u64,
    /// Print results as JSON instead of tab-separated text.
    #[arg(long)]
    json: bool,
    /// Statement to run; read from stdin when omitted.
    query: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let result = match connect(&args) {
        Ok(client) => {
            let stdin = std::io::stdin();
            run(&client, &args, stdin.lock(), &mut std::io::stdout().lock()).await
        }
        Err(err) => Err(err),
    };
    report(result, &mut std::io::stderr().lock())
}

fn connect(args: &Args) -> Result<GatewayClient, SqlGatewayError> {
    let config = GatewayConfig::builder()
        .base_url(args.base_url.as_str())
        .timeout_ms(args.timeout_ms)
        .build()?;
    GatewayClient::new(config)
}

/// Run the statement from `args` (or `input` when none was given) and print
/// the outcome to `out`.
async fn run<R, W>(
    client: &GatewayClient,
    args: &Args,
    input: R,
    out: &mut W,
) -> Result<(), SqlGatewayError>
where
    R: Read,
    W: Write,
{
    let query = match &args.query {
        Some(query) => query.clone(),
        None => read_query(input)?,
    };

    if args.write {
        let result = client.write(args.backend, &query).await?;
        if args.json {
            emit(out, &to_json(&result)?)
        } else {
            emit(out, &result.to_string())
        }
    } else {
        let rows = client.read(args.backend, &query).await?;
        if args.json {
            emit(out, &to_json(&rows)?)
        } else {
            rows.iter().try_for_each(|row| emit(out, &row.join("\t")))
        }
    }
}

/// Print `result`'s error to `err_out` and map it to the process exit status.
fn report<W: Write>(result: Result<(), SqlGatewayError>, err_out: &mut W) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(err_out, "{err}");
            ExitCode::FAILURE
        }
    }
}

fn read_query<R: Read>(mut input: R) -> Result<String, SqlGatewayError> {
    let mut query = String::new();
    input
        .read_to_string(&mut query)
        .map_err(|e| SqlGatewayError::Other(format!("failed to read query from stdin: {e}")))?;
    Ok(query)
}

fn emit<W: Write>(out: &mut W, line: &str) -> Result<(), SqlGatewayError> {
    writeln!(out, "{line}")
        .map_err(|e| SqlGatewayError::Other(format!("failed to write output: {e}")))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, SqlGatewayError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| SqlGatewayError::Other(format!("failed to encode JSON output: {e}")))
}
