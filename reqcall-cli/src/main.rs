use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::process;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use reqcall_core::{ClientConfig, DecodeTarget, RequestSpec};

/// reqcall — Send one HTTP request and check its status
#[derive(Parser, Debug)]
#[command(
    name = "reqcall",
    version,
    about = "Send an HTTP request and check the response status"
)]
struct Cli {
    /// URL to call
    url: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    method: String,

    /// Header as `Key: Value` (repeatable, last one wins)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Query parameter as `key=value` (repeatable, last one wins)
    #[arg(short, long = "query", value_parser = parse_query)]
    query: Vec<(String, String)>,

    /// Request body, or `@path` to stream it from a file
    #[arg(short, long)]
    data: Option<String>,

    /// Status code treated as success
    #[arg(short, long, default_value_t = 200)]
    expect: u16,

    /// Timeout in seconds (0 uses the 15s default)
    #[arg(short, long, default_value_t = 0)]
    timeout: u64,

    /// Accept any TLS certificate
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Decode response bodies as JSON and pretty-print them
    #[arg(long)]
    json: bool,

    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once(':')
        .ok_or_else(|| format!("Invalid header '{}', expected 'Key: Value'", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

fn parse_query(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid query parameter '{}', expected 'key=value'", s))?;
    Ok((key.to_string(), value.to_string()))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(label: &str, value: &serde_json::Value) {
    if value.is_null() {
        return;
    }
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    println!("  {}", label.dimmed());
    for line in pretty.lines() {
        println!("    {}", line);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut spec = RequestSpec::new(cli.method.to_uppercase(), &cli.url);
    for (k, v) in &cli.headers {
        spec = spec.header(k, v);
    }
    for (k, v) in &cli.query {
        spec = spec.query(k, v);
    }

    // Body
    spec = match cli.data.as_deref() {
        Some(data) => match data.strip_prefix('@') {
            Some(path) => match File::open(path) {
                Ok(file) => spec.body(file),
                Err(e) => {
                    eprintln!(
                        "{} Error reading file '{}': {}",
                        "✖".red().bold(),
                        path.bold(),
                        e
                    );
                    process::exit(1);
                }
            },
            None => spec.body_bytes(data),
        },
        None => spec,
    };

    // Client
    debug!(
        timeout_secs = cli.timeout,
        insecure = cli.insecure,
        json = cli.json,
        "building client"
    );
    let requester = match ClientConfig::new()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_skip_tls_verify(cli.insecure)
        .build()
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} Client error: {}", "✖".red().bold(), e);
            process::exit(1);
        }
    };

    // Execute
    let mut body = serde_json::Value::Null;
    let mut body_error = serde_json::Value::Null;
    let (body_target, error_target): (
        Option<&mut dyn DecodeTarget>,
        Option<&mut dyn DecodeTarget>,
    ) = if cli.json {
        (
            Some(&mut body as &mut dyn DecodeTarget),
            Some(&mut body_error as &mut dyn DecodeTarget),
        )
    } else {
        (None, None)
    };

    println!("{} {}", cli.method.to_uppercase().bold(), cli.url.underline());

    match requester.execute(spec, cli.expect, body_target, error_target) {
        Ok(message) => {
            println!("{} {}", "✔".green().bold(), message);
            print_json("Response Body:", &body);
        }
        Err(e) => {
            eprintln!("{} {}", "✖".red().bold(), e);
            print_json("Error Body:", &body_error);
            process::exit(1);
        }
    }
}
