//! # OWS Request Check
//!
//! A command-line utility that decodes one OGC request the way a server
//! would and prints the typed request, or the service exception, as JSON.
//!
//! ## Usage
//!
//! ### Decode a KVP query string
//!
//! ```bash
//! cargo run --bin ows-request-check -- "SERVICE=WMS&REQUEST=GetMap&LAYERS=roads&..."
//! ```
//!
//! ### Decode an XML request document
//!
//! ```bash
//! cargo run --bin ows-request-check -- @getfeature.xml
//! ```
//!
//! ### Use custom tables
//!
//! ```bash
//! cargo run --bin ows-request-check -- --parsers parsers.json --operations operations.json \
//!     --config dispatcher.json "SERVICE=WMS&REQUEST=GetCapabilities"
//! ```
//!
//! Set `RUST_LOG=debug` to see routing and decoding decisions.
//!
//! ## Exit Codes
//!
//! - `0`: The request decoded
//! - `1`: The request was rejected with a service exception
//! - `2`: Bad arguments or unreadable tables

use ows_dispatch::dispatcher::{DispatcherBuilder, DispatcherConfig, OperationCatalog};
use ows_dispatch::{BuildError, Dispatcher, ParserRegistry, RawRequest};
use std::env;
use std::fs;
use std::process;

#[derive(Debug, Default)]
struct Options {
    config: Option<String>,
    parsers: Option<String>,
    operations: Option<String>,
    input: Option<String>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args[1..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage(&args[0]);
            process::exit(2);
        }
    };

    let Some(input) = options.input.as_deref() else {
        print_usage(&args[0]);
        process::exit(2);
    };

    let dispatcher = match build_dispatcher(&options) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            eprintln!("❌ Could not set up dispatcher: {}", e);
            process::exit(2);
        }
    };

    let raw = match read_request(input) {
        Ok(raw) => raw,
        Err(message) => {
            eprintln!("❌ {}", message);
            process::exit(2);
        }
    };

    match dispatcher.dispatch(&raw) {
        Ok(request) => {
            println!(
                "✓ {} {} {} ({} fields)",
                request.service,
                request.operation,
                request.version,
                request.fields.len()
            );
            print_json(&request);
        }
        Err(exception) => {
            eprintln!("❌ {}", exception);
            print_json(&exception);
            process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} needs a file argument", flag))
        };
        match arg.as_str() {
            "--config" => options.config = Some(value("--config")?),
            "--parsers" => options.parsers = Some(value("--parsers")?),
            "--operations" => options.operations = Some(value("--operations")?),
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            input => {
                if options.input.is_some() {
                    return Err("only one request can be checked at a time".to_string());
                }
                options.input = Some(input.to_string());
            }
        }
    }

    Ok(options)
}

fn build_dispatcher(options: &Options) -> Result<Dispatcher, BuildError> {
    let mut builder = DispatcherBuilder::new();
    if let Some(path) = &options.config {
        builder = builder.with_config(DispatcherConfig::from_file(path)?);
    }
    if let Some(path) = &options.parsers {
        builder = builder.with_parsers(ParserRegistry::from_table_file(path)?);
    }
    if let Some(path) = &options.operations {
        builder = builder.with_catalog(OperationCatalog::from_file(path)?);
    }
    builder.build()
}

/// `@path` reads an XML document, anything else is a query string.
fn read_request(input: &str) -> Result<RawRequest, String> {
    match input.strip_prefix('@') {
        Some(path) => {
            let body = fs::read(path).map_err(|e| format!("Cannot read '{}': {}", path, e))?;
            RawRequest::from_xml_bytes(body).map_err(|e| e.to_string())
        }
        None => Ok(RawRequest::from_query(input)),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Could not serialize output: {}", e),
    }
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} [--config FILE] [--parsers FILE] [--operations FILE] <query-string | @request.xml>",
        program
    );
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} \"SERVICE=WMS&VERSION=1.1.1&REQUEST=GetCapabilities\"",
        program
    );
    eprintln!("  {} @getfeature.xml", program);
}
