//! Print the OpenAPI document as JSON or YAML.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;

use clap::{Parser, ValueEnum};
use unbothered_backend::doc::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "openapi-dump", about = "Print the journal API OpenAPI document", version)]
struct CliArgs {
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let doc = ApiDoc::openapi();
    let rendered = match args.format {
        Format::Json => doc.to_pretty_json().map_err(io::Error::other)?,
        Format::Yaml => doc.to_yaml().map_err(io::Error::other)?,
    };
    println!("{rendered}");
    Ok(())
}
