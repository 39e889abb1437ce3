//! Prints an identity and the registry form of its public key as JSON.
//!
//! Without `--config` a fresh key pair is generated. The private key is part of
//! the output, so store it somewhere safe.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use monas_identity::{Identity, IdentityConfig, IdentityService, SerializedPublicKey};

#[derive(Parser, Debug)]
#[command(name = "generate-identity")]
#[command(about = "Generate or load a premium content identity")]
struct Args {
    /// Identity config file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output<'a> {
    identity: &'a Identity,
    compressed_public_key: String,
    serialized_public_key: SerializedPublicKey,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {:?}", path);
            IdentityConfig::load(path)?
        }
        None => IdentityConfig::default(),
    };

    let service = IdentityService::from_config(&config)?;

    let output = Output {
        identity: service.identity(),
        compressed_public_key: service.compressed_public_key()?,
        serialized_public_key: service.serialized_public_key()?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
