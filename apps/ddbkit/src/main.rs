//! ddbkit - inspect DynamoDB API definitions and derive SigV4 signing keys.
//!
//! # Usage
//!
//! ```text
//! ddbkit shape <api.json> <ShapeName>
//! ddbkit operations <api.json>
//! ddbkit signing-key <yyyymmdd> [service]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_ACCESS_KEY_ID` | *(unset)* | Access key ID |
//! | `AWS_SECRET_ACCESS_KEY` | *(unset)* | Secret access key used by `signing-key` |
//! | `AWS_REGION` / `DEFAULT_REGION` | `us-east-1` | Region of the credential scope |
//! | `DYNAMODB_PORT` | `8000` | Endpoint port |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod render;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ddbkit_auth::{Encoding, SecretKey, credential_scope, derive_signing_key};
use ddbkit_core::ClientConfig;
use ddbkit_shape::{ApiContext, ApiDefinition, ShapeOptions};

/// Deepest level of the shape tree printed by `shape`.
const MAX_DEPTH: usize = 8;

/// Service signed for when `signing-key` is given none.
const DEFAULT_SERVICE: &str = "dynamodb";

const USAGE: &str = "usage:
  ddbkit shape <api.json> <ShapeName>
  ddbkit operations <api.json>
  ddbkit signing-key <yyyymmdd> [service]";

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = ClientConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;
    debug!(?config, "loaded configuration");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["shape", path, name] => print_shape(Path::new(path), name),
        ["operations", path] => print_operations(Path::new(path)),
        ["signing-key", date] => print_signing_key(&config, date, DEFAULT_SERVICE),
        ["signing-key", date, service] => print_signing_key(&config, date, service),
        _ => bail!("{USAGE}"),
    }
}

/// Load an API definition document into a shape context.
fn load_context(path: &Path) -> Result<Arc<ApiContext>> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read API definition: {}", path.display()))?;
    let definition = ApiDefinition::from_slice(&bytes)
        .with_context(|| format!("failed to parse API definition: {}", path.display()))?;

    info!(
        protocol = %definition.metadata.protocol,
        shapes = definition.shapes.len(),
        operations = definition.operations.len(),
        "loaded API definition"
    );

    Ok(ApiContext::new(definition, ShapeOptions::default()))
}

fn print_shape(path: &Path, name: &str) -> Result<()> {
    let context = load_context(path)?;
    let shape = context
        .shape(name)
        .with_context(|| format!("failed to materialize shape {name}"))?;
    let tree = render::render(&shape, name, MAX_DEPTH)
        .with_context(|| format!("failed to render shape {name}"))?;
    print!("{tree}");
    Ok(())
}

fn print_operations(path: &Path) -> Result<()> {
    let context = load_context(path)?;
    for name in context.operation_names() {
        let operation = context.operation(name)?;
        match operation.http() {
            Some(http) => println!("{name}\t{} {}", http.method, http.request_uri),
            None => println!("{name}"),
        }
    }
    Ok(())
}

fn print_signing_key(config: &ClientConfig, date: &str, service: &str) -> Result<()> {
    config.validate().context("incomplete credentials")?;

    let region = config.region.as_str();
    let secret = SecretKey::from(config.secret_access_key.as_str());
    let key = derive_signing_key(&secret, date, region, service)
        .context("failed to derive signing key")?;

    info!(scope = %credential_scope(date, region, service), "derived signing key");
    println!("{}", key.encode(Encoding::Hex));
    Ok(())
}
