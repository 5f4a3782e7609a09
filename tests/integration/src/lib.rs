//! Integration tests for ddbkit.
//!
//! These tests load a trimmed copy of the DynamoDB `2012-08-10` API
//! definition from `fixtures/dynamodb.json` and exercise the shape engine and
//! signing-key derivation end to end.
//!
//! Run them with:
//! ```text
//! cargo test -p ddbkit-integration
//! ```

use std::sync::{Arc, Once};

use ddbkit_shape::{ApiContext, ApiDefinition, ShapeOptions};

static INIT: Once = Once::new();

/// The DynamoDB API definition fixture.
pub const DYNAMODB_DEFINITION: &str = include_str!("../fixtures/dynamodb.json");

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Parse the DynamoDB fixture.
///
/// # Panics
///
/// Panics if the fixture is not a valid API definition.
#[must_use]
pub fn dynamodb_definition() -> ApiDefinition {
    init_tracing();
    ApiDefinition::from_json(DYNAMODB_DEFINITION)
        .unwrap_or_else(|e| panic!("invalid DynamoDB fixture: {e}"))
}

/// Build a shape context over the DynamoDB fixture.
#[must_use]
pub fn dynamodb_context(options: ShapeOptions) -> Arc<ApiContext> {
    ApiContext::new(dynamodb_definition(), options)
}

mod test_operations;
mod test_shapes;
mod test_signing;
