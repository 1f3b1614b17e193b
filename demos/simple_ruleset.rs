//! Simple ruleset example
//!
//! This example demonstrates:
//! - Writing a ruleset as an s-expression
//! - Storing it in an in-memory store
//! - Evaluating it by key through the client

use std::sync::Arc;
use verdict_core::params;
use verdict_repository::{Context, MemoryStore, WritableStore};
use verdict_sdk::ClientBuilder;

const DISCOUNT: &str = r#"
(ruleset int64
  (rule (eq (param "product-id" "string") "a") 10)
  (rule (in (param "product-id" "string") "b" "c") 20)
  (rule #t 0))
"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verdict_sdk=info".into()),
        )
        .init();

    println!("=== Simple Ruleset Example ===\n");

    let ruleset = verdict_parser::parse_ruleset(DISCOUNT)?;
    println!("Signature: {}", ruleset.signature());
    println!("JSON form:\n{}\n", ruleset.to_json_pretty()?);

    let store = Arc::new(MemoryStore::new());
    let ctx = Context::background();
    let entry = store.put(&ctx, "shop/discount", ruleset).await?;
    println!("Stored {} version {}\n", entry.key, entry.version);

    let client = ClientBuilder::new().with_store(store).build()?;

    for product in ["a", "b", "z"] {
        let result = client
            .evaluate(&ctx, "shop/discount", &params! { "product-id" => product })
            .await?;
        println!(
            "  product-id={:<3} -> discount {} (rule {})",
            product, result.value, result.matched_rule
        );
    }

    // Typed getter: the ruleset returns int64, so asking for a string fails
    let err = client
        .get_string(&ctx, "shop/discount", &params! { "product-id" => "a" })
        .await
        .unwrap_err();
    println!("\nget_string on an int64 ruleset: {} ({})", err, err.kind());

    if let Some(stats) = client.cache_stats() {
        println!("\nCache: {} hits, {} misses", stats.hits, stats.misses);
    }

    Ok(())
}
