//! Versioned file-system store example
//!
//! This example demonstrates:
//! - Storing successive versions of a ruleset on disk
//! - Evaluating the latest and a pinned version
//! - Signature checks rejecting an incompatible new version

use verdict_core::ast::{Expression, Rule};
use verdict_core::{params, Ruleset, ValueType};
use verdict_repository::{Context, FileSystemStore, Store, StoreConfig, WritableStore};
use verdict_sdk::{ClientBuilder, EvalOptions};

fn shipping_ruleset(threshold: i64, fee: i64) -> anyhow::Result<Ruleset> {
    let free = Rule::new(
        Expression::gte(Expression::int64_param("order-total"), Expression::literal(threshold))?,
        Expression::literal(0i64),
    )?;
    let paid = Rule::new(Expression::literal(true), Expression::literal(fee))?;
    Ok(Ruleset::new(ValueType::Int64, vec![free, paid])?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== Versioned Store Example ===\n");

    let root = std::env::temp_dir().join(format!("verdict-demo-{}", std::process::id()));
    let store = FileSystemStore::create(&root)?;
    let ctx = Context::background();
    let key = "shop/shipping";

    store.put(&ctx, key, shipping_ruleset(50, 5)?).await?;
    store.put(&ctx, key, shipping_ruleset(30, 7)?).await?;
    println!("Store root: {}", root.display());
    println!("Keys: {:?}", store.list(&ctx, "").await?);
    println!("Latest: version {}\n", store.get(&ctx, key).await?.version);

    // A version with a different parameter type is refused
    let incompatible = Ruleset::new(
        ValueType::Int64,
        vec![Rule::new(
            Expression::eq(vec![
                Expression::string_param("order-total"),
                Expression::literal("big"),
            ])?,
            Expression::literal(0i64),
        )?],
    )?;
    if let Err(err) = store.put(&ctx, key, incompatible).await {
        println!("Rejected incompatible version: {}\n", err);
    }

    let client = ClientBuilder::new()
        .with_store_config(StoreConfig::file_system(&root))
        .build()?;
    let params = params! { "order-total" => 40i64 };

    let latest = client.evaluate(&ctx, key, &params).await?;
    let pinned = client
        .evaluate_with(&ctx, key, &params, &EvalOptions::version("1"))
        .await?;
    println!("order-total=40");
    println!("  latest (v{}): fee {}", latest.version, latest.value);
    println!("  pinned (v{}): fee {}", pinned.version, pinned.value);

    std::fs::remove_dir_all(&root)?;
    Ok(())
}
