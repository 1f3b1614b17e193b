//! Subcommand implementations

use anyhow::{bail, Context as _, Result};
use serde_json::json;
use std::path::Path;
use verdict_core::{Params, Ruleset, Value, ValueType};
use verdict_repository::{namespaced_key, Context, FileSystemStore, Store, WritableStore};
use verdict_sdk::{ClientBuilder, EvalOptions};

use crate::OutputFormat;

/// Parse `name=type:value` into a named parameter value
pub(crate) fn parse_param(arg: &str) -> std::result::Result<(String, Value), String> {
    let (name, typed) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=type:value, got '{}'", arg))?;
    let (type_name, data) = typed
        .split_once(':')
        .ok_or_else(|| format!("expected type:value after '{}=', got '{}'", name, typed))?;
    if name.is_empty() {
        return Err(format!("missing parameter name in '{}'", arg));
    }

    let value_type: ValueType = type_name.parse().map_err(|e| format!("{}", e))?;
    let value = Value::parse(value_type, data).map_err(|e| format!("{}", e))?;
    Ok((name.to_string(), value))
}

/// Read and validate a ruleset, choosing the decoder by file extension
pub(crate) fn read_ruleset(file: &Path) -> Result<Ruleset> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read '{}'", file.display()))?;
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let ruleset = match extension.as_str() {
        "json" => Ruleset::from_json(&content)?,
        "yaml" | "yml" => Ruleset::from_yaml(&content)?,
        "sexpr" | "lisp" => verdict_parser::parse_ruleset(&content)?,
        other => bail!(
            "unsupported ruleset file extension '{}' (expected json, yaml, yml, sexpr or lisp)",
            other
        ),
    };
    Ok(ruleset)
}

pub(crate) async fn cmd_load(
    addr: &Path,
    namespace: &str,
    name: &str,
    file: &Path,
    output: OutputFormat,
) -> Result<()> {
    let ruleset = read_ruleset(file)
        .with_context(|| format!("invalid ruleset '{}'", file.display()))?;
    let store = FileSystemStore::create(addr)?;
    let key = namespaced_key(namespace, name);

    let entry = store.put(&Context::background(), &key, ruleset).await?;
    tracing::info!(key = %entry.key, version = %entry.version, "ruleset stored");

    match output {
        OutputFormat::Text => println!("{} version {}", entry.key, entry.version),
        OutputFormat::Json => println!(
            "{}",
            json!({ "key": entry.key, "version": entry.version })
        ),
    }
    Ok(())
}

pub(crate) async fn cmd_eval(
    addr: &Path,
    key: &str,
    version: Option<String>,
    params: Vec<(String, Value)>,
    output: OutputFormat,
) -> Result<()> {
    let store = FileSystemStore::new(addr)?;
    let client = ClientBuilder::new().with_store(store).without_cache().build()?;
    let params: Params = params.into_iter().collect();

    let result = client
        .evaluate_with(&Context::background(), key, &params, &EvalOptions { version })
        .await
        .with_context(|| format!("failed to evaluate '{}'", key))?;

    match output {
        OutputFormat::Text => println!(
            "{}\t(rule {}, version {})",
            result.value, result.matched_rule, result.version
        ),
        OutputFormat::Json => println!(
            "{}",
            json!({
                "key": key,
                "version": result.version,
                "matched_rule": result.matched_rule,
                "type": result.value.value_type().as_str(),
                "value": result.value.to_canonical_string(),
            })
        ),
    }
    Ok(())
}

pub(crate) async fn cmd_show(
    addr: &Path,
    key: &str,
    version: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let store = FileSystemStore::new(addr)?;
    let ctx = Context::background();
    let entry = match version {
        Some(version) => store.get_version(&ctx, key, version).await?,
        None => store.get(&ctx, key).await?,
    };

    match output {
        OutputFormat::Text => {
            println!("; {} version {}", entry.key, entry.version);
            println!("{}", verdict_parser::print_ruleset(&entry.ruleset));
        }
        OutputFormat::Json => println!("{}", entry.ruleset.to_json_pretty()?),
    }
    Ok(())
}

pub(crate) async fn cmd_list(addr: &Path, prefix: &str, output: OutputFormat) -> Result<()> {
    let store = FileSystemStore::new(addr)?;
    let keys = store.list(&Context::background(), prefix).await?;

    match output {
        OutputFormat::Text => {
            for key in keys {
                println!("{}", key);
            }
        }
        OutputFormat::Json => println!("{}", json!(keys)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("product-id=string:a").unwrap(),
            ("product-id".to_string(), Value::from("a"))
        );
        assert_eq!(
            parse_param("age=int64:42").unwrap(),
            ("age".to_string(), Value::Int64(42))
        );
        assert_eq!(
            parse_param("note=string:a=b:c").unwrap(),
            ("note".to_string(), Value::from("a=b:c"))
        );
        assert_eq!(
            parse_param("beta=bool:true").unwrap(),
            ("beta".to_string(), Value::Bool(true))
        );
    }

    #[test]
    fn test_parse_param_errors() {
        for bad in ["novalue", "x=int64", "=string:a", "x=decimal:1", "x=int64:abc"] {
            assert!(parse_param(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_read_ruleset_by_extension() {
        let dir = TempDir::new().unwrap();
        let sexpr = r#"(ruleset string (rule (eq (param "id" "string") "a") "yes"))"#;
        let expected = verdict_parser::parse_ruleset(sexpr).unwrap();

        let lisp = dir.path().join("r.lisp");
        std::fs::write(&lisp, sexpr).unwrap();
        assert_eq!(read_ruleset(&lisp).unwrap(), expected);

        let json = dir.path().join("r.json");
        std::fs::write(&json, expected.to_json().unwrap()).unwrap();
        assert_eq!(read_ruleset(&json).unwrap(), expected);

        let yaml = dir.path().join("r.YML");
        std::fs::write(&yaml, expected.to_yaml().unwrap()).unwrap();
        assert_eq!(read_ruleset(&yaml).unwrap(), expected);

        let txt = dir.path().join("r.txt");
        std::fs::write(&txt, sexpr).unwrap();
        assert!(read_ruleset(&txt).is_err());
    }
}
