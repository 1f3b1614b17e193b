//! Verdict command line tool
//!
//! Loads rulesets into a file-system store and evaluates stored rulesets.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Verdict rules engine toolchain.
#[derive(Parser)]
#[command(name = "verdict", version, about = "Verdict rules engine toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a ruleset file and store it as a new version
    Load {
        /// Root directory of the file-system store
        #[arg(long)]
        addr: PathBuf,
        /// Namespace the ruleset is stored under
        #[arg(long)]
        namespace: String,
        /// Ruleset name within the namespace
        #[arg(long)]
        name: String,
        /// Ruleset file (.json, .yaml, .yml, .sexpr or .lisp)
        #[arg(long)]
        file: PathBuf,
    },

    /// Evaluate a stored ruleset
    Eval {
        /// Root directory of the file-system store
        #[arg(long)]
        addr: PathBuf,
        /// Store key, `<namespace>/<name>`
        #[arg(long)]
        key: String,
        /// Version to evaluate (default: latest)
        #[arg(long)]
        version: Option<String>,
        /// Parameter as `name=type:value`, e.g. `product-id=string:a`
        #[arg(long = "param", value_parser = commands::parse_param)]
        params: Vec<(String, verdict_core::Value)>,
    },

    /// Print a stored ruleset
    Show {
        /// Root directory of the file-system store
        #[arg(long)]
        addr: PathBuf,
        /// Store key, `<namespace>/<name>`
        #[arg(long)]
        key: String,
        /// Version to print (default: latest)
        #[arg(long)]
        version: Option<String>,
    },

    /// List stored keys
    List {
        /// Root directory of the file-system store
        #[arg(long)]
        addr: PathBuf,
        /// Only keys starting with this prefix
        #[arg(long, default_value = "")]
        prefix: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Load {
            addr,
            namespace,
            name,
            file,
        } => commands::cmd_load(&addr, &namespace, &name, &file, cli.output).await,
        Commands::Eval {
            addr,
            key,
            version,
            params,
        } => commands::cmd_eval(&addr, &key, version, params, cli.output).await,
        Commands::Show { addr, key, version } => {
            commands::cmd_show(&addr, &key, version.as_deref(), cli.output).await
        }
        Commands::List { addr, prefix } => commands::cmd_list(&addr, &prefix, cli.output).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing subscriber on stderr
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "verdict_cli=info,verdict_sdk=warn,verdict_repository=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
