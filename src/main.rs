use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use qsearch::{describe_permissions, describe_query, load_rule_set, parse_query, search, EnvConfig};
use qsearch_access::ResourcePath;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show how a query is interpreted
    Parse { query: String },

    /// Print the lines matching a query
    Search {
        query: String,

        /// The file to search. Reads stdin when absent.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Treat `*` and `?` in search terms as wildcards
        #[arg(long)]
        wildcard: bool,
    },

    /// Show the permission cascade of a rule set
    Permissions {
        /// The rule set document. Defaults to `$QSEARCH_RULES_PATH`.
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Check access to a resource, given as IDENTITY/GROUP/RESOURCE
        #[arg(long)]
        check: Option<ResourcePath>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter(EnvFilter::from_env("QSEARCH_LOG"))
        .with_writer(io::stderr)
        .init();

    let env_config = EnvConfig::load().context("invalid configuration")?;
    debug!(?env_config, "loaded configuration");

    let mut stdout = io::stdout().lock();

    match Cli::parse().command {
        Some(Command::Parse { query }) => {
            let query = parse_query(&query, &env_config)?;
            describe_query(&query, &mut stdout)?;
        }
        Some(Command::Search {
            query,
            file,
            wildcard,
        }) => {
            let query = parse_query(&query, &env_config)?;
            let wildcard = wildcard || env_config.wildcard;

            match file {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("unable to open {}", path.display()))?;
                    search(&query, BufReader::new(file), wildcard, &mut stdout)?;
                }
                None => {
                    search(&query, io::stdin().lock(), wildcard, &mut stdout)?;
                }
            }
        }
        Some(Command::Permissions { rules, check }) => {
            let path = rules.unwrap_or(env_config.rules_path);
            let rule_set = load_rule_set(&path)?;
            describe_permissions(&rule_set, check.as_ref(), &mut stdout)?;
        }
        None => {}
    }

    Ok(())
}
