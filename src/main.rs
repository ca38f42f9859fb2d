use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use iam_explorer::{CatalogQuery, ExplorerConfig, FileSource, RoleCatalog, RoleDiff, RoleSource, render};

/// Explore cloud IAM roles and the permissions they include.
#[derive(Debug, Parser)]
#[command(name = "iam-explorer", version)]
struct Cli {
    /// JSON dataset of roles (an array, or an object with a `roles` array).
    #[arg(long, env = "IAM_EXPLORER_ROLES", value_name = "PATH")]
    roles: PathBuf,

    /// Print JSON instead of tables.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List services and the roles defined under each.
    Services,
    /// Show which of a service's roles include which permissions.
    Permissions {
        /// Service identifier, e.g. `storage`, or `project` for the basic roles.
        service: String,
    },
    /// Compare the permissions of two roles.
    Compare {
        /// Left role name (defaults to roles/appengine.serviceAdmin).
        left: Option<String>,
        /// Right role name (defaults to roles/appengine.deployer).
        right: Option<String>,
    },
    /// Find roles by name.
    Search {
        /// Case-insensitive fragment of the role name.
        query: String,
        /// Maximum number of results.
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Summarise the dataset.
    Stats,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonOutput<'a> {
    left: &'a str,
    right: &'a str,
    #[serde(flatten)]
    diff: &'a RoleDiff,
}

fn main() -> Result<()> {
    #[cfg(feature = "audit")]
    iam_explorer::init_audit_logger();

    let cli = Cli::parse();
    let source = FileSource::new(&cli.roles);
    let catalog = source
        .load_catalog(ExplorerConfig::default())
        .with_context(|| format!("failed to load roles from {}", cli.roles.display()))?;

    run(&catalog, cli.command, cli.json)
}

fn run(catalog: &RoleCatalog, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Services => {
            let services = catalog.services();
            if json {
                print_json(&services)?;
            } else {
                render::service_table(&services).printstd();
            }
        }
        Command::Permissions { service } => {
            let matrix = catalog.permission_matrix(&service);
            if json {
                print_json(&matrix)?;
            } else if matrix.is_empty() {
                println!("No roles found for service '{service}'.");
            } else {
                render::permission_table(&matrix, catalog.config()).printstd();
            }
        }
        Command::Compare { left, right } => {
            let config = catalog.config();
            let left = left.unwrap_or_else(|| config.default_left_role.clone());
            let right = right.unwrap_or_else(|| config.default_right_role.clone());

            let diff = catalog
                .compare_strict(&left, &right)
                .with_context(|| format!("failed to compare '{left}' with '{right}'"))?;

            if json {
                print_json(&ComparisonOutput {
                    left: &left,
                    right: &right,
                    diff: &diff,
                })?;
            } else {
                print!("{}", render::render_comparison(&left, &right, &diff, config));
            }
        }
        Command::Search { query, limit } => {
            let limit = limit.unwrap_or(catalog.config().search_limit);
            let names: Vec<&str> = catalog
                .query()
                .search(&query, limit)
                .into_iter()
                .map(|role| role.name())
                .collect();

            if json {
                print_json(&names)?;
            } else if names.is_empty() {
                println!("No roles match '{query}'.");
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        Command::Stats => {
            let stats = catalog.query().statistics();
            if json {
                print_json(&stats)?;
            } else {
                println!("Roles: {}", stats.total_roles);
                println!("Services: {}", stats.total_services);
                println!("Permission entries: {}", stats.total_permissions);
                println!("Distinct permissions: {}", stats.distinct_permissions);
                if let Some(largest) = &stats.largest_role {
                    println!("Largest role: {largest}");
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}
