//! Orientation directory CLI
//!
//! Local entry point for checking the datasets and browsing the directory.
//! For AWS Lambda, use `orientation-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use orientation::{
    config::{self, Loaded},
    directory::{Resolved, Route, filter},
    error::Result,
    models::{MessageLocale, Searchable},
    services,
    storage::LocalStorage,
    utils::log,
};
use serde::Serialize;

/// Orientation - Malian university directory
#[derive(Parser, Debug)]
#[command(
    name = "orientation",
    version,
    about = "Directory of Malian universities and baccalauréat series"
)]
struct Cli {
    /// Base directory containing `data/config.toml` and `data/locale.toml`
    #[arg(short, long, default_value = ".")]
    base_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate configuration and datasets
    Validate,

    /// Show dataset and configuration info
    Info,

    /// List every static detail path
    Paths {
        /// Print routes as JSON instead of URLs
        #[arg(long)]
        json: bool,
    },

    /// Show a private university by slug
    Private { slug: String },

    /// Show a public university reached through a series
    Public { series: String, university: String },

    /// Show a baccalauréat series by slug
    Series { slug: String },

    /// Resolve a site path or URL
    Resolve { path: String },

    /// Filter a listing by name or abbreviation
    Search {
        query: String,

        #[arg(long, value_enum, default_value_t = Kind::Private)]
        kind: Kind,
    },

    /// Translate an auth provider error code
    AuthError { code: String },

    /// Run the daily cleanup against the local document store
    Cleanup,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Private,
    Public,
    Series,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
    log::init(level);
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_resolved(resolved: Resolved<'_>, not_found: &str) -> Result<()> {
    match resolved {
        Resolved::Private(record) => print_json(record),
        Resolved::PublicSeries(group) => print_json(group),
        Resolved::Public(entry) => print_json(&entry),
        Resolved::Series(series) => print_json(series),
        Resolved::NotFound => {
            log::warn(not_found);
            Ok(())
        }
    }
}

fn print_matches<T: Searchable>(records: &[T], query: &str, messages: &MessageLocale) {
    let matches = filter(records, query);
    if matches.is_empty() {
        log::info(&messages.no_results.replace("{query}", query.trim()));
        return;
    }

    log::header(
        &messages
            .results_count
            .replace("{count}", &matches.len().to_string())
            .replace("{query}", query.trim()),
    );
    for record in matches {
        match record.abbreviation() {
            Some(abbr) => log::sub_item(&format!("{} ({})", record.name(), abbr)),
            None => log::sub_item(record.name()),
        }
    }
}

fn dataset_counts(loaded: &Loaded) -> String {
    let dir = &loaded.directory;
    loaded
        .locale
        .messages
        .dataset_counts
        .replace("{private}", &dir.private().len().to_string())
        .replace("{groups}", &dir.public().len().to_string())
        .replace("{series}", &dir.series().len().to_string())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, locale) = config::load_settings(&cli.base_dir)?;
    init_logging(cli.verbose, &config.logging.level);

    ::log::debug!("Loading directory from {}", cli.base_dir.display());

    let validating = matches!(cli.command, Command::Validate);
    if validating {
        log::header(&locale.messages.validate_starting);
    }

    let directory = match config::load_directory(&config, &cli.base_dir) {
        Ok(directory) => directory,
        Err(e) => {
            if validating {
                log::error(&locale.messages.validate_failed.replace("{error}", &e.to_string()));
            }
            return Err(e);
        }
    };

    let loaded = Loaded {
        config,
        locale,
        directory,
    };
    let dir = &loaded.directory;
    let messages = &loaded.locale.messages;

    match cli.command {
        Command::Validate => validate(&loaded),

        Command::Info => {
            let paths = &loaded.config.paths;
            log::summary(
                "Orientation",
                &[
                    ("Base directory", cli.base_dir.display().to_string()),
                    (
                        "Datasets",
                        if paths.uses_bundled() {
                            "bundled".to_string()
                        } else {
                            "from disk".to_string()
                        },
                    ),
                    ("Storage directory", paths.storage_dir.clone()),
                    ("Records", dataset_counts(&loaded)),
                    (
                        "Programmes",
                        dir.public()
                            .iter()
                            .map(|group| group.program_count())
                            .sum::<usize>()
                            .to_string(),
                    ),
                    ("Static paths", dir.all_paths().len().to_string()),
                    (
                        "Unnamed records",
                        dir.dataset().unnamed_count().to_string(),
                    ),
                ],
            );
        }

        Command::Paths { json } => {
            let routes = dir.all_paths();
            if json {
                print_json(&routes)?;
            } else {
                log::header(&messages.paths_header.replace("{count}", &routes.len().to_string()));
                for route in &routes {
                    println!("{}", route);
                }
            }
        }

        Command::Private { slug } => {
            let route = Route::Private { slug };
            print_resolved(dir.resolve(&route), &messages.private_not_found)?;
        }

        Command::Public { series, university } => {
            let route = Route::Public { series, university };
            print_resolved(dir.resolve(&route), &messages.public_not_found)?;
        }

        Command::Series { slug } => {
            let route = Route::Series { slug };
            print_resolved(dir.resolve(&route), &messages.series_not_found)?;
        }

        Command::Resolve { path } => {
            print_resolved(dir.resolve_path(&path), &messages.page_not_found)?;
        }

        Command::Search { query, kind } => match kind {
            Kind::Private => print_matches(&dir.private(), &query, messages),
            Kind::Public => print_matches(&dir.public(), &query, messages),
            Kind::Series => print_matches(&dir.series(), &query, messages),
        },

        Command::AuthError { code } => {
            println!("{}", loaded.locale.auth_errors.message(&code));
        }

        Command::Cleanup => {
            let store = LocalStorage::new(loaded.config.paths.storage_root(&cli.base_dir));
            log::info(&format!("Document store: {}", store.root().display()));

            let report =
                services::run_daily_cleanup(&store, &loaded.config.cleanup, chrono::Utc::now())
                    .await?;
            log::summary(
                "Cleanup",
                &[
                    ("Interactions deleted", report.interactions_deleted.to_string()),
                    ("Scholarships deleted", report.scholarships_deleted.to_string()),
                    ("Skipped", report.skipped.to_string()),
                ],
            );
        }
    }

    Ok(())
}

/// Report dataset problems that do not stop loading.
fn validate(loaded: &Loaded) {
    let duplicates = loaded.directory.duplicate_routes();
    for duplicate in &duplicates {
        log::warn(&format!(
            "{} is shared by {} records",
            duplicate.route, duplicate.count
        ));
    }

    let unnamed = loaded.directory.dataset().unnamed_count();
    if unnamed > 0 {
        log::warn(&format!("{} unnamed record(s) excluded from listings", unnamed));
    }

    log::success(&loaded.locale.messages.validate_success);
    log::summary(
        "Dataset",
        &[
            ("Records", dataset_counts(loaded)),
            ("Duplicate routes", duplicates.len().to_string()),
            ("Unnamed records", unnamed.to_string()),
        ],
    );
}
