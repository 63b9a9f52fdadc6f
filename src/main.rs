//! Regimate CLI - jurisdiction-scoped electrical standards assistant

use clap::{Parser, Subcommand};
use regimate::Assistant;
use regimate::config;
use regimate::prefs::Prefs;
use regimate::record::{AnswerSettingsPatch, ThemeMode, VerbosityLevel};
use regimate::region::{Region, RegionCatalog};
use regimate::resolver::Resolver;
use regimate::storage::SqliteStore;
use regimate::ui::{self, Icons};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "regimate")]
#[command(version = "0.1.0")]
#[command(about = "Electrical standards assistant - jurisdiction-scoped Q&A with cited answers")]
#[command(long_about = r#"
Regimate answers free-text questions about electrical wiring standards,
scoped to your selected jurisdiction:
  • Cited answers (standard + clause) where a canonical entry matches
  • Deterministic regional fallback for everything else
  • Durable favorites, region, display and theme preferences

Example usage:
  regimate region set --country Australia --state "New South Wales"
  regimate ask "what is the minimum height for a power outlet?"
  regimate favorites list
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the preferences database
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config and create the preferences database
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Ask a question scoped to the current region
    Ask {
        /// The question to ask
        question: String,

        /// Save the answer to favorites
        #[arg(short, long)]
        save: bool,

        /// Emit the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the region
    Region {
        #[command(subcommand)]
        action: RegionAction,
    },

    /// Show or change answer display settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// List, search or remove saved answers
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Show or toggle the theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Manage the signed-out session flag
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum RegionAction {
    /// Show the current region
    Show,

    /// Set the region (state must belong to the country)
    Set {
        /// Country name as listed by `region countries`
        #[arg(short, long)]
        country: String,

        /// State or province within the country
        #[arg(short, long)]
        state: Option<String>,
    },

    /// List supported countries
    Countries,

    /// List subdivisions for a country (defaults to the current one)
    States {
        #[arg(short, long)]
        country: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the current settings
    Show,

    /// Update one or more settings; omitted fields keep their value
    Set {
        /// Upper bound on answer length, in words
        #[arg(long)]
        max_words: Option<u32>,

        /// concise, moderate or detailed
        #[arg(long)]
        verbosity: Option<VerbosityLevel>,

        /// Body font size
        #[arg(long)]
        font_size: Option<u32>,

        /// Include standard/clause citations
        #[arg(long)]
        references: Option<bool>,

        /// Expand full clause text
        #[arg(long)]
        full_clause: Option<bool>,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List all saved answers
    List,

    /// Search saved questions and answers
    Search {
        /// Case-insensitive substring
        query: String,
    },

    /// Remove a saved answer by id
    Remove {
        id: String,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the current theme
    Show,

    /// Flip between light and dark
    Toggle,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Show whether sign-in has been skipped
    Status,

    /// Proceed without an account
    Skip,

    /// Sign out (favorites, region and settings are kept)
    SignOut,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let database = resolve_database_path(cli.database)?;

    if let Commands::Init { force } = &cli.command {
        return run_init(&database, *force);
    }

    config::ensure_db_dir(&database)?;
    let prefs = Prefs::open(&database)?;
    let mut assistant = Assistant::open(prefs, Resolver::canned()).await;

    ui::theme::init(assistant.theme());

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),

        Commands::Ask { question, save, json } => {
            let question = question.trim().to_string();
            if question.is_empty() {
                anyhow::bail!("question must not be empty");
            }

            println!(
                "{} Asking in {}...",
                Icons::BOLT,
                ui::dim(&assistant.region().to_string())
            );
            let record = assistant.ask(&question).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                let settings = assistant.settings();
                ui::section(&record.question);
                println!("{}", settings.clip(&record.answer));
                if settings.include_references {
                    if let Some(citation) = record.citation() {
                        println!();
                        ui::citation(&citation);
                    }
                }
            }

            if save {
                let id = record.id.clone();
                assistant.add_favorite(record)?;
                ui::success(&format!("Saved to favorites (id {})", id));
            }
        }

        Commands::Region { action } => match action {
            RegionAction::Show => {
                println!("{} {}", Icons::GLOBE, assistant.region());
            }
            RegionAction::Set { country, state } => {
                assistant.set_region(Region::new(country, state))?;
                ui::success(&format!("Region set to {}", assistant.region()));
            }
            RegionAction::Countries => {
                for country in RegionCatalog::countries() {
                    println!("- {}", country);
                }
            }
            RegionAction::States { country } => {
                let country =
                    country.unwrap_or_else(|| assistant.region().country.clone());
                let states = RegionCatalog::states_for(&country);
                if states.is_empty() {
                    println!("∅ No subdivisions listed for {}.", country);
                } else {
                    for state in states {
                        println!("- {}", state);
                    }
                }
            }
        },

        Commands::Settings { action } => match action {
            SettingsAction::Show => {
                println!("{}", ui::settings_table(assistant.settings()));
            }
            SettingsAction::Set {
                max_words,
                verbosity,
                font_size,
                references,
                full_clause,
            } => {
                let patch = AnswerSettingsPatch {
                    max_words,
                    verbosity_level: verbosity,
                    font_size,
                    include_references: references,
                    show_full_clause: full_clause,
                };
                assistant.update_settings(patch)?;
                ui::success("Settings updated");
                println!("{}", ui::settings_table(assistant.settings()));
            }
        },

        Commands::Favorites { action } => match action {
            FavoritesAction::List => {
                let records: Vec<_> = assistant.favorites().iter().collect();
                if records.is_empty() {
                    println!("∅ No favorites saved yet. Use `ask --save` to keep an answer.");
                } else {
                    println!("{} {} favorite(s)", Icons::STAR, records.len());
                    println!("{}", ui::favorites_table(&records));
                }
            }
            FavoritesAction::Search { query } => {
                let hits = assistant.search_favorites(&query);
                if hits.is_empty() {
                    println!("{} No favorites match '{}'.", Icons::SEARCH, query);
                } else {
                    println!("{} {} match(es) for '{}'", Icons::SEARCH, hits.len(), query);
                    println!("{}", ui::favorites_table(&hits));
                }
            }
            FavoritesAction::Remove { id } => {
                assistant.remove_favorite(&id)?;
                ui::success(&format!("Removed {}", id));
            }
        },

        Commands::Theme { action } => match action {
            ThemeAction::Show => {
                println!("{} {}", theme_icon(assistant.theme()), assistant.theme());
            }
            ThemeAction::Toggle => {
                let mode = assistant.toggle_theme();
                ui::success(&format!("Theme set to {}", mode));
            }
        },

        Commands::Auth { action } => match action {
            AuthAction::Status => {
                if assistant.is_authenticated() {
                    println!("{} Signed-out use enabled.", Icons::PERSON);
                } else {
                    println!("{} Sign-in required (or `auth skip`).", Icons::PERSON);
                }
            }
            AuthAction::Skip => {
                assistant.skip_auth();
                ui::success("Continuing without an account");
            }
            AuthAction::SignOut => {
                assistant.sign_out();
                ui::success("Signed out; favorites and preferences are kept");
            }
        },
    }

    // Drain pending preference writes before exiting
    assistant.flush().await?;
    if assistant.failed_writes() > 0 {
        ui::warn(&format!(
            "{} preference write(s) failed; recent changes may not persist",
            assistant.failed_writes()
        ));
    }

    Ok(())
}

fn theme_icon(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => Icons::SUN,
        ThemeMode::Dark => Icons::MOON,
    }
}

fn resolve_database_path(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(config) = config::load_config(None)? {
        if let Some(database) = config.database {
            return Ok(PathBuf::from(database));
        }
    }
    Ok(config::default_database_path_in(Path::new(".")))
}

fn run_init(database: &Path, force: bool) -> anyhow::Result<()> {
    let config_path = config::default_config_path();
    let config = config::RegimateConfig {
        database: Some(database.display().to_string()),
    };
    config::write_config(&config_path, &config, force)?;
    config::ensure_db_dir(database)?;
    SqliteStore::open(database)?;

    println!("{} Config written to {}", Icons::GEAR, config_path.display());
    println!("{} Database ready at {}", Icons::DATABASE, database.display());
    Ok(())
}
