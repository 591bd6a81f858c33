//! Journal CLI
//!
//! Command-line front end for the journal:
//! - List entries from the provider
//! - Create an entry
//! - Interactive session with important-entry flags
//! - Local provider server
//! - Default config generation

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use journal::config::{generate_default_config, Config, LoggingConfig};
use journal::journal::{Draft, JournalStore};
use journal::provider::{HttpProvider, MemoryProvider, Provider};
use journal::render::{render_entry, render_journal};
use journal::server::{serve, ServerConfig, ServerState};

#[derive(Parser)]
#[command(name = "journal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A small journal backed by a REST posts endpoint")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Entries endpoint, overrides the config file
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and print all entries
    List,

    /// Create a new entry
    Create {
        /// Entry title
        #[arg(short, long)]
        title: String,
        /// Entry content
        #[arg(short, long)]
        body: String,
    },

    /// Interactive session; important flags last until exit
    Shell,

    /// Serve the entries endpoint locally from memory
    Serve {
        /// Copy the configured provider's entries into the local store first
        #[arg(long)]
        seed: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Config::find_default);
    let mut config = match Config::load_optional(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&Config::from_env().logging);
            tracing::error!("Failed to load config: {}", e);
            return Err(e.into());
        }
    };
    if let Some(url) = cli.url {
        config.provider.url = url;
    }

    init_logging(&config.logging);
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::debug!("Using default config with environment overrides"),
    }

    match cli.command {
        Commands::List => {
            let store = JournalStore::new(http_provider(&config)?);
            store.load().await?;
            print!("{}", render_journal(&store.snapshot().await));
        }

        Commands::Create { title, body } => {
            let draft = Draft::new(title, body);
            draft.validate()?;

            let store = JournalStore::new(http_provider(&config)?);
            let entry = store.create(draft).await?;
            print!("{}", render_entry(&entry, false));
        }

        Commands::Shell => {
            let store = JournalStore::new(http_provider(&config)?);
            run_shell(&store).await?;
        }

        Commands::Serve { seed } => {
            let memory = if seed {
                let remote = http_provider(&config)?;
                let entries = remote
                    .list_entries()
                    .await
                    .with_context(|| format!("failed to seed from {}", config.provider.url))?;
                tracing::info!("Seeded {} entries from {}", entries.len(), remote.name());
                MemoryProvider::with_entries(entries)
            } else {
                MemoryProvider::new()
            };

            let state = ServerState::new(Arc::new(memory));
            let server_config: ServerConfig = (&config.server).into();
            serve(state, &server_config).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber; `RUST_LOG` wins over the config level
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("journal={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn http_provider(config: &Config) -> anyhow::Result<Arc<dyn Provider>> {
    let provider = HttpProvider::new((&config.provider).into())?;
    Ok(Arc::new(provider))
}

const SHELL_HELP: &str = "\
Commands:
  list                 show entries
  refresh              reload entries from the provider
  new                  show/hide the entry form
  title <text>         set the draft title
  body <text>          set the draft content
  submit               create an entry from the draft
  star <id>            toggle the important flag of an entry
  important            list important entry ids
  help                 show this help
  quit                 exit";

async fn run_shell(store: &JournalStore) -> anyhow::Result<()> {
    // Failures are already logged by the store
    let _ = store
        .load_with_progress(|snapshot| print!("{}", render_journal(snapshot)))
        .await;
    print!("{}", render_journal(&store.snapshot().await));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "list" | "ls" => print!("{}", render_journal(&store.snapshot().await)),
            "refresh" => {
                if store.load().await.is_ok() {
                    print!("{}", render_journal(&store.snapshot().await));
                } else {
                    println!("Could not load entries.");
                }
            }
            "new" => {
                let visible = store.toggle_form().await;
                println!("{}", if visible { "Form shown." } else { "Form hidden." });
            }
            "title" | "body" => {
                store.update_draft(command, rest).await?;
            }
            "submit" => {
                if let Err(e) = store.draft().await.validate() {
                    println!("{}", e);
                    continue;
                }
                match store.submit().await {
                    Ok(entry) => print!("{}", render_entry(&entry, false)),
                    Err(_) => println!("Could not create entry."),
                }
            }
            "star" => match rest.parse() {
                Ok(id) => {
                    let important = store.toggle_important(id).await;
                    println!(
                        "Entry {} {}",
                        id,
                        if important { "marked important" } else { "unmarked" }
                    );
                }
                Err(_) => println!("Usage: star <id>"),
            },
            "important" => println!("{:?}", store.important_ids().await),
            "help" => println!("{}", SHELL_HELP),
            "quit" | "exit" => break,
            other => println!("Unknown command `{}`. Type `help`.", other),
        }
    }

    Ok(())
}
