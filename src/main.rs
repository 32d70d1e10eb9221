//! CLI entry point for poststore

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poststore::commands::show::ShowMode;

#[derive(Parser)]
#[command(name = "poststore")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "Load, inspect and serve Markdown blog articles", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// Layout to use (defaults to the site's default_layout)
        #[arg(short, long)]
        layout: Option<String>,

        /// Publication date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// List articles by publication date
    #[command(alias = "ls")]
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one article by identifier (YYYY-MM-DD-slug)
    Show {
        id: String,

        /// Print only the teaser
        #[arg(short, long, conflicts_with = "json")]
        excerpt: bool,

        /// Print JSON including the block structure
        #[arg(long)]
        json: bool,
    },

    /// Report duplicate titles, separator misuse and other inconsistencies
    Check,

    /// Serve the articles as a JSON API
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Reload articles when files change
        #[arg(short, long)]
        watch: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "poststore=debug,info"
    } else {
        "poststore=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            poststore::commands::init::init_site(&target_dir, today)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New {
            title,
            layout,
            date,
        } => {
            let site = poststore::Site::new(&base_dir)?;
            tracing::info!("Creating new article with title: {}", title);
            let path = poststore::commands::new::create_article(
                &site,
                &title,
                layout.as_deref(),
                date.unwrap_or(today),
            )?;
            println!("Created: {:?}", path);
        }

        Commands::List { json } => {
            let site = poststore::Site::new(&base_dir)?;
            poststore::commands::list::run(&site, json)?;
        }

        Commands::Show { id, excerpt, json } => {
            let site = poststore::Site::new(&base_dir)?;
            let mode = if json {
                ShowMode::Json
            } else if excerpt {
                ShowMode::Excerpt
            } else {
                ShowMode::Full
            };
            poststore::commands::show::run(&site, &id, mode)?;
        }

        Commands::Check => {
            let site = poststore::Site::new(&base_dir)?;
            poststore::commands::check::run(&site)?;
        }

        Commands::Serve { port, ip, watch } => {
            let site = poststore::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            poststore::server::start(&site, &ip, port, watch).await?;
        }

        Commands::Version => {
            println!("poststore version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
