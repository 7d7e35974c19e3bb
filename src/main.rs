//! CLI entry point for crewpost

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crewpost::commands;
use crewpost::commands::render::OutputFormat;
use crewpost::server;
use crewpost::Crewpost;

#[derive(Parser)]
#[command(name = "crewpost")]
#[command(version)]
#[command(about = "Static article generator for block-structured training blogs", long_about = None)]
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

        /// Slug for the new article (derived from the title by default)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Validate every article without writing output
    Check,

    /// List articles
    List {
        /// Only list articles in this category
        #[arg(long)]
        category: Option<String>,

        /// List categories with article counts instead
        #[arg(long, conflicts_with = "category")]
        categories: bool,
    },

    /// Print one composed article
    Render {
        /// Slug of the article
        slug: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "crewpost=debug,info"
    } else {
        "crewpost=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, slug } => {
            let crewpost = Crewpost::new(&base_dir)?;
            tracing::info!("Creating new article: {}", title);
            commands::new::create_article(&crewpost, &title, slug.as_deref())?;
        }

        Commands::Generate { watch } => {
            let crewpost = Crewpost::new(&base_dir)?;
            tracing::info!("Generating static files...");

            crewpost.generate()?;
            println!("Generated successfully!");

            if watch {
                tokio::task::spawn_blocking(move || commands::generate::watch(&crewpost, || {}))
                    .await??;
            }
        }

        Commands::Check => {
            let crewpost = Crewpost::new(&base_dir)?;
            commands::check::run(&crewpost)?;
        }

        Commands::List {
            category,
            categories,
        } => {
            let crewpost = Crewpost::new(&base_dir)?;
            if categories {
                commands::list::categories(&crewpost)?;
            } else {
                commands::list::run(&crewpost, category.as_deref())?;
            }
        }

        Commands::Render { slug, format } => {
            let crewpost = Crewpost::new(&base_dir)?;
            commands::render::run(&crewpost, &slug, format)?;
        }

        Commands::Server { port, ip, r#static } => {
            let crewpost = Crewpost::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            crewpost.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            server::start(&crewpost, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let crewpost = Crewpost::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            crewpost.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("crewpost version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
