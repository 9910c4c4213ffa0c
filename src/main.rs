use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod core;
mod model;
mod render;

#[derive(Parser)]
#[command(name = "refdoc")]
#[command(
    author,
    version,
    about = "Static API reference generator - relocatable, cross-linked HTML from a resolved type model"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the documentation site from a type model
    Generate {
        /// Path to the type model JSON file
        model: String,

        /// Output directory for the generated site
        #[arg(short, long, default_value = "./refdoc-output")]
        output: String,

        /// Documentation title shown on every page
        #[arg(long, env = "REFDOC_TITLE")]
        title: Option<String>,

        /// Stylesheet to copy instead of the built-in one ("none" to skip)
        #[arg(long)]
        css: Option<String>,

        /// Script to copy instead of the built-in one ("none" to skip)
        #[arg(long)]
        js: Option<String>,

        /// Stamp pages with the generation date
        #[arg(long)]
        date: bool,

        /// Number of parallel page rendering workers
        #[arg(short, long)]
        parallelism: Option<usize>,
    },

    /// Validate a type model and resolve every documented type without
    /// writing output
    Check {
        /// Path to the type model JSON file
        model: String,
    },

    /// Show current configuration
    Config {
        /// Initialize a new config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Generate {
            model,
            output,
            title,
            css,
            js,
            date,
            parallelism,
        } => {
            commands::generate::run(commands::generate::GenerateArgs {
                model,
                output,
                title,
                css,
                js,
                date,
                parallelism,
            })
            .await?;
        }
        Commands::Check { model } => {
            commands::check::run(commands::check::CheckArgs { model }).await?;
        }
        Commands::Config { init } => {
            commands::config::run(init)?;
        }
    }

    Ok(())
}
