mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gita_build::RecipeVariant;
use gita_core::GitaConfig;

#[derive(Parser)]
#[command(name = "gita", about = "Bhagavad Gita Telugu verse API server and tools")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, short = 'c', global = true, default_value = "gita.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the verse API over HTTP, or HTTPS when a certificate and key are given
    Serve(commands::ServeArgs),
    /// Fetch every verse missing from the database from Gemini
    Populate {
        /// Only this chapter
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=18))]
        chapter: Option<u32>,
        /// Seconds to wait between Gemini calls
        #[arg(long)]
        delay_secs: Option<u64>,
    },
    /// Polish stored verses and add descriptions with Gemini
    Enhance {
        /// Seconds to wait between Gemini calls
        #[arg(long)]
        delay_secs: Option<u64>,
    },
    /// Remove markdown and parenthetical notes from stored text
    Cleanup {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Print a container recipe
    Dockerfile {
        #[arg(long, value_enum, default_value_t = Variant::Toolchain)]
        variant: Variant,
    },
    /// Print the release build-and-publish workflow
    Workflow,
    /// Print the image name published for a release reference
    Image {
        /// Release reference, e.g. refs/tags/v1.2.0
        #[arg(long = "ref")]
        reference: String,
        /// Registry user or organization
        #[arg(long)]
        user: String,
    },
    /// Write both recipes and the release workflow into the current directory
    Eject,
}

/// Container recipe flavor.
#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    /// Installs the OS compiler toolchain before building
    Toolchain,
    /// Builds with what the builder image ships
    Slim,
}

impl From<Variant> for RecipeVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Toolchain => RecipeVariant::Toolchain,
            Variant::Slim => RecipeVariant::Slim,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = GitaConfig::load(&cli.config)?;
    logging::init(&config.logging)?;

    match cli.command {
        Commands::Serve(args) => commands::serve(config, args).await?,
        Commands::Populate {
            chapter,
            delay_secs,
        } => commands::populate(&config, chapter, delay_secs).await?,
        Commands::Enhance { delay_secs } => commands::enhance(&config, delay_secs).await?,
        Commands::Cleanup { yes } => commands::cleanup(&config, yes).await?,
        Commands::Dockerfile { variant } => commands::dockerfile(&config, variant.into()),
        Commands::Workflow => commands::workflow(&config),
        Commands::Image { reference, user } => commands::image(&config, &reference, &user)?,
        Commands::Eject => commands::eject(&config)?,
    }

    Ok(())
}
