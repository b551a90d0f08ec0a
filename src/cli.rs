//! Command-line entry points.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use ti_core::{GalleryKind, GalleryListing, LocalImageHandle, PipelineOutcome};

use crate::adapters::ConsoleEventPort;
use crate::bootstrap::{default_config_path, resolve_config, wire_app};

/// Virtual try-on client.
#[derive(Parser, Debug)]
#[command(name = "tryiton")]
#[command(about = "Upload a person and a garment photo, get a try-on image and a 3D model")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, env = "TRYITON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration file
    #[arg(long, global = true, env = "TRYITON_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the full pipeline on two local images
    Run {
        /// Photo of the person
        #[arg(long)]
        person: PathBuf,
        /// Photo of the garment
        #[arg(long)]
        cloth: PathBuf,
    },
    /// List uploaded originals
    Uploads,
    /// List try-on results
    Edits,
    /// List reconstructed 3D models
    Models,
}

/// Execute the parsed command.
///
/// `run` exits with 0 on `Done` and 1 when the run failed or was rejected.
pub async fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let default_path = default_config_path();
    let config = resolve_config(
        cli.config.as_deref(),
        default_path.as_deref(),
        cli.base_url.as_deref(),
    )?;
    let app = wire_app(&config, Arc::new(ConsoleEventPort::stdout()))?;

    match cli.command {
        Command::Run { person, cloth } => {
            let result = app
                .orchestrator
                .run_try_on(
                    LocalImageHandle::from(person.as_path()),
                    LocalImageHandle::from(cloth.as_path()),
                )
                .await;
            // The outcome was already printed through the event port.
            Ok(match result {
                Ok(PipelineOutcome::Done(model)) => {
                    info!(mesh_url = %model.mesh_url, "run completed");
                    ExitCode::SUCCESS
                }
                Ok(PipelineOutcome::Failed { .. }) | Err(_) => ExitCode::from(1),
            })
        }
        Command::Uploads => list(&app.gallery, GalleryKind::Uploads).await,
        Command::Edits => list(&app.gallery, GalleryKind::Edits).await,
        Command::Models => list(&app.gallery, GalleryKind::Models).await,
    }
}

async fn list(gallery: &ti_app::ListGallery, kind: GalleryKind) -> anyhow::Result<ExitCode> {
    match gallery.execute(kind).await {
        Ok(listing) => {
            for line in listing_lines(&listing) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("Could not load {kind}: {}", err.user_message());
            Ok(ExitCode::from(1))
        }
    }
}

/// One tab-separated line per record; absent optional columns print as `-`.
pub fn listing_lines(listing: &GalleryListing) -> Vec<String> {
    fn or_dash(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("-")
    }

    match listing {
        GalleryListing::Uploads(records) => records
            .iter()
            .map(|r| format!("{}\t{}\t{}", r.id, r.image_url, or_dash(&r.created_at)))
            .collect(),
        GalleryListing::Edits(records) => records
            .iter()
            .map(|r| {
                format!(
                    "{}\t{}\t{}\t{}",
                    r.id,
                    r.edited_url,
                    or_dash(&r.source_url),
                    or_dash(&r.created_at)
                )
            })
            .collect(),
        GalleryListing::Models(records) => records
            .iter()
            .map(|r| {
                format!(
                    "{}\t{}\t{}\t{}",
                    r.id,
                    r.mesh_url,
                    r.image_url,
                    or_dash(&r.preview_url)
                )
            })
            .collect(),
    }
}
