//! `signature-replay`: drive a signature surface from a JSON script.
//!
//! Prints the last saved data URI to stdout and optionally writes it out as
//! a PNG file.

use anyhow::{Context, Result};
use clap::Parser;
use signature_surface::logging::init_logging;
use signature_surface::replay::{ReplayOptions, ReplayScript, replay};
use signature_surface::settings::{SignatureSettings, default_settings_path};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "signature-replay", about = "Replay a signing session and export the signature")]
struct Cli {
    /// Replay script (JSON)
    script: PathBuf,

    /// File holding a data URI to seed the surface with
    #[arg(long)]
    initial: Option<PathBuf>,

    /// Display only; input and clear/save are ignored
    #[arg(long)]
    read_only: bool,

    #[arg(long)]
    label: Option<String>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the last saved signature as a PNG file
    #[arg(long)]
    png: Option<PathBuf>,

    /// Print per-step timings to stderr
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match cli.settings.as_deref() {
        Some(path) => SignatureSettings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => SignatureSettings::load(),
    };
    init_logging(&settings.log_filter);
    let settings_path = cli.settings.clone().or_else(default_settings_path);
    tracing::debug!(?settings_path, "Settings loaded");

    let script = ReplayScript::load(&cli.script)
        .with_context(|| format!("Failed to read replay script {}", cli.script.display()))?;

    let initial_value = cli
        .initial
        .as_deref()
        .map(|path| {
            fs::read_to_string(path)
                .map(|s| s.trim().to_string())
                .with_context(|| format!("Failed to read initial value {}", path.display()))
        })
        .transpose()?;

    let options = ReplayOptions {
        initial_value,
        read_only: cli.read_only,
        label: cli.label.clone(),
    };
    let outcome = replay(&script, &options, &settings);

    if cli.stats {
        for (step, stats) in &outcome.timings {
            eprintln!(
                "{step:>14}: {:>5} calls, avg {:.3}ms, p95 {:.3}ms, max {:.3}ms",
                stats.count(),
                stats.average(),
                stats.p95(),
                stats.max()
            );
        }
    }

    let Some(saved) = outcome.last_saved() else {
        tracing::info!(has_content = outcome.has_content, "Script finished without saving");
        return Ok(());
    };

    if let Some(path) = cli.png.as_deref() {
        let bytes = saved.png_bytes().context("Saved signature is not valid base64")?;
        fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }

    println!("{saved}");
    Ok(())
}
