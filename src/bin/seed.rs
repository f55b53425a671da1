use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsite::seed::seed_directory;

#[derive(Parser)]
#[command(name = "docsite-seed")]
#[command(about = "Create Word documents from the site's HTML pages")]
#[command(version)]
struct Cli {
    /// Directory containing the HTML pages
    #[arg(default_value = ".")]
    html_dir: PathBuf,

    /// Directory the .docx files are written to
    #[arg(default_value = "word-docs")]
    docs_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "docsite=debug"
    } else {
        "docsite=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let separator = "=".repeat(60);
    println!("{separator}");
    println!("Creating Word Documents from HTML Files");
    println!("{separator}");
    println!();

    let report = seed_directory(&cli.html_dir, &cli.docs_dir)
        .with_context(|| format!("failed to seed from '{}'", cli.html_dir.display()))?;

    for path in &report.created {
        println!("[OK] Created: {}", path.display());
    }
    for (name, err) in &report.failed {
        println!("[ERROR] Error processing {name}: {err}");
    }
    if report.created.is_empty() && report.failed.is_empty() {
        println!("No HTML pages found in '{}'", cli.html_dir.display());
    }

    println!();
    println!("{separator}");
    println!(
        "Done! Word documents created in '{}'",
        cli.docs_dir.display()
    );
    println!("{separator}");
    Ok(())
}
