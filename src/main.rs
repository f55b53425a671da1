use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsite::config::Config;
use docsite::content::{InteractivePrompt, NoPrompt};
use docsite::{ExtractionReport, Extractor};

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Extract Word documents into the site's content store")]
#[command(version)]
struct Cli {
    /// Directory containing the .docx files [default: word-docs]
    input_dir: Option<PathBuf>,

    /// Site root; content is written to <OUTPUT_DIR>/assets [default: .]
    output_dir: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not copy embedded images into the assets directory
    #[arg(long)]
    no_images: bool,

    /// Skip documents whose filename matches no content key instead of asking
    #[arg(long)]
    no_prompt: bool,

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

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(input_dir) = cli.input_dir {
        config.input_dir = input_dir;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if cli.no_images {
        config.extract_images = false;
    }
    if cli.no_prompt {
        config.prompt = false;
    }

    let separator = "=".repeat(60);
    println!("{separator}");
    println!("Word Document Content Extractor");
    println!("{separator}");
    println!();

    let options = config.extract_options();
    let resolver = config.key_resolver();
    let content_path = options.content_path();

    let report = if config.prompt {
        Extractor::new(options, resolver, InteractivePrompt::stdio()).run()
    } else {
        Extractor::new(options, resolver, NoPrompt).run()
    }
    .with_context(|| format!("failed to process '{}'", config.input_dir.display()))?;

    print_summary(&report, &config, &content_path);
    Ok(())
}

fn print_summary(report: &ExtractionReport, config: &Config, content_path: &std::path::Path) {
    let separator = "=".repeat(60);
    println!();

    if report.created_input_dir {
        println!("Created directory: {}", config.input_dir.display());
        println!(
            "Please place your .docx files in '{}', then run docsite again.",
            config.input_dir.display()
        );
    } else if report.processed() == 0 {
        println!(
            "No .docx files found in '{}'",
            config.input_dir.display()
        );
    } else {
        for (name, key) in &report.updated {
            println!("  [OK] {name} -> '{key}'");
        }
        for name in &report.empty {
            println!("  [EMPTY] {name}");
        }
        for name in &report.skipped {
            println!("  [SKIP] {name}");
        }
        for (name, err) in &report.failed {
            println!("  [ERROR] {name}: {err}");
        }
        println!();
        println!(
            "Updated {} article(s), {} empty, {} skipped, {} failed; {} image(s) extracted",
            report.updated.len(),
            report.empty.len(),
            report.skipped.len(),
            report.failed.len(),
            report.images
        );
        if !report.updated.is_empty() {
            println!("Content store: {}", content_path.display());
        }
    }

    println!("{separator}");
    println!("Done!");
    println!("{separator}");
}
