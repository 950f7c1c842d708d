// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (and environment) using clap
// 2. Fetch every public repo of the user and its language breakdown
// 3. Sum, filter and rank the languages
// 4. Render the Tech Stack section and splice it into the README
// 5. Exit with proper code (0 = success or nothing to do, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;     // src/cli.rs - command-line parsing
mod github;  // src/github/ - GitHub REST API access
mod readme;  // src/readme/ - rendering and splicing the README section
mod stack;   // src/stack/ - badge table, skip list and ranking

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;

use std::path::Path;

use anyhow::Result;
use readme::SpliceAction;
use stack::LanguageShare;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr; RUST_LOG=debug shows every request
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// The main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse();

    let languages = detect_languages(&cli).await?;

    if languages.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&languages)?);
    }

    if let Some(action) = apply(&languages, &cli.readme, cli.dry_run)? {
        println!(
            "📝 {} tech stack section {} successfully.",
            cli.readme.display(),
            action
        );
    }

    Ok(())
}

// Fetches, sums and ranks the languages across the user's repositories
async fn detect_languages(cli: &Cli) -> Result<Vec<LanguageShare>> {
    let client = github::GithubClient::new(cli.fetch_config())?;

    println!("🔍 Fetching repos for {}...", client.username());
    let repos = client.list_repos().await?;
    println!("   Found {} repos", repos.len());

    let maps = client.repo_language_maps(&repos).await;

    let totals = stack::aggregate(&maps);
    if totals.is_empty() {
        println!("⚠️  No languages detected.");
        return Ok(Vec::new());
    }

    let ranked = stack::rank(&totals, cli.min_percent);
    let names: Vec<&str> = ranked.iter().map(|l| l.name.as_str()).collect();
    println!("✅ Detected languages: {:?}", names);

    Ok(ranked)
}

// Renders the section and splices it into the README
//
// Parameters:
//   languages: ranked languages, largest first
//   path: the README to update
//   dry_run: print the section instead of writing it
//
// Returns: Some(action) when the file went through the splice,
//   None when nothing was written (no languages, or a dry run)
fn apply(languages: &[LanguageShare], path: &Path, dry_run: bool) -> Result<Option<SpliceAction>> {
    if languages.is_empty() {
        return Ok(None);
    }

    let names: Vec<&str> = languages.iter().map(|l| l.name.as_str()).collect();
    let section = readme::render_section(&names);

    if dry_run {
        println!("{}", section);
        return Ok(None);
    }

    Ok(Some(readme::update_file(path, &section)?))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is apply() separate from run()?
//    - run() parses the real command line and talks to the network
//    - apply() only needs data and a path, so tests can call it directly
//
// 2. What is {:#} in the error print?
//    - anyhow's alternate format: the error plus every .context() layer,
//      e.g. "Failed to read README.md: No such file or directory"
// -----------------------------------------------------------------------------
