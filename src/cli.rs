// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every option can be given as a flag or picked up from the environment, so
// the tool runs the same way locally and inside a scheduled GitHub Action:
//
//   GITHUB_USERNAME=octocat GITHUB_TOKEN=... tech-stack-badges
//   tech-stack-badges --username octocat --readme profile/README.md --dry-run
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate the parsing code for our types
// - value_parser: Hook our own validation into clap
// =============================================================================

use clap::Parser;

use crate::github::FetchConfig;
use crate::stack::DEFAULT_MIN_PERCENT;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "tech-stack-badges",
    version = "0.1.0",
    about = "Detect the languages across a GitHub user's repos and update the README Tech Stack badges",
    long_about = "tech-stack-badges sums the language byte counts of every public, non-fork repository \
                  owned by a GitHub user, keeps the languages above a minimum share, and rewrites the \
                  <!-- TECH-STACK-START --> ... <!-- TECH-STACK-END --> block of a README with badges."
)]
pub struct Cli {
    /// GitHub user whose public repositories are scanned
    #[arg(long, env = "GITHUB_USERNAME", default_value = "nikomakr")]
    pub username: String,

    /// Personal access token sent as a Bearer token (unauthenticated when empty)
    ///
    /// Unauthenticated requests are subject to much stricter rate limits.
    #[arg(long, env = "GITHUB_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// README file to update in place
    #[arg(long, env = "TECH_STACK_README", default_value = "README.md")]
    pub readme: std::path::PathBuf,

    /// Languages below this share of the total bytes (in percent) are dropped
    #[arg(long, default_value_t = DEFAULT_MIN_PERCENT, value_parser = parse_percent)]
    pub min_percent: f64,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Print the rendered section instead of writing the README
    #[arg(long)]
    pub dry_run: bool,

    /// Print the ranked language report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    // Builds the fetcher configuration from the parsed arguments
    //
    // Returns: FetchConfig, handed to GithubClient::new()
    //
    // An empty (or whitespace-only) token means "no credential", exactly like
    // an unset GITHUB_TOKEN.
    pub fn fetch_config(&self) -> FetchConfig {
        let token = Some(self.token.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        FetchConfig {
            username: self.username.clone(),
            token,
            api_url: self.api_url.clone(),
        }
    }
}

// Validates --min-percent
//
// Parameters:
//   raw: the text given on the command line
//
// Returns: the number if it is finite and between 0 and 100,
//   otherwise a message clap shows next to the flag
fn parse_percent(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;

    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(format!("{} is not a percentage between 0 and 100", value));
    }

    Ok(value)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does env = "GITHUB_TOKEN" do?
//    - If the flag is not given, clap reads the environment variable
//    - The flag still wins when both are present
//    - hide_env_values keeps the token out of --help output
//
// 2. Why parse into f64 with a custom value_parser?
//    - clap would accept "-3" or "NaN" as valid f64 values
//    - Returning Err(String) makes clap print a normal usage error
//
// 3. Why convert Cli into FetchConfig?
//    - The fetcher only sees the values it needs, decided once at startup
//    - Nothing below main reads the environment again
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tech-stack-badges", "--username", "octocat"]).unwrap();
        assert_eq!(cli.username, "octocat");
        assert_eq!(cli.min_percent, 0.5);
        assert!(!cli.dry_run);
        assert!(!cli.json);
    }

    #[test]
    fn test_empty_token_means_unauthenticated() {
        let cli = Cli::try_parse_from(["tech-stack-badges", "--token", "  "]).unwrap();
        assert_eq!(cli.fetch_config().token, None);

        let cli = Cli::try_parse_from(["tech-stack-badges", "--token", "ghp_abc"]).unwrap();
        assert_eq!(cli.fetch_config().token.as_deref(), Some("ghp_abc"));
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("2.5"), Ok(2.5));
        assert_eq!(parse_percent("0"), Ok(0.0));
        assert!(parse_percent("101").is_err());
        assert!(parse_percent("-1").is_err());
        assert!(parse_percent("NaN").is_err());
        assert!(parse_percent("lots").is_err());
    }
}
