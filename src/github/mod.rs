// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - Listing every repository a user owns (100 per page until an empty page)
// - Fetching the language -> bytes breakdown of a single repository
//
// A failed listing aborts the run; a failed language lookup only loses that
// one repository's contribution.
// =============================================================================

mod fetch;

// Re-export the public API from fetch.rs
pub use fetch::{FetchConfig, GithubClient};
