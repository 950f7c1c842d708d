// src/github/fetch.rs
// =============================================================================
// This module fetches repositories and their language statistics from the
// GitHub REST API.
//
// Endpoints used:
// - GET /users/{user}/repos?per_page=100&page={n}&type=owner
// - GET /repos/{user}/{repo}/languages
//
// Failure policy:
// - Listing repositories: any transport error or non-2xx status is fatal
// - Languages of one repo: any failure is treated as "no languages"
//
// Rust concepts:
// - async functions: For network I/O
// - serde: To decode the JSON responses into our own structs
// - Option: For the credential that may or may not be configured
// =============================================================================

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

// Repositories requested per page (the API maximum)
const PAGE_SIZE: u32 = 100;

// GitHub rejects API requests without a User-Agent
const USER_AGENT: &str = concat!("tech-stack-badges/", env!("CARGO_PKG_VERSION"));

const ACCEPT: &str = "application/vnd.github+json";

/// Language name -> number of bytes of code in that language.
pub type LanguageBytes = HashMap<String, u64>;

/// Everything the fetcher needs to know, decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Owner of the repositories to scan
    pub username: String,
    /// Optional personal access token, sent as `Authorization: Bearer ...`
    pub token: Option<String>,
    /// Base URL of the API, e.g. `https://api.github.com`
    pub api_url: String,
}

/// The fields we need from a repository listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub fork: bool,
}

/// A thin client over the two endpoints we use.
///
/// One `reqwest::Client` is kept for the whole run so connections are reused.
pub struct GithubClient {
    client: Client,
    config: FetchConfig,
    base: Url,
}

impl GithubClient {
    pub fn new(config: FetchConfig) -> Result<Self> {
        // Make sure the base ends with '/' so joining keeps any path prefix
        let mut base = config.api_url.trim_end_matches('/').to_string();
        base.push('/');
        let base = Url::parse(&base)
            .map_err(|e| anyhow!("Invalid API URL '{}': {}", config.api_url, e))?;

        if base.cannot_be_a_base() {
            return Err(anyhow!("Invalid API URL '{}': not a base URL", config.api_url));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config, base })
    }

    pub fn username(&self) -> &str {
        &self.config.username
    }

    // Lists every repository owned by the configured user
    //
    // Returns: Result<Vec<Repository>>
    //   Success: every repo across all pages, in API order
    //   Error: transport failure, non-2xx status or an unreadable page
    //
    // Pages are requested from 1 upwards until a page comes back empty.
    // There is no partial result: one bad page fails the whole listing.
    pub async fn list_repos(&self) -> Result<Vec<Repository>> {
        let mut repos = Vec::new();
        let mut page = 1u32;

        loop {
            let url = self.repos_url(page)?;
            debug!(%url, page, "listing repositories");

            let response = self
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("Failed to list repositories (page {})", page))?;

            let status = response.status();
            if !status.is_success() {
                return Err(anyhow!(
                    "Failed to list repositories for {}: HTTP {} from {}",
                    self.config.username,
                    status,
                    url
                ));
            }

            let batch: Vec<Repository> = response
                .json()
                .await
                .with_context(|| format!("Invalid repository listing (page {})", page))?;

            if batch.is_empty() {
                break;
            }

            repos.extend(batch);
            page += 1;
        }

        info!(count = repos.len(), pages = page, "repository listing complete");
        Ok(repos)
    }

    // Fetches the language breakdown of one repository
    //
    // Parameters:
    //   repo: repository name (owner is the configured user)
    //
    // Returns: language -> bytes, or an empty map on any failure
    //   (non-200 status, network error, body that isn't a JSON object)
    pub async fn repo_languages(&self, repo: &str) -> LanguageBytes {
        match self.try_repo_languages(repo).await {
            Ok(languages) => languages,
            Err(e) => {
                debug!(repo, error = %e, "no languages for repository");
                LanguageBytes::new()
            }
        }
    }

    async fn try_repo_languages(&self, repo: &str) -> Result<LanguageBytes> {
        let url = self.languages_url(repo)?;
        let response = self.get(url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(anyhow!("HTTP {}", status));
        }

        Ok(response.json().await?)
    }

    // Fetches the language breakdown of every non-fork repository
    //
    // Parameters:
    //   repos: the listing returned by list_repos()
    //
    // Returns: one map per non-fork repo, in listing order
    //
    // Forks are skipped so upstream code is not counted as the user's own.
    // One request per repo, sent one after another.
    pub async fn repo_language_maps(&self, repos: &[Repository]) -> Vec<LanguageBytes> {
        let mut maps = Vec::new();
        for repo in repos.iter().filter(|r| !r.fork) {
            maps.push(self.repo_languages(&repo.name).await);
        }
        maps
    }

    // Builds a GET request with the headers every call needs
    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.client.get(url).header(header::ACCEPT, ACCEPT);

        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn repos_url(&self, page: u32) -> Result<Url> {
        let mut url = self.endpoint(&["users", self.config.username.as_str(), "repos"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &PAGE_SIZE.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("type", "owner");
        Ok(url)
    }

    fn languages_url(&self, repo: &str) -> Result<Url> {
        self.endpoint(&["repos", self.config.username.as_str(), repo, "languages"])
    }

    // Appends percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API URL cannot take a path: {}", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does list_repos return Result but repo_languages doesn't?
//    - Without the listing there is nothing to count, so it aborts the run
//    - A single repo failing only makes the totals a little smaller
//    - Making repo_languages infallible keeps the caller's loop simple
//
// 2. Why build URLs with the url crate instead of format!?
//    - Repo names go into the path and must be percent-encoded
//    - path_segments_mut() keeps any prefix of --api-url (GitHub Enterprise
//      lives under /api/v3)
//
// 3. What does bearer_auth() do?
//    - Sets "Authorization: Bearer <token>" and marks the header sensitive
//      so it is not printed in debug output
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // A canned answer for one request path (path includes the query string)
    type Route = (String, u16, String);

    // Starts a tiny HTTP/1.1 server on 127.0.0.1 that answers from `routes`
    // (unknown paths get a 404) and records every request head it receives.
    async fn stub_server(routes: Vec<Route>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&head).to_string();
                let path = head.split_whitespace().nth(1).unwrap_or("").to_string();
                log.lock().unwrap().push(head);

                let (status, body) = routes
                    .iter()
                    .find(|(p, _, _)| *p == path)
                    .map(|(_, s, b)| (*s, b.clone()))
                    .unwrap_or((404, r#"{"message":"Not Found"}"#.to_string()));

                let response = format!(
                    "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), seen)
    }

    fn config(api_url: &str, token: Option<&str>) -> FetchConfig {
        FetchConfig {
            username: "octocat".to_string(),
            token: token.map(str::to_string),
            api_url: api_url.to_string(),
        }
    }

    fn page(n: u32) -> String {
        format!("/users/octocat/repos?per_page=100&page={}&type=owner", n)
    }

    #[test]
    fn test_repos_url() {
        let client = GithubClient::new(config("https://api.github.com", None)).unwrap();
        assert_eq!(
            client.repos_url(3).unwrap().as_str(),
            "https://api.github.com/users/octocat/repos?per_page=100&page=3&type=owner"
        );
    }

    #[test]
    fn test_languages_url_keeps_prefix_and_encodes_name() {
        let client = GithubClient::new(config("https://ghe.example.com/api/v3/", None)).unwrap();
        assert_eq!(
            client.languages_url("my repo").unwrap().as_str(),
            "https://ghe.example.com/api/v3/repos/octocat/my%20repo/languages"
        );
    }

    #[test]
    fn test_invalid_api_url() {
        assert!(GithubClient::new(config("not a url", None)).is_err());
    }

    #[test]
    fn test_repository_without_fork_flag() {
        let repo: Repository = serde_json::from_str(r#"{"name":"dotfiles"}"#).unwrap();
        assert!(!repo.fork);
    }

    #[tokio::test]
    async fn test_list_repos_paginates_until_empty_page() {
        let (url, seen) = stub_server(vec![
            (page(1), 200, r#"[{"name":"a","fork":false},{"name":"b","fork":true}]"#.to_string()),
            (page(2), 200, r#"[{"name":"c","fork":false}]"#.to_string()),
            (page(3), 200, "[]".to_string()),
        ])
        .await;

        let client = GithubClient::new(config(&url, None)).unwrap();
        let repos = client.list_repos().await.unwrap();

        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_repos_failure_is_fatal() {
        let (url, _) = stub_server(vec![
            (page(1), 200, r#"[{"name":"a","fork":false}]"#.to_string()),
            (page(2), 403, r#"{"message":"API rate limit exceeded"}"#.to_string()),
        ])
        .await;

        let client = GithubClient::new(config(&url, None)).unwrap();
        let err = client.list_repos().await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_repo_languages_failure_is_empty() {
        let (url, _) = stub_server(vec![
            ("/repos/octocat/ok/languages".to_string(), 200, r#"{"Rust":1200,"Shell":30}"#.to_string()),
            ("/repos/octocat/broken/languages".to_string(), 500, "oops".to_string()),
            ("/repos/octocat/garbled/languages".to_string(), 200, "not json".to_string()),
        ])
        .await;

        let client = GithubClient::new(config(&url, None)).unwrap();

        let ok = client.repo_languages("ok").await;
        assert_eq!(ok.get("Rust"), Some(&1200));
        assert_eq!(ok.get("Shell"), Some(&30));

        assert!(client.repo_languages("broken").await.is_empty());
        assert!(client.repo_languages("garbled").await.is_empty());
        assert!(client.repo_languages("missing").await.is_empty());
    }

    #[tokio::test]
    async fn test_repo_language_maps_skips_forks() {
        let (url, seen) = stub_server(vec![
            (page(1), 200, r#"[{"name":"mine","fork":false},{"name":"theirs","fork":true}]"#.to_string()),
            (page(2), 200, "[]".to_string()),
            ("/repos/octocat/mine/languages".to_string(), 200, r#"{"Go":10}"#.to_string()),
            ("/repos/octocat/theirs/languages".to_string(), 200, r#"{"Java":99}"#.to_string()),
        ])
        .await;

        let client = GithubClient::new(config(&url, None)).unwrap();
        let repos = client.list_repos().await.unwrap();
        let maps = client.repo_language_maps(&repos).await;

        assert_eq!(repos.len(), 2);
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].get("Go"), Some(&10));
        assert!(!seen.lock().unwrap().iter().any(|h| h.contains("/theirs/")));
    }

    #[tokio::test]
    async fn test_headers() {
        let (url, seen) = stub_server(vec![(page(1), 200, "[]".to_string())]).await;

        let client = GithubClient::new(config(&url, Some("ghp_secret"))).unwrap();
        client.list_repos().await.unwrap();

        let anonymous = GithubClient::new(config(&url, None)).unwrap();
        anonymous.list_repos().await.unwrap();

        let seen = seen.lock().unwrap();
        let authed = seen[0].to_lowercase();
        assert!(authed.contains("authorization: bearer ghp_secret"));
        assert!(authed.contains("accept: application/vnd.github+json"));
        assert!(authed.contains("user-agent: tech-stack-badges/"));
        assert!(!seen[1].to_lowercase().contains("authorization:"));
    }
}
