//! GitHub runner context and REST client
//!
//! The context is read once from the standard `GITHUB_*` environment
//! variables at the boundary; nothing deeper in the pipeline touches the
//! environment.

use serde::Deserialize;
use serde_json::json;

use crate::error::WfdocError;

/// Repository and branch context of the invoking runner.
#[derive(Debug, Clone)]
pub struct GithubContext {
    pub token: String,
    pub owner: String,
    pub repo: String,
    /// Branch the run is on (commit/push target)
    pub head_branch: String,
    /// PR base branch when on a pull_request event, default branch otherwise
    pub base_branch: String,
}

impl GithubContext {
    /// Build the context from the runner environment. Returns `None`
    /// when no token is present (publishing is skipped in that case).
    pub fn from_env() -> Result<Option<Self>, WfdocError> {
        let Ok(token) = std::env::var("GITHUB_TOKEN") else {
            return Ok(None);
        };
        if token.is_empty() {
            return Ok(None);
        }

        let repository = std::env::var("GITHUB_REPOSITORY").map_err(|_| {
            WfdocError::MissingContext {
                missing: "GITHUB_REPOSITORY".to_string(),
            }
        })?;
        let (owner, repo) = repository
            .split_once('/')
            .ok_or_else(|| WfdocError::MissingContext {
                missing: format!("owner/repo in GITHUB_REPOSITORY ('{}')", repository),
            })?;

        let head_branch = std::env::var("GITHUB_REF")
            .map(|r| r.trim_start_matches("refs/heads/").to_string())
            .map_err(|_| WfdocError::MissingContext {
                missing: "GITHUB_REF".to_string(),
            })?;

        // GITHUB_BASE_REF is only set on pull_request events
        let base_branch = std::env::var("GITHUB_BASE_REF")
            .ok()
            .filter(|b| !b.is_empty())
            .or_else(|| std::env::var("GITHUB_DEFAULT_BRANCH").ok())
            .unwrap_or_else(|| "main".to_string());

        Ok(Some(GithubContext {
            token,
            owner: owner.to_string(),
            repo: repo.to_string(),
            head_branch,
            base_branch,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    number: u64,
    html_url: String,
}

/// Minimal GitHub REST client (pull request creation only).
pub struct GithubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(base_url: &str) -> Self {
        GithubClient {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Open a pull request from the head branch into the base branch.
    pub async fn create_pull_request(
        &self,
        context: &GithubContext,
        title: &str,
        body: &str,
    ) -> Result<u64, WfdocError> {
        let url = format!(
            "{}/repos/{}/{}/pulls",
            self.base_url, context.owner, context.repo
        );
        let payload = json!({
            "title": title,
            "body": body,
            "head": context.head_branch,
            "base": context.base_branch,
        });

        tracing::debug!(
            url = %url,
            head = %context.head_branch,
            base = %context.base_branch,
            "Creating pull request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", context.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "wfdoc")
            .json(&payload)
            .send()
            .await
            .map_err(|err| WfdocError::PullRequest {
                details: err.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                error = %error_text,
                "GitHub API error"
            );
            return Err(WfdocError::PullRequest {
                details: format!("GitHub API error ({}): {}", status, error_text),
            });
        }

        let pr: PullRequestResponse =
            response
                .json()
                .await
                .map_err(|err| WfdocError::PullRequest {
                    details: format!("Failed to parse GitHub API response: {}", err),
                })?;

        tracing::info!(number = pr.number, url = %pr.html_url, "Pull request created");
        Ok(pr.number)
    }
}
