//! Run configuration
//!
//! Built once at the CLI boundary and passed by reference into the
//! pipeline. Nothing below this layer reads the environment for
//! configuration.

use std::path::PathBuf;

/// Configuration for a documentation run.
///
/// Mirrors the action inputs: `overwrite`, `document-path`,
/// `generate-only`, `github-base-url`, `make-pull-request`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Replace the existing document instead of appending to it
    pub overwrite: bool,
    /// Target path for the rendered document
    pub document_path: PathBuf,
    /// Skip all VCS side effects (write/commit/push/PR)
    pub generate_only: bool,
    /// GitHub API endpoint override (for GHES)
    pub github_base_url: Option<String>,
    /// Open a pull request instead of pushing to the head branch
    pub make_pull_request: bool,
    /// Directory scanned for workflow definition files
    pub workflows_dir: PathBuf,
}

impl Config {
    pub fn api_base_url(&self) -> &str {
        self.github_base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or("https://api.github.com")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            overwrite: false,
            document_path: PathBuf::from("WORKFLOWS.md"),
            generate_only: false,
            github_base_url: None,
            make_pull_request: false,
            workflows_dir: PathBuf::from(".github/workflows"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url_default() {
        let config = Config::default();
        assert_eq!(config.api_base_url(), "https://api.github.com");
    }

    #[test]
    fn test_api_base_url_override() {
        let config = Config {
            github_base_url: Some("https://ghe.example.com/api/v3".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_base_url(), "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_api_base_url_empty_override_falls_back() {
        let config = Config {
            github_base_url: Some(String::new()),
            ..Config::default()
        };
        assert_eq!(config.api_base_url(), "https://api.github.com");
    }
}
