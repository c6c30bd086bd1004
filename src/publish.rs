//! Document publishing
//!
//! All VCS side effects live behind the [`Publisher`] trait so the
//! deterministic core (loader, model, renderer) is testable with zero
//! I/O. The git publisher writes the document, commits it, and either
//! pushes the head branch or opens a pull request.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::WfdocError;
use crate::github::{GithubClient, GithubContext};
use crate::markdown::replace_between_markers;

pub const COMMIT_MESSAGE: &str = "Update reusable workflows document";
pub const PULL_REQUEST_TITLE: &str = "📝 Reusable Workflows Document";

const GIT_USER_NAME: &str = "GitHub Action Documentator";
const GIT_USER_EMAIL: &str = "github-action.com";

/// How the document left the machine.
#[derive(Debug)]
pub enum PublishOutcome {
    /// Committed and pushed to the head branch
    Pushed { branch: String },
    /// Committed and opened as a pull request
    PullRequestOpened { number: u64 },
    /// The generated document matched what was already committed
    NoChanges,
}

/// Narrow side-effect seam: hand the rendered document off to the
/// outside world.
#[async_trait]
pub trait Publisher {
    async fn publish(&self, document: &str, config: &Config) -> Result<PublishOutcome>;
}

/// Publishes via the local git checkout and the GitHub REST API.
pub struct GitPublisher {
    context: GithubContext,
}

impl GitPublisher {
    pub fn new(context: GithubContext) -> Self {
        GitPublisher { context }
    }
}

#[async_trait]
impl Publisher for GitPublisher {
    async fn publish(&self, document: &str, config: &Config) -> Result<PublishOutcome> {
        write_document(&config.document_path, document, config.overwrite)?;

        if !has_changes(&config.document_path).await? {
            info!("Document unchanged, nothing to publish");
            return Ok(PublishOutcome::NoChanges);
        }

        let document_path = config.document_path.display().to_string();
        git(&["config", "user.name", GIT_USER_NAME]).await?;
        git(&["config", "user.email", GIT_USER_EMAIL]).await?;
        git(&["add", document_path.as_str()]).await?;
        git(&["commit", "-m", COMMIT_MESSAGE]).await?;

        if config.make_pull_request {
            let client = GithubClient::new(config.api_base_url());
            let number = client
                .create_pull_request(&self.context, PULL_REQUEST_TITLE, document)
                .await?;
            Ok(PublishOutcome::PullRequestOpened { number })
        } else {
            git(&["push", "origin", self.context.head_branch.as_str()]).await?;
            info!(branch = %self.context.head_branch, "Pushed document");
            Ok(PublishOutcome::Pushed {
                branch: self.context.head_branch.clone(),
            })
        }
    }
}

/// Write the rendered document to its target path.
///
/// Overwrite mode replaces only the marker-delimited region when the
/// existing file carries the sentinel pair, preserving surrounding
/// content; otherwise it replaces the whole file. Append mode appends.
pub fn write_document(path: &Path, document: &str, overwrite: bool) -> Result<(), WfdocError> {
    if overwrite {
        match std::fs::read_to_string(path) {
            Ok(existing) => {
                if let Some(spliced) = replace_between_markers(&existing, document) {
                    std::fs::write(path, spliced)?;
                } else {
                    std::fs::write(path, document)?;
                }
            }
            Err(_) => std::fs::write(path, document)?,
        }
    } else {
        let mut merged = match std::fs::read_to_string(path) {
            Ok(existing) if !existing.is_empty() => {
                let mut merged = existing;
                if !merged.ends_with('\n') {
                    merged.push('\n');
                }
                merged
            }
            _ => String::new(),
        };
        merged.push_str(document);
        std::fs::write(path, merged)?;
    }
    Ok(())
}

async fn has_changes(path: &Path) -> Result<bool, WfdocError> {
    let output = Command::new("git")
        .args(["status", "--porcelain", "--"])
        .arg(path)
        .output()
        .await
        .map_err(|err| WfdocError::Git {
            command: "git status".to_string(),
            details: err.to_string(),
        })?;
    Ok(!output.stdout.is_empty())
}

async fn git(args: &[&str]) -> Result<(), WfdocError> {
    let output = Command::new("git")
        .args(args)
        .output()
        .await
        .map_err(|err| WfdocError::Git {
            command: format!("git {}", args.join(" ")),
            details: err.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(command = %args.join(" "), stderr = %stderr, "git command failed");
        return Err(WfdocError::Git {
            command: format!("git {}", args.join(" ")),
            details: stderr.trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{ANCHOR_BEGIN, ANCHOR_END};
    use tempfile::tempdir;

    #[test]
    fn test_write_document_overwrite_new_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("WORKFLOWS.md");
        write_document(&path, "doc body\n", true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "doc body\n");
    }

    #[test]
    fn test_write_document_overwrite_whole_file_without_markers() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("WORKFLOWS.md");
        std::fs::write(&path, "stale hand-written content\n").unwrap();
        write_document(&path, "doc body\n", true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "doc body\n");
    }

    #[test]
    fn test_write_document_overwrite_splices_marked_region() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("README.md");
        std::fs::write(
            &path,
            format!(
                "# Repo\n\n{}\nold generated\n{}\n\nfooter\n",
                ANCHOR_BEGIN, ANCHOR_END
            ),
        )
        .unwrap();

        let generated = format!("{}\nnew generated\n{}\n", ANCHOR_BEGIN, ANCHOR_END);
        write_document(&path, &generated, true).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Repo\n\n"));
        assert!(written.ends_with("\n\nfooter\n"));
        assert!(written.contains("new generated"));
        assert!(!written.contains("old generated"));
    }

    #[test]
    fn test_write_document_append() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("WORKFLOWS.md");
        std::fs::write(&path, "existing notes").unwrap();
        write_document(&path, "doc body\n", false).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "existing notes\ndoc body\n"
        );
    }

    #[test]
    fn test_write_document_append_to_missing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("WORKFLOWS.md");
        write_document(&path, "doc body\n", false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "doc body\n");
    }
}
