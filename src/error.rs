//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum WfdocError {
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workflows directory '{dir}' not found")]
    WorkflowsDirMissing { dir: String },

    #[error("Missing GitHub context: {missing}")]
    MissingContext { missing: String },

    #[error("Git command failed: {command}: {details}")]
    Git { command: String, details: String },

    #[error("Failed to create pull request: {details}")]
    PullRequest { details: String },

    #[error("Publishing failed after generation: {0}")]
    Publish(anyhow::Error),
}

impl FixSuggestion for WfdocError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            WfdocError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            WfdocError::Io(_) => Some("Check file path and permissions"),
            WfdocError::WorkflowsDirMissing { .. } => {
                Some("Pass --workflows-dir or run from the repository root")
            }
            WfdocError::MissingContext { .. } => {
                Some("Set GITHUB_REPOSITORY and GITHUB_REF (provided automatically on runners)")
            }
            WfdocError::Git { .. } => {
                Some("Ensure the working tree is a git checkout with write access")
            }
            WfdocError::PullRequest { .. } => {
                Some("Check GITHUB_TOKEN has pull-request write permission")
            }
            WfdocError::Publish(_) => {
                Some("The document was generated; re-run publishing once the cause is fixed")
            }
        }
    }
}
