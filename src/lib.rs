//! wfdoc - documentation generator for reusable GitHub Actions workflows

pub mod config;
pub mod error;
pub mod generator;
pub mod github;
pub mod loader;
pub mod markdown;
pub mod model;
pub mod publish;
pub mod workflow;

pub use config::Config;
pub use error::{FixSuggestion, WfdocError};
pub use generator::{run, RunOutcome};
pub use github::{GithubClient, GithubContext};
pub use loader::load_workflows;
pub use publish::{GitPublisher, PublishOutcome, Publisher};
pub use workflow::{InputSpec, OutputSpec, ReusableWorkflow, SecretSpec, WorkflowSet};
