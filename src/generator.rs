//! Run orchestration
//!
//! Sequences loader → model → renderer, emits the named outputs, and
//! hands the document to the publisher. The pipeline stages are pure;
//! only the final hand-off performs external I/O.

use std::io::Write;

use tracing::info;

use crate::config::Config;
use crate::error::WfdocError;
use crate::loader::load_workflows;
use crate::markdown::{agenda, render_document};
use crate::publish::{PublishOutcome, Publisher};

/// Outcome of a documentation run.
///
/// "Nothing to document" and "generated" are distinct, and a publish
/// failure is an error (`WfdocError::Publish`) rather than an outcome:
/// callers can tell the three apart.
#[derive(Debug)]
pub enum RunOutcome {
    /// No reusable workflows were discovered; no document was emitted.
    NoWorkflows,
    Generated {
        document: String,
        agenda: String,
        published: Option<PublishOutcome>,
    },
}

/// Run the full pipeline. `publisher` is `None` when VCS side effects
/// are disabled (generate-only mode, or no token in the environment).
pub async fn run(
    config: &Config,
    publisher: Option<&dyn Publisher>,
) -> Result<RunOutcome, WfdocError> {
    let set = load_workflows(&config.workflows_dir)?;
    if set.is_empty() {
        info!("No reusable workflows found");
        return Ok(RunOutcome::NoWorkflows);
    }
    info!(count = set.len(), "Rendering workflow documentation");

    let document = render_document(&set);
    let agenda = agenda(&set);

    // Outputs are emitted before publishing so a publish failure never
    // loses the generated document.
    emit_outputs(&document, &agenda)?;

    let published = match publisher {
        Some(publisher) => Some(
            publisher
                .publish(&document, config)
                .await
                .map_err(WfdocError::Publish)?,
        ),
        None => None,
    };

    Ok(RunOutcome::Generated {
        document,
        agenda,
        published,
    })
}

/// Make the `document` and `agenda` outputs available to the invoking
/// environment: `$GITHUB_OUTPUT` heredoc entries on a runner, stdout
/// otherwise.
fn emit_outputs(document: &str, agenda: &str) -> Result<(), WfdocError> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => {
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            file.write_all(format_output_entry("document", document).as_bytes())?;
            file.write_all(format_output_entry("agenda", agenda).as_bytes())?;
        }
        None => {
            println!("{}", document);
        }
    }
    Ok(())
}

/// One multiline `$GITHUB_OUTPUT` entry in heredoc form. The delimiter
/// embeds the output name so the two entries cannot collide.
fn format_output_entry(name: &str, value: &str) -> String {
    let delimiter = format!("WFDOC_EOF_{}", name);
    format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    struct PushStubPublisher;

    #[async_trait]
    impl Publisher for PushStubPublisher {
        async fn publish(&self, _document: &str, _config: &Config) -> Result<PublishOutcome> {
            Ok(PublishOutcome::Pushed {
                branch: "main".to_string(),
            })
        }
    }

    struct FailingPublisher;

    #[async_trait]
    impl Publisher for FailingPublisher {
        async fn publish(&self, _document: &str, _config: &Config) -> Result<PublishOutcome> {
            Err(anyhow!("remote rejected the push"))
        }
    }

    fn config_for(dir: &Path) -> Config {
        Config {
            workflows_dir: dir.to_path_buf(),
            generate_only: true,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_empty_short_circuit() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("ci.yml"),
            "name: CI\n\"on\":\n  push:\njobs: {}\n",
        )
        .unwrap();

        let outcome = run(&config_for(temp.path()), None).await.unwrap();
        assert!(matches!(outcome, RunOutcome::NoWorkflows));
    }

    #[tokio::test]
    async fn test_end_to_end_two_sections() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("deploy.yml"),
            r#"
name: Deploy
"on":
  workflow_call:
    inputs:
      env:
        required: true
        type: string
    outputs:
      url:
        value: ${{ jobs.deploy.outputs.url }}
"#,
        )
        .unwrap();
        fs::write(
            temp.path().join("lint.yml"),
            "name: Lint\n\"on\":\n  workflow_call:\n",
        )
        .unwrap();

        let outcome = run(&config_for(temp.path()), None).await.unwrap();
        let RunOutcome::Generated {
            document, agenda, ..
        } = outcome
        else {
            panic!("expected a generated document");
        };

        // two sections in discovery order
        let deploy_pos = document.find("## Deploy").unwrap();
        let lint_pos = document.find("## Lint").unwrap();
        assert!(deploy_pos < lint_pos);

        // agenda links both sections
        assert!(agenda.contains("[Deploy](#deploy)"));
        assert!(agenda.contains("[Lint](#lint)"));

        // the trigger-only workflow renders no tables
        let lint_section = &document[lint_pos..];
        assert!(!lint_section.contains("### Inputs"));
        assert!(!lint_section.contains("### Outputs"));
        assert!(!lint_section.contains("### Secrets"));

        // the full workflow renders its declared interface
        assert!(document.contains("| `env` |"));
        assert!(document.contains("| `url` |"));
    }

    #[tokio::test]
    async fn test_publisher_invoked_and_outcome_recorded() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("deploy.yml"),
            "name: Deploy\n\"on\":\n  workflow_call:\n",
        )
        .unwrap();

        let outcome = run(&config_for(temp.path()), Some(&PushStubPublisher))
            .await
            .unwrap();
        let RunOutcome::Generated { published, .. } = outcome else {
            panic!("expected a generated document");
        };
        assert!(matches!(published, Some(PublishOutcome::Pushed { .. })));
    }

    #[tokio::test]
    async fn test_publish_failure_is_distinct_from_empty() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("deploy.yml"),
            "name: Deploy\n\"on\":\n  workflow_call:\n",
        )
        .unwrap();

        let err = run(&config_for(temp.path()), Some(&FailingPublisher))
            .await
            .unwrap_err();
        assert!(matches!(err, WfdocError::Publish(_)));
    }

    #[test]
    fn test_output_entry_heredoc_format() {
        let entry = format_output_entry("agenda", "## Workflows\n\n- [A](#a)");
        assert_eq!(
            entry,
            "agenda<<WFDOC_EOF_agenda\n## Workflows\n\n- [A](#a)\nWFDOC_EOF_agenda\n"
        );
    }
}
