//! Workflow file discovery and parsing
//!
//! Walks the workflows directory in lexicographic order, parses each
//! candidate file, and collects the reusable workflows into a
//! [`WorkflowSet`]. One malformed file must not prevent documenting the
//! rest: parse failures are logged and skipped.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::WfdocError;
use crate::model::build_workflow;
use crate::workflow::WorkflowSet;

/// Load every reusable workflow under `dir`.
///
/// An empty set is a first-class result (the caller short-circuits on
/// it), not an error. The only hard failure is a missing directory.
pub fn load_workflows(dir: &Path) -> Result<WorkflowSet, WfdocError> {
    if !dir.is_dir() {
        return Err(WfdocError::WorkflowsDirMissing {
            dir: dir.display().to_string(),
        });
    }

    let mut set = WorkflowSet::new();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "Skipping unreadable directory entry");
                None
            }
        });

    for entry in walker {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_workflow_file(path) {
            continue;
        }

        let relative = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .display()
            .to_string();

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(file = %relative, error = %err, "Skipping unreadable workflow file");
                continue;
            }
        };

        let doc = match serde_yaml::from_str(&text) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(file = %relative, error = %err, "Skipping malformed workflow file");
                continue;
            }
        };

        match build_workflow(&relative, &doc) {
            Some(workflow) => {
                debug!(file = %relative, name = %workflow.name, "Found reusable workflow");
                set.insert(workflow);
            }
            // no workflow_call trigger: excluded, not an error
            None => debug!(file = %relative, "No workflow_call trigger"),
        }
    }

    Ok(set)
}

fn is_workflow_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml") | Some("yaml")
    )
}
