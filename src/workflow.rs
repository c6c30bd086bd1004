//! Reusable workflow data model
//!
//! The canonical records extracted from workflow files, plus the
//! discovery-ordered set shared between the model builder and the
//! renderer. Built once per run, read-only downstream.

use tracing::warn;

/// A declared `workflow_call` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub name: String,
    pub description: String,
    pub input_type: String,
    pub required: bool,
    pub default: Option<String>,
}

/// A declared `workflow_call` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub name: String,
    pub description: String,
    pub value: String,
}

/// A declared `workflow_call` secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSpec {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// One reusable workflow: its identity plus the interface it declares.
///
/// `inputs`/`outputs`/`secrets` preserve source declaration order.
#[derive(Debug, Clone)]
pub struct ReusableWorkflow {
    /// Declared `name:` or the file stem when absent; unique within a run
    pub name: String,
    /// Path relative to the scanned directory, for traceability in the doc
    pub source_path: String,
    pub description: Option<String>,
    pub inputs: Vec<InputSpec>,
    pub outputs: Vec<OutputSpec>,
    pub secrets: Vec<SecretSpec>,
}

/// Discovery-ordered collection of reusable workflows, keyed by name.
///
/// On a name collision the later-discovered workflow wins (its content
/// replaces the earlier entry, which keeps its position), so the result
/// is deterministic for a fixed discovery order.
#[derive(Debug, Default)]
pub struct WorkflowSet {
    entries: Vec<ReusableWorkflow>,
}

impl WorkflowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, workflow: ReusableWorkflow) {
        if let Some(existing) = self.entries.iter_mut().find(|w| w.name == workflow.name) {
            warn!(
                name = %workflow.name,
                kept = %workflow.source_path,
                replaced = %existing.source_path,
                "Duplicate workflow name, later file wins"
            );
            *existing = workflow;
        } else {
            self.entries.push(workflow);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReusableWorkflow> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow(name: &str, path: &str) -> ReusableWorkflow {
        ReusableWorkflow {
            name: name.to_string(),
            source_path: path.to_string(),
            description: None,
            inputs: vec![],
            outputs: vec![],
            secrets: vec![],
        }
    }

    #[test]
    fn test_insert_preserves_discovery_order() {
        let mut set = WorkflowSet::new();
        set.insert(workflow("b", "b.yml"));
        set.insert(workflow("a", "a.yml"));

        let names: Vec<&str> = set.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_insert_collision_later_wins_keeps_position() {
        let mut set = WorkflowSet::new();
        set.insert(workflow("deploy", "a.yml"));
        set.insert(workflow("other", "b.yml"));
        set.insert(workflow("deploy", "c.yml"));

        assert_eq!(set.len(), 2);
        let entries: Vec<(&str, &str)> = set
            .iter()
            .map(|w| (w.name.as_str(), w.source_path.as_str()))
            .collect();
        assert_eq!(entries, [("deploy", "c.yml"), ("other", "b.yml")]);
    }
}
