//! Markdown rendering
//!
//! Pure functions from the workflow set to Markdown text. No clocks, no
//! locale, no environment reads: identical input renders byte-identical
//! output, which keeps generated commits diff-friendly and the tests
//! deterministic.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::workflow::{ReusableWorkflow, WorkflowSet};

/// Sentinel pair delimiting the generated region. Fixed literals: the
/// idempotent-overwrite contract depends on these never changing.
pub const ANCHOR_BEGIN: &str = "<!-- wfdoc:begin -->";
pub const ANCHOR_END: &str = "<!-- wfdoc:end -->";

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Fixed introductory heading plus generation notice.
pub fn common_header() -> String {
    concat!(
        "# Reusable Workflows\n",
        "\n",
        "This document lists the reusable workflows of this repository\n",
        "and the inputs, outputs, and secrets each one declares.\n",
        "\n",
        "<!-- Generated by wfdoc. Do not edit by hand. -->\n",
    )
    .to_string()
}

/// Table of contents: one link per workflow, in set order. Each link
/// anchor equals the anchor emitted for that workflow's section.
pub fn agenda(set: &WorkflowSet) -> String {
    let slugs = assign_slugs(set);
    let mut out = String::from("## Workflows\n\n");
    for (workflow, slug) in set.iter().zip(&slugs) {
        out.push_str(&format!("- [{}](#{})\n", workflow.name, slug));
    }
    out
}

/// One content section per workflow, in set order.
pub fn workflow_sections(set: &WorkflowSet) -> String {
    let slugs = assign_slugs(set);
    let mut out = String::new();
    for (workflow, slug) in set.iter().zip(&slugs) {
        out.push_str(&workflow_section(workflow, slug));
    }
    out
}

/// The full document: begin marker, header, agenda, sections, end marker.
pub fn render_document(set: &WorkflowSet) -> String {
    format!(
        "{}\n{}\n{}\n{}{}\n",
        ANCHOR_BEGIN,
        common_header(),
        agenda(set),
        workflow_sections(set),
        ANCHOR_END,
    )
}

/// Replace the previously generated region of `existing` with
/// `generated`, leaving surrounding content untouched.
///
/// Returns `None` when `existing` does not carry a well-formed marker
/// pair, in which case the caller falls back to whole-file semantics.
pub fn replace_between_markers(existing: &str, generated: &str) -> Option<String> {
    let begin = existing.find(ANCHOR_BEGIN)?;
    let end_marker = existing[begin..].find(ANCHOR_END)? + begin + ANCHOR_END.len();

    let mut out = String::with_capacity(existing.len() + generated.len());
    out.push_str(&existing[..begin]);
    out.push_str(generated.trim_end_matches('\n'));
    out.push_str(&existing[end_marker..]);
    Some(out)
}

fn workflow_section(workflow: &ReusableWorkflow, slug: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("<a id=\"{}\"></a>\n\n", slug));
    out.push_str(&format!("## {}\n\n", workflow.name));
    out.push_str(&format!("Source: `{}`\n\n", workflow.source_path));

    if let Some(description) = workflow.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(description.trim_end());
        out.push_str("\n\n");
    }

    if !workflow.inputs.is_empty() {
        out.push_str("### Inputs\n\n");
        out.push_str("| Name | Description | Type | Required | Default |\n");
        out.push_str("| --- | --- | --- | --- | --- |\n");
        for input in &workflow.inputs {
            out.push_str(&format!(
                "| `{}` | {} | {} | {} | {} |\n",
                cell(&input.name),
                cell(&input.description),
                cell(&input.input_type),
                yes_no(input.required),
                input
                    .default
                    .as_deref()
                    .map(|d| format!("`{}`", cell(d)))
                    .unwrap_or_else(|| "-".to_string()),
            ));
        }
        out.push('\n');
    }

    if !workflow.outputs.is_empty() {
        out.push_str("### Outputs\n\n");
        out.push_str("| Name | Description | Value |\n");
        out.push_str("| --- | --- | --- |\n");
        for output in &workflow.outputs {
            out.push_str(&format!(
                "| `{}` | {} | `{}` |\n",
                cell(&output.name),
                cell(&output.description),
                cell(&output.value),
            ));
        }
        out.push('\n');
    }

    if !workflow.secrets.is_empty() {
        out.push_str("### Secrets\n\n");
        out.push_str("| Name | Description | Required |\n");
        out.push_str("| --- | --- | --- |\n");
        for secret in &workflow.secrets {
            out.push_str(&format!(
                "| `{}` | {} | {} |\n",
                cell(&secret.name),
                cell(&secret.description),
                yes_no(secret.required),
            ));
        }
        out.push('\n');
    }

    out
}

/// Anchor slug for a workflow name: lower-cased, non-alphanumeric runs
/// collapsed to a single hyphen, leading/trailing hyphens trimmed.
pub fn slugify(name: &str) -> String {
    NON_ALNUM
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Slugs for every workflow in set order, with collisions disambiguated
/// by a numeric suffix in order of first occurrence.
fn assign_slugs(set: &WorkflowSet) -> Vec<String> {
    let mut taken = HashSet::new();
    set.iter()
        .map(|workflow| {
            let base = match slugify(&workflow.name) {
                s if s.is_empty() => "workflow".to_string(),
                s => s,
            };
            let mut candidate = base.clone();
            let mut n = 1;
            while !taken.insert(candidate.clone()) {
                candidate = format!("{}-{}", base, n);
                n += 1;
            }
            candidate
        })
        .collect()
}

/// Markdown table cells cannot contain bare pipes or newlines.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
