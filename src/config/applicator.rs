//! Edit script applicator.
//!
//! Steps run in order, each against the output of the previous one. The first
//! failing step aborts the run; no partially edited text is returned.

use crate::config::schema::EditScript;
use crate::editor::{Editor, EditorError};
use std::fmt;

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "StepResult should be checked"]
pub enum StepResult {
    /// The step changed the text.
    Applied,
    /// The step ran but left the text as it was, e.g. its target was missing.
    Unchanged,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepResult::Applied => write!(f, "applied"),
            StepResult::Unchanged => write!(f, "unchanged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptOutput {
    pub text: String,
    /// One entry per step, in script order.
    pub steps: Vec<StepResult>,
}

impl ScriptOutput {
    pub fn applied_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|result| **result == StepResult::Applied)
            .count()
    }
}

/// A step failed; `step` is its 0-based index.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptError {
    pub step: usize,
    pub id: Option<String>,
    pub source: EditorError,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "edit '{}' failed: {}", id, self.source),
            None => write!(f, "edit #{} failed: {}", self.step + 1, self.source),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

pub fn apply_script(source: &str, script: &EditScript) -> Result<ScriptOutput, ScriptError> {
    let editor = Editor::new(script.settings);
    let mut text = source.to_string();
    let mut steps = Vec::with_capacity(script.edits.len());

    for (step, edit) in script.edits.iter().enumerate() {
        let output = editor
            .apply(&text, &edit.operation)
            .map_err(|source| ScriptError {
                step,
                id: edit.id.clone(),
                source,
            })?;

        let result = if output == text {
            StepResult::Unchanged
        } else {
            StepResult::Applied
        };
        log::debug!("edit {}: {}", edit.label(step), result);

        text = output;
        steps.push(result);
    }

    Ok(ScriptOutput { text, steps })
}
