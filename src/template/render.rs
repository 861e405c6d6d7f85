//! Variable substitution engine for template bodies.
//!
//! Substitution uses the exact token grammar from the scanner, replacing
//! each matched `{{ ... }}` span (padding included) with the context value
//! for its name. Substituted values are emitted verbatim and never
//! re-scanned, so a value containing `{{...}}` cannot trigger another
//! round of substitution.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::token::scan;
use super::types::TemplateDraft;

/// Concrete variable values supplied at send time, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    values: HashMap<String, String>,
}

impl RenderContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, consuming and returning the context.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a value by variable name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of values in the context.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no values have been supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for RenderContext {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, String)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// What to do with a token whose variable is absent from the context.
///
/// The default leaves the original `{{name}}` text in place, so a
/// partially populated context still produces readable output; either way
/// the missing names are reported alongside the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPolicy {
    /// Keep the original placeholder text untouched
    #[default]
    KeepPlaceholder,
    /// Substitute an empty string
    Empty,
    /// Fail the whole render with `RenderError::MissingVariables`
    Fail,
}

/// Result of substituting one text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Final text with every resolvable token substituted
    pub output: String,
    /// Variables referenced by the template but absent from the context
    pub missing: BTreeSet<String>,
}

/// Both channel bodies of a template, rendered with a single context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// Rendered SMS body
    pub sms: Rendered,
    /// Rendered email body
    pub email: Rendered,
}

/// Render-time errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Raised under `MissingPolicy::Fail` when the context does not cover
    /// every referenced variable.
    #[error("Missing variables: {}", .0.iter().cloned().collect::<Vec<_>>().join(", "))]
    MissingVariables(BTreeSet<String>),
}

/// Render `template` with the default missing-variable policy
/// (placeholders for unknown names are left untouched).
pub fn render(template: &str, context: &RenderContext) -> Rendered {
    substitute(template, context, false)
}

/// Render `template` under an explicit missing-variable policy.
pub fn render_with_policy(
    template: &str,
    context: &RenderContext,
    policy: MissingPolicy,
) -> Result<Rendered, RenderError> {
    let rendered = substitute(template, context, policy == MissingPolicy::Empty);

    if policy == MissingPolicy::Fail && !rendered.missing.is_empty() {
        return Err(RenderError::MissingVariables(rendered.missing));
    }
    Ok(rendered)
}

/// Render both channel bodies of a draft with one context.
///
/// Under `MissingPolicy::Fail` the first body with missing variables
/// fails the whole message.
pub fn render_message(
    draft: &TemplateDraft,
    context: &RenderContext,
    policy: MissingPolicy,
) -> Result<RenderedMessage, RenderError> {
    Ok(RenderedMessage {
        sms: render_with_policy(&draft.sms_body, context, policy)?,
        email: render_with_policy(&draft.email_body, context, policy)?,
    })
}

fn substitute(template: &str, context: &RenderContext, blank_missing: bool) -> Rendered {
    let mut output = String::with_capacity(template.len());
    let mut missing = BTreeSet::new();
    let mut cursor = 0;

    for span in scan(template) {
        output.push_str(&template[cursor..span.range.start]);

        match context.get(span.name) {
            Some(value) => output.push_str(value),
            None => {
                missing.insert(span.name.to_string());
                if !blank_missing {
                    // Keep the original span, padding and all
                    output.push_str(&template[span.range.clone()]);
                }
            }
        }

        cursor = span.range.end;
    }
    output.push_str(&template[cursor..]);

    Rendered { output, missing }
}
