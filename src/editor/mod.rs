//! Editing session for a message template.
//!
//! The session owns the draft being edited and re-runs validation over
//! both channel bodies synchronously on every change, so the UI always
//! has a current valid/unknown partition to display. Persistence goes
//! through a [`TemplateStore`]; a failed submit keeps the draft intact
//! for retry.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::registry::Registry;
use crate::store::{StoreError, TemplateStore};
use crate::template::{
    insert_token, placeholder, validate_texts, Channel, Template, TemplateDraft,
    ValidationResult,
};

/// Where the session is in its edit/submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Fresh form, nothing touched yet
    Empty,
    /// Draft has content or has been edited
    Editing,
    /// A store call is in flight
    Submitting,
    /// The last submit or delete failed; the draft is untouched
    Error,
}

/// Why a submit was not completed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The template name is empty; no store call was made
    #[error("Template name is required")]
    NameRequired,

    /// The store rejected or failed the request
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One template being edited.
///
/// `submit` takes `&mut self`, so a second submit cannot start while one
/// is in flight.
pub struct EditorSession {
    registry: Arc<Registry>,
    draft: TemplateDraft,
    template_id: Option<Uuid>,
    phase: EditorPhase,
    dirty: bool,
    validation: ValidationResult,
    error: Option<String>,
}

impl EditorSession {
    /// Start a session with a blank form.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            draft: TemplateDraft::default(),
            template_id: None,
            phase: EditorPhase::Empty,
            dirty: false,
            validation: ValidationResult::default(),
            error: None,
        }
    }

    /// Start a session editing a stored template.
    ///
    /// The session begins in `Editing` and validation is seeded from the
    /// stored bodies before the user types anything.
    pub fn load(registry: Arc<Registry>, template: &Template) -> Self {
        let draft = template.to_draft();
        let validation = validate_texts(draft.bodies(), &registry);

        Self {
            registry,
            draft,
            template_id: Some(template.id),
            phase: EditorPhase::Editing,
            dirty: false,
            validation,
            error: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// The draft as it stands.
    pub fn draft(&self) -> &TemplateDraft {
        &self.draft
    }

    /// Id of the stored template being edited, if any.
    pub fn template_id(&self) -> Option<Uuid> {
        self.template_id
    }

    /// Whether there are unsubmitted edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Live valid/unknown partition over both bodies.
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// Message from the last failed submit or delete, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the template name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.touched();
    }

    /// Replace the body for one channel.
    pub fn set_body(&mut self, channel: Channel, text: impl Into<String>) {
        *self.draft.body_mut(channel) = text.into();
        self.touched();
    }

    /// Append the placeholder for `name` to one channel's body, with a
    /// single leading space when the body already has content.
    pub fn insert_variable(&mut self, channel: Channel, name: &str) {
        let body = self.draft.body_mut(channel);
        *body = insert_token(body, name);
        self.touched();
    }

    /// The literal placeholder text for `name`, for the clipboard.
    pub fn copy_variable(&self, name: &str) -> String {
        placeholder(name)
    }

    /// Reset to a blank form.
    pub fn reset(&mut self) {
        self.draft = TemplateDraft::default();
        self.template_id = None;
        self.phase = EditorPhase::Empty;
        self.dirty = false;
        self.validation = ValidationResult::default();
        self.error = None;
    }

    /// Persist the draft: create when this session has no stored id,
    /// update otherwise.
    ///
    /// An empty name is rejected before any store call, with no phase
    /// change. On success a create resets to a blank form while an
    /// update keeps editing the stored values; on failure the draft is
    /// left exactly as it was and the session enters `Error`.
    pub async fn submit(&mut self, store: &dyn TemplateStore) -> Result<Template, SubmitError> {
        if !self.draft.has_name() {
            return Err(SubmitError::NameRequired);
        }

        self.phase = EditorPhase::Submitting;
        self.error = None;

        let result = match self.template_id {
            Some(id) => store.update(id, self.draft.clone()).await,
            None => store.create(self.draft.clone()).await,
        };

        match result {
            Ok(template) => {
                if self.template_id.is_some() {
                    // Stay on the stored template for further edits
                    self.draft = template.to_draft();
                    self.revalidate();
                    self.phase = EditorPhase::Editing;
                    self.dirty = false;
                } else {
                    self.reset();
                }
                Ok(template)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Template submit failed");
                self.phase = EditorPhase::Error;
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Delete the stored template and reset to a blank form.
    ///
    /// Without a stored id this is just a form reset.
    pub async fn remove(&mut self, store: &dyn TemplateStore) -> Result<(), SubmitError> {
        let Some(id) = self.template_id else {
            self.reset();
            return Ok(());
        };

        self.phase = EditorPhase::Submitting;
        match store.delete(id).await {
            Ok(()) => {
                self.reset();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, id = %id, "Template delete failed");
                self.phase = EditorPhase::Error;
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    fn touched(&mut self) {
        self.phase = EditorPhase::Editing;
        self.dirty = true;
        self.error = None;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.validation = validate_texts(self.draft.bodies(), &self.registry);
    }
}
