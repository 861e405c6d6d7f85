//! Template data types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery channel a template body is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Plain-text short message
    Sms,
    /// Rich email body
    Email,
}

impl Channel {
    /// Stable lowercase label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Email => "email",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message template as edited: a name plus one body per delivery
/// channel. The bodies are independent; neither references the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDraft {
    /// User-facing template name (required at submit time)
    pub name: String,

    /// Body for the SMS channel
    #[serde(default)]
    pub sms_body: String,

    /// Body for the email channel
    #[serde(default)]
    pub email_body: String,
}

impl TemplateDraft {
    /// Create a named draft with empty bodies.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Both channel bodies, SMS first.
    pub fn bodies(&self) -> [&str; 2] {
        [&self.sms_body, &self.email_body]
    }

    /// The body for one channel.
    pub fn body(&self, channel: Channel) -> &str {
        match channel {
            Channel::Sms => &self.sms_body,
            Channel::Email => &self.email_body,
        }
    }

    /// Mutable access to the body for one channel.
    pub fn body_mut(&mut self, channel: Channel) -> &mut String {
        match channel {
            Channel::Sms => &mut self.sms_body,
            Channel::Email => &mut self.email_body,
        }
    }

    /// A draft is submittable once the name has non-whitespace content.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// A stored template as returned by the template store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Store-assigned identifier
    pub id: Uuid,

    /// User-facing template name
    pub name: String,

    /// Body for the SMS channel
    #[serde(default)]
    pub sms_body: String,

    /// Body for the email channel
    #[serde(default)]
    pub email_body: String,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Build the stored form of a draft, stamping both timestamps now.
    pub fn from_draft(id: Uuid, draft: TemplateDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: draft.name,
            sms_body: draft.sms_body,
            email_body: draft.email_body,
            created_at: now,
            updated_at: now,
        }
    }

    /// The stored fields as an editable draft.
    pub fn to_draft(&self) -> TemplateDraft {
        TemplateDraft {
            name: self.name.clone(),
            sms_body: self.sms_body.clone(),
            email_body: self.email_body.clone(),
        }
    }
}
