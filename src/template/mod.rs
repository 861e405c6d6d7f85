//! Message template engine.
//!
//! This module provides:
//! - The placeholder token grammar (`{{variable}}`) with extraction
//! - Joint validation of template bodies against the variable registry
//! - The substitution engine for rendering templates at send time
//!
//! # Example
//!
//! ```ignore
//! let registry = Registry::builtin()?;
//!
//! let draft = TemplateDraft {
//!     name: "Registration reminder".to_string(),
//!     sms_body: "{{student.first_name}}, registration closes {{registration.deadline}}".to_string(),
//!     email_body: "Dear {{student.full_name}}, ...".to_string(),
//! };
//!
//! // Live feedback while editing
//! let result = validate_texts(draft.bodies(), &registry);
//! assert!(result.is_clean());
//!
//! // At send time
//! let context = RenderContext::new()
//!     .with("student.first_name", "Adaeze")
//!     .with("registration.deadline", "2025-02-07");
//! let rendered = render(&draft.sms_body, &context);
//! ```

mod render;
mod token;
mod types;
mod validate;

pub use render::{
    render, render_message, render_with_policy, MissingPolicy, RenderContext, RenderError,
    Rendered, RenderedMessage,
};
pub use token::{extract_tokens, insert_token, is_valid_name, placeholder, scan, TokenSpan};
pub use types::{Channel, Template, TemplateDraft};
pub use validate::{validate_texts, ValidationResult};
