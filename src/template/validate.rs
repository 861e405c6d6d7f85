//! Joint validation of template text against the variable registry.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::registry::Registry;

use super::token::extract_tokens;

/// Partition of every variable referenced by a set of template texts.
///
/// Both sets always reflect the full input jointly; a name appearing in
/// several bodies shows up exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Referenced variables that exist in the registry
    pub valid: BTreeSet<String>,
    /// Referenced variables unknown to the registry
    pub invalid: BTreeSet<String>,
}

impl ValidationResult {
    /// True when no unknown variables are referenced.
    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Total number of distinct variables referenced.
    pub fn referenced(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }
}

/// Validate any number of texts jointly against `registry`.
///
/// Pure function of its inputs; cost is linear in the total text length,
/// so it is simply recomputed in full on every edit.
pub fn validate_texts<'a, I>(texts: I, registry: &Registry) -> ValidationResult
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result = ValidationResult::default();

    for text in texts {
        for name in extract_tokens(text) {
            if registry.contains(&name) {
                result.valid.insert(name);
            } else {
                result.invalid.insert(name);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Registry, VariableCategory, VariableDescriptor};

    fn test_registry() -> Registry {
        Registry::from_categories(vec![VariableCategory {
            name: "Test".to_string(),
            variables: vec![
                VariableDescriptor::new("user.name", "User name", "Adaeze"),
                VariableDescriptor::new("portal_url", "Portal link", "https://example.edu"),
            ],
        }])
        .unwrap()
    }

    #[test]
    fn test_partitioning() {
        let registry = test_registry();
        let result = validate_texts(
            ["Hello {{user.name}}", "Visit {{portal_url}} or {{bad.var}}"],
            &registry,
        );

        assert_eq!(
            result.valid,
            BTreeSet::from(["user.name".to_string(), "portal_url".to_string()])
        );
        assert_eq!(result.invalid, BTreeSet::from(["bad.var".to_string()]));
        assert!(!result.is_clean());
    }

    #[test]
    fn test_idempotent_revalidation() {
        let registry = test_registry();
        let texts = ["{{user.name}} {{nope}}", "{{portal_url}}"];

        let first = validate_texts(texts, &registry);
        let second = validate_texts(texts, &registry);
        assert_eq!(first, second);
    }

    #[test]
    fn test_deduplicates_across_bodies() {
        let registry = test_registry();
        let result = validate_texts(
            ["Hi {{user.name}}", "Bye {{user.name}} and {{ghost}} {{ghost}}"],
            &registry,
        );

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.invalid.len(), 1);
        assert_eq!(result.referenced(), 2);
    }

    #[test]
    fn test_empty_inputs_are_clean() {
        let registry = test_registry();
        let result = validate_texts(["", ""], &registry);
        assert!(result.valid.is_empty());
        assert!(result.invalid.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_case_sensitive_against_registry() {
        let registry = test_registry();
        let result = validate_texts(["{{User.Name}}"], &registry);
        assert!(result.valid.is_empty());
        assert_eq!(result.invalid, BTreeSet::from(["User.Name".to_string()]));
    }
}
