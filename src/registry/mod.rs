//! Variable registry: the catalog of names templates may reference.
//!
//! The registry is built once at startup, either from the built-in portal
//! catalog or from a TOML file, and is immutable afterwards. Construction
//! rejects duplicate or ungrammatical variable names outright; a bad
//! catalog is a configuration authoring bug and must stop startup rather
//! than win by accident.

mod catalog;

use std::collections::{BTreeSet, HashMap};

use config::{Config, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template::is_valid_name;

/// Registry construction errors. All of these are startup-fatal.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate variable name: {name} (declared in {first_category} and {category})")]
    DuplicateName {
        name: String,
        category: String,
        first_category: String,
    },

    #[error("Invalid variable name in category {category}: {name:?}")]
    InvalidName { name: String, category: String },

    #[error("Failed to load registry file: {0}")]
    File(#[from] config::ConfigError),
}

/// One variable templates may reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDescriptor {
    /// Dotted identifier used inside `{{ }}`, unique across the registry
    pub name: String,

    /// Display grouping; filled from the owning category at construction
    #[serde(default)]
    pub category: String,

    /// Human-readable explanation
    pub description: String,

    /// Sample rendered value, for documentation and previews
    pub example: String,
}

impl VariableDescriptor {
    /// Descriptor with the category left for the registry to fill.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: String::new(),
            description: description.into(),
            example: example.into(),
        }
    }
}

/// An ordered group of variables under one display heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableCategory {
    /// Category heading, e.g. "Student Information"
    pub name: String,

    /// Variables in display order
    pub variables: Vec<VariableDescriptor>,
}

/// Shape of a registry TOML file.
#[derive(Debug, Deserialize)]
struct RegistryFile {
    categories: Vec<VariableCategory>,
}

/// The authoritative catalog of template variables.
///
/// Categories and variables keep their declaration order for display;
/// lookups are by exact (case-sensitive) name.
#[derive(Debug, Clone)]
pub struct Registry {
    categories: Vec<VariableCategory>,
    names: BTreeSet<String>,
    index: HashMap<String, (usize, usize)>,
}

impl Registry {
    /// Build a registry, filling each descriptor's category from its
    /// group and enforcing the grammar and uniqueness invariants.
    pub fn from_categories(
        mut categories: Vec<VariableCategory>,
    ) -> Result<Self, RegistryError> {
        for category in categories.iter_mut() {
            for variable in category.variables.iter_mut() {
                variable.category = category.name.clone();
            }
        }

        let mut names = BTreeSet::new();
        let mut index: HashMap<String, (usize, usize)> = HashMap::new();

        for (ci, category) in categories.iter().enumerate() {
            for (vi, variable) in category.variables.iter().enumerate() {
                if !is_valid_name(&variable.name) {
                    return Err(RegistryError::InvalidName {
                        name: variable.name.clone(),
                        category: category.name.clone(),
                    });
                }

                if let Some(&(first_ci, _)) = index.get(variable.name.as_str()) {
                    return Err(RegistryError::DuplicateName {
                        name: variable.name.clone(),
                        category: category.name.clone(),
                        first_category: categories[first_ci].name.clone(),
                    });
                }

                index.insert(variable.name.clone(), (ci, vi));
                names.insert(variable.name.clone());
            }
        }

        Ok(Self {
            categories,
            names,
            index,
        })
    }

    /// The built-in portal catalog.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_categories(catalog::categories())
    }

    /// Load a registry from a TOML file, replacing the built-in catalog.
    pub fn from_file(path: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = Config::builder()
            .add_source(File::with_name(path))
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            path = %path,
            categories = file.categories.len(),
            "Loaded registry file"
        );

        Self::from_categories(file.categories)
    }

    /// Find the descriptor for a variable name, if registered.
    pub fn lookup(&self, name: &str) -> Option<&VariableDescriptor> {
        let &(ci, vi) = self.index.get(name)?;
        Some(&self.categories[ci].variables[vi])
    }

    /// Whether a variable name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Every registered name, sorted.
    pub fn all_names(&self) -> &BTreeSet<String> {
        &self.names
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[VariableCategory] {
        &self.categories
    }

    /// Total number of registered variables.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the registry holds no variables.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, variables: Vec<VariableDescriptor>) -> VariableCategory {
        VariableCategory {
            name: name.to_string(),
            variables,
        }
    }

    #[test]
    fn test_lookup_and_category_fill() {
        let registry = Registry::from_categories(vec![
            category(
                "Student",
                vec![VariableDescriptor::new("student.email", "Email", "a@b.edu")],
            ),
            category(
                "Portal",
                vec![VariableDescriptor::new("portal.url", "Link", "https://x")],
            ),
        ])
        .unwrap();

        let descriptor = registry.lookup("student.email").unwrap();
        assert_eq!(descriptor.category, "Student");
        assert_eq!(descriptor.example, "a@b.edu");
        assert!(registry.lookup("portal.missing").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = Registry::from_categories(vec![category(
            "Student",
            vec![VariableDescriptor::new("student.email", "Email", "a@b.edu")],
        )])
        .unwrap();

        assert!(registry.contains("student.email"));
        assert!(!registry.contains("Student.Email"));
    }

    #[test]
    fn test_duplicate_name_across_categories_rejected() {
        let result = Registry::from_categories(vec![
            category(
                "Student",
                vec![VariableDescriptor::new("shared.name", "One", "x")],
            ),
            category(
                "Portal",
                vec![VariableDescriptor::new("shared.name", "Two", "y")],
            ),
        ]);

        match result {
            Err(RegistryError::DuplicateName {
                name,
                category,
                first_category,
            }) => {
                assert_eq!(name, "shared.name");
                assert_eq!(first_category, "Student");
                assert_eq!(category, "Portal");
            }
            other => panic!("Expected DuplicateName, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_within_category_rejected() {
        let result = Registry::from_categories(vec![category(
            "Student",
            vec![
                VariableDescriptor::new("student.email", "Email", "a"),
                VariableDescriptor::new("student.email", "Again", "b"),
            ],
        )]);

        assert!(matches!(result, Err(RegistryError::DuplicateName { .. })));
    }

    #[test]
    fn test_ungrammatical_name_rejected() {
        let result = Registry::from_categories(vec![category(
            "Student",
            vec![VariableDescriptor::new("student name", "Spaces", "x")],
        )]);

        assert!(matches!(result, Err(RegistryError::InvalidName { .. })));
    }

    #[test]
    fn test_all_names_sorted_union() {
        let registry = Registry::from_categories(vec![
            category("B", vec![VariableDescriptor::new("zz", "Z", "z")]),
            category("A", vec![VariableDescriptor::new("aa", "A", "a")]),
        ])
        .unwrap();

        let names: Vec<_> = registry.all_names().iter().cloned().collect();
        assert_eq!(names, vec!["aa".to_string(), "zz".to_string()]);
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let registry = Registry::builtin().unwrap();
        assert!(!registry.is_empty());
        assert!(registry.contains("student.first_name"));
        assert!(registry.contains("portal.url"));

        // Every descriptor carries its category heading
        for category in registry.categories() {
            for variable in &category.variables {
                assert_eq!(variable.category, category.name);
            }
        }
    }

    #[test]
    fn test_from_file_round_trip() {
        let toml = r#"
[[categories]]
name = "Custom"

[[categories.variables]]
name = "custom.code"
description = "A short code"
example = "X-123"
"#;
        let path = std::env::temp_dir().join(format!(
            "registry-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, toml).unwrap();

        let registry = Registry::from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(registry.len(), 1);
        let descriptor = registry.lookup("custom.code").unwrap();
        assert_eq!(descriptor.category, "Custom");
        assert_eq!(descriptor.description, "A short code");
    }

    #[test]
    fn test_empty_registry_allowed() {
        let registry = Registry::from_categories(vec![]).unwrap();
        assert!(registry.is_empty());
        assert!(!registry.contains("anything"));
    }
}
