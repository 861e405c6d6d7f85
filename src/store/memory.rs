//! In-memory template store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::template::{Template, TemplateDraft};

use super::{StoreError, StoreResult, TemplateStore};

/// DashMap-backed store for tests and local CLI work.
///
/// Ids are assigned with `Uuid::new_v4()` on create. `list` returns
/// templates ordered by creation time so output is stable across calls.
#[derive(Default)]
pub struct MemoryTemplateStore {
    templates: DashMap<Uuid, Template>,
}

impl MemoryTemplateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn list(&self) -> StoreResult<Vec<Template>> {
        let mut templates: Vec<Template> =
            self.templates.iter().map(|e| e.value().clone()).collect();
        templates.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(templates)
    }

    async fn create(&self, draft: TemplateDraft) -> StoreResult<Template> {
        let template = Template::from_draft(Uuid::new_v4(), draft);

        tracing::debug!(id = %template.id, name = %template.name, "Stored new template");
        self.templates.insert(template.id, template.clone());
        Ok(template)
    }

    async fn update(&self, id: Uuid, draft: TemplateDraft) -> StoreResult<Template> {
        let mut entry = self
            .templates
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;

        let template = entry.value_mut();
        template.name = draft.name;
        template.sms_body = draft.sms_body;
        template.email_body = draft.email_body;
        template.updated_at = Utc::now();

        Ok(template.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.templates
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> TemplateDraft {
        TemplateDraft {
            name: name.to_string(),
            sms_body: "Hi {{student.first_name}}".to_string(),
            email_body: "Dear {{student.full_name}}".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let store = MemoryTemplateStore::new();

        let stored = store.create(draft("Welcome")).await.unwrap();
        assert_eq!(stored.name, "Welcome");
        assert_eq!(stored.created_at, stored.updated_at);

        let again = store.create(draft("Welcome")).await.unwrap();
        assert_ne!(stored.id, again.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_bumps_updated_at() {
        let store = MemoryTemplateStore::new();
        let stored = store.create(draft("Welcome")).await.unwrap();

        let updated = store
            .update(stored.id, draft("Welcome v2"))
            .await
            .unwrap();
        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.name, "Welcome v2");
        assert_eq!(updated.created_at, stored.created_at);
        assert!(updated.updated_at >= stored.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryTemplateStore::new();
        let id = Uuid::new_v4();

        match store.update(id, draft("x")).await {
            Err(StoreError::NotFound(missing)) => assert_eq!(missing, id),
            other => panic!("Expected NotFound, got {:?}", other.map(|t| t.id)),
        }
    }

    #[tokio::test]
    async fn test_delete_removes_and_rejects_unknown() {
        let store = MemoryTemplateStore::new();
        let stored = store.create(draft("Welcome")).await.unwrap();

        store.delete(stored.id).await.unwrap();
        assert!(store.is_empty());
        assert!(matches!(
            store.delete(stored.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_ordered_by_creation() {
        let store = MemoryTemplateStore::new();
        let first = store.create(draft("First")).await.unwrap();
        let second = store.create(draft("Second")).await.unwrap();

        let listed = store.list().await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|t| t.id).collect();
        assert!(ids.contains(&first.id) && ids.contains(&second.id));
        assert!(listed[0].created_at <= listed[1].created_at);
    }
}
