//! HTTP client backend for the portal template store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use uuid::Uuid;

use crate::template::{Template, TemplateDraft};

use super::{StoreError, StoreResult, TemplateStore};

/// JSON client for the portal backend's template endpoints:
/// `GET/POST {base}/templates` and `PUT/DELETE {base}/templates/{id}`.
///
/// Non-success responses become [`StoreError::Status`] (404 on an
/// id-addressed request becomes [`StoreError::NotFound`]); transport
/// failures propagate as [`StoreError::Transport`].
pub struct HttpTemplateStore {
    client: Client,
    base_url: String,
}

impl HttpTemplateStore {
    /// Build a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> StoreResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn templates_url(&self) -> String {
        format!("{}/templates", self.base_url)
    }

    fn template_url(&self, id: Uuid) -> String {
        format!("{}/templates/{}", self.base_url, id)
    }
}

/// Turn a non-success response into the matching store error.
async fn error_for(response: Response, id: Option<Uuid>) -> StoreError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return StoreError::NotFound(id);
        }
    }

    let body = response.text().await.unwrap_or_default();
    StoreError::Status {
        status: status.as_u16(),
        body,
    }
}

#[async_trait]
impl TemplateStore for HttpTemplateStore {
    async fn list(&self) -> StoreResult<Vec<Template>> {
        let response = self.client.get(self.templates_url()).send().await?;
        if !response.status().is_success() {
            return Err(error_for(response, None).await);
        }
        Ok(response.json().await?)
    }

    async fn create(&self, draft: TemplateDraft) -> StoreResult<Template> {
        let response = self
            .client
            .post(self.templates_url())
            .json(&draft)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_for(response, None).await);
        }

        let template: Template = response.json().await?;
        tracing::info!(id = %template.id, name = %template.name, "Created template");
        Ok(template)
    }

    async fn update(&self, id: Uuid, draft: TemplateDraft) -> StoreResult<Template> {
        let response = self
            .client
            .put(self.template_url(id))
            .json(&draft)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_for(response, Some(id)).await);
        }

        let template: Template = response.json().await?;
        tracing::info!(id = %template.id, "Updated template");
        Ok(template)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let response = self.client.delete(self.template_url(id)).send().await?;
        if !response.status().is_success() {
            return Err(error_for(response, Some(id)).await);
        }

        tracing::info!(id = %id, "Deleted template");
        Ok(())
    }
}
