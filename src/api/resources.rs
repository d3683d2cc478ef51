use std::marker::PhantomData;

use async_trait::async_trait;
use folio_schema::{ApiEnvelope, SkillSet};
use reqwest::Method;
use serde_json::Value;

use super::ApiClient;
use crate::entity::Entity;
use crate::error::ApiError;

impl ApiClient {
    /// CRUD calls for one entity type, authorized with `token`.
    pub fn entity<'a, E: Entity>(&'a self, token: &'a str) -> EntityApi<'a, E> {
        EntityApi {
            client: self,
            token,
            _entity: PhantomData,
        }
    }

    pub fn skills<'a>(&'a self, token: &'a str) -> SkillsApi<'a> {
        SkillsApi {
            client: self,
            token,
        }
    }
}

pub struct EntityApi<'a, E> {
    client: &'a ApiClient,
    token: &'a str,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityApi<'_, E> {
    fn collection(&self) -> &str {
        E::KIND.api_path(self.client.paths())
    }

    fn member(&self, id: &str) -> String {
        format!("{}/{}", self.collection(), id)
    }

    pub async fn list(&self) -> Result<Vec<E>, ApiError> {
        let envelope: ApiEnvelope<Vec<E>> =
            self.client.get(self.collection(), Some(self.token)).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub async fn get(&self, id: &str) -> Result<E, ApiError> {
        let envelope: ApiEnvelope<E> = self.client.get(&self.member(id), Some(self.token)).await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// POST a new record; returns the server's message, if any.
    pub async fn create(&self, input: &E::Input) -> Result<Option<String>, ApiError> {
        let envelope: ApiEnvelope<Value> = self
            .client
            .send(Method::POST, self.collection(), Some(self.token), Some(input))
            .await?;
        Ok(envelope.message().map(str::to_string))
    }

    /// Replace a record with PUT or PATCH, whichever the resource uses.
    pub async fn update(&self, id: &str, input: &E::Input) -> Result<Option<String>, ApiError> {
        let envelope: ApiEnvelope<Value> = self
            .client
            .send(
                E::KIND.update_method(),
                &self.member(id),
                Some(self.token),
                Some(input),
            )
            .await?;
        Ok(envelope.message().map(str::to_string))
    }

    pub async fn delete(&self, id: &str) -> Result<Option<String>, ApiError> {
        let envelope: ApiEnvelope<Value> = self
            .client
            .send::<(), _>(Method::DELETE, &self.member(id), Some(self.token), None)
            .await?;
        Ok(envelope.message().map(str::to_string))
    }
}

/// Persistence of the whole skills list.
#[async_trait]
pub trait SkillStore: Send + Sync {
    /// Replaces the stored list with `skills` using `method`; returns the server message.
    async fn replace(&self, method: Method, skills: &[String]) -> Result<Option<String>, ApiError>;
}

pub struct SkillsApi<'a> {
    client: &'a ApiClient,
    token: &'a str,
}

impl SkillsApi<'_> {
    pub async fn fetch(&self) -> Result<Vec<String>, ApiError> {
        let envelope: ApiEnvelope<SkillSet> = self
            .client
            .get(&self.client.paths().skills, Some(self.token))
            .await?;
        Ok(envelope.data.unwrap_or_default().skills)
    }
}

#[async_trait]
impl SkillStore for SkillsApi<'_> {
    async fn replace(&self, method: Method, skills: &[String]) -> Result<Option<String>, ApiError> {
        let body = SkillSet::from(skills.to_vec());
        let envelope: ApiEnvelope<Value> = self
            .client
            .send(method, &self.client.paths().skills, Some(self.token), Some(&body))
            .await?;
        Ok(envelope.message().map(str::to_string))
    }
}
