//! REST-backed task repository.
//!
//! # Responsibility
//! - Implement `TaskRepository` against the hosted database's PostgREST
//!   endpoint for the `task` collection.
//! - Keep wire conventions (headers, filters, return preferences) inside
//!   this file.
//!
//! # Invariants
//! - Every request carries both `apikey` and bearer authorization.
//! - Single-row reads negotiate the exactly-one object representation;
//!   a 406 from the remote maps to `RepoError::NotFound`.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use url::Url;

const TASK_COLLECTION: &str = "task";
const REST_PATH: &str = "rest/v1";
/// PostgREST media type requesting exactly one row as a bare object.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// `TaskRepository` implementation speaking to the hosted database.
pub struct RestTaskRepository {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl RestTaskRepository {
    /// Builds a repository for the given remote base URL and access key.
    ///
    /// # Errors
    /// - `InvalidData` when the base URL cannot address the task
    ///   collection (e.g. a cannot-be-a-base URL).
    pub fn try_new(base_url: &Url, api_key: impl Into<String>) -> RepoResult<Self> {
        let endpoint = collection_url(base_url)?;
        Ok(Self {
            http: Client::new(),
            endpoint,
            api_key: api_key.into(),
        })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http
            .request(method, self.endpoint.clone())
            .headers(self.auth_headers())
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        // Keys that are not valid header values would be rejected by the
        // remote anyway; send an empty value rather than panicking here.
        let key = HeaderValue::from_str(&self.api_key)
            .unwrap_or_else(|_| HeaderValue::from_static(""));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .unwrap_or_else(|_| HeaderValue::from_static(""));
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers
    }

    async fn decode_task(response: Response) -> RepoResult<Task> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| RepoError::InvalidData(err.to_string()))
    }

    async fn fail_from(id: Option<TaskId>, response: Response) -> RepoError {
        let status = response.status();
        if status == StatusCode::NOT_ACCEPTABLE {
            if let Some(id) = id {
                return RepoError::NotFound(id);
            }
        }
        let body = response.text().await.unwrap_or_default();
        RepoError::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        }
    }
}

#[async_trait]
impl TaskRepository for RestTaskRepository {
    async fn insert_task(&self, draft: &TaskDraft) -> RepoResult<Task> {
        let response = self
            .request(Method::POST)
            .header(ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(draft)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail_from(None, response).await);
        }
        Self::decode_task(response).await
    }

    async fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail_from(None, response).await);
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| RepoError::InvalidData(err.to_string()))
    }

    async fn fetch_task(&self, id: TaskId) -> RepoResult<Task> {
        let response = self
            .request(Method::GET)
            .header(ACCEPT, SINGLE_OBJECT)
            .query(&[("select", "*"), ("id", id_filter(id).as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail_from(Some(id), response).await);
        }
        Self::decode_task(response).await
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        let response = self
            .request(Method::PATCH)
            .header(ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .query(&[("id", id_filter(id).as_str())])
            .json(patch)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail_from(Some(id), response).await);
        }
        Self::decode_task(response).await
    }

    async fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let response = self
            .request(Method::DELETE)
            .query(&[("id", id_filter(id).as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail_from(None, response).await);
        }
        Ok(())
    }
}

fn collection_url(base_url: &Url) -> RepoResult<Url> {
    // Url::join drops the last path segment unless it ends with a slash.
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    base.join(&format!("{REST_PATH}/{TASK_COLLECTION}"))
        .map_err(|err| RepoError::InvalidData(format!("cannot build collection URL: {err}")))
}

fn id_filter(id: TaskId) -> String {
    format!("eq.{id}")
}

/// Extracts the remote's message from a PostgREST error body.
///
/// Falls back to the raw body, then to the HTTP status line.
fn error_message(status: StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("remote operation failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{collection_url, error_message, id_filter};
    use reqwest::StatusCode;
    use url::Url;
    use uuid::Uuid;

    #[test]
    fn collection_url_handles_trailing_and_bare_base() {
        let bare = Url::parse("https://db.example.com").unwrap();
        assert_eq!(
            collection_url(&bare).unwrap().as_str(),
            "https://db.example.com/rest/v1/task"
        );

        let trailing = Url::parse("https://db.example.com/tenant/").unwrap();
        assert_eq!(
            collection_url(&trailing).unwrap().as_str(),
            "https://db.example.com/tenant/rest/v1/task"
        );
    }

    #[test]
    fn id_filter_uses_eq_operator() {
        let id = Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap();
        assert_eq!(id_filter(id), "eq.00000000-0000-4000-8000-000000000001");
    }

    #[test]
    fn error_message_prefers_structured_body() {
        let message = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"message":"duplicate key value"}"#,
        );
        assert_eq!(message, "duplicate key value");
    }

    #[test]
    fn error_message_falls_back_to_raw_body_then_status() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream unavailable"),
            "upstream unavailable"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "  "),
            "Bad Gateway"
        );
    }
}
