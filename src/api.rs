use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::{BackupRecord, RemoteEntry, StorageUsage};
use crate::restore::{RestoreDetails, RestoreRequest};
use crate::session::Session;

/// JSON-over-HTTP client for the NimbusVault backend.
///
/// Cheap to clone (reqwest pools connections behind the handle); spawned
/// request tasks each take their own copy. Transport failures map to
/// [`ApiError::Connectivity`], non-2xx responses to [`ApiError::Backend`]
/// with the backend's `{message}` payload when it sent one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    uid: Value,
}

#[derive(Debug, Deserialize)]
struct RestoreBody {
    details: Option<RestoreDetails>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        tracing::info!(username, "Logging in");
        let response = self
            .http
            .post(self.url("/api/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(connectivity)?;
        let body: LoginBody = decode(expect_ok(response).await?).await?;
        Ok(Session {
            username: username.to_string(),
            uid: uid_to_string(&body.uid),
        })
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        tracing::info!(username, "Registering");
        let response = self
            .http
            .post(self.url("/api/register"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(connectivity)?;
        expect_ok(response).await?;
        Ok(())
    }

    pub async fn list_files(&self, path: &str) -> Result<Vec<RemoteEntry>, ApiError> {
        tracing::debug!(path, "Listing files");
        let response = self
            .http
            .get(self.url("/api/files"))
            .query(&[("path", path)])
            .send()
            .await
            .map_err(connectivity)?;
        decode(expect_ok(response).await?).await
    }

    pub async fn save_backup(&self, path: &str, username: &str) -> Result<(), ApiError> {
        tracing::info!(path, "Requesting backup");
        let response = self
            .http
            .post(self.url("/api/save"))
            .json(&json!({ "path": path, "username": username }))
            .send()
            .await
            .map_err(connectivity)?;
        // Success body is opaque; only the status matters.
        expect_ok(response).await?;
        Ok(())
    }

    pub async fn list_backups(&self, uid: &str) -> Result<Vec<BackupRecord>, ApiError> {
        tracing::debug!(uid, "Listing backups");
        let response = self
            .http
            .get(self.url("/api/backups"))
            .query(&[("uid", uid)])
            .send()
            .await
            .map_err(connectivity)?;
        decode(expect_ok(response).await?).await
    }

    pub async fn restore(&self, request: &RestoreRequest) -> Result<RestoreDetails, ApiError> {
        // Deliberately not logging the body here.
        tracing::info!(record_id = request.record_id, "Requesting restore");
        let response = self
            .http
            .post(self.url("/api/restore"))
            .json(&json!({
                "username": request.username,
                "password": request.password.as_str(),
                "fid": request.record_id,
            }))
            .send()
            .await
            .map_err(connectivity)?;
        let body: RestoreBody = decode(expect_ok(response).await?).await?;
        Ok(body.details.unwrap_or_default())
    }

    pub async fn storage(&self, uid: &str) -> Result<StorageUsage, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/storage/{}", uid)))
            .send()
            .await
            .map_err(connectivity)?;
        decode(expect_ok(response).await?).await
    }
}

fn connectivity(err: reqwest::Error) -> ApiError {
    tracing::warn!("Request transport failure: {}", err);
    ApiError::Connectivity
}

async fn expect_ok(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .ok()
        .and_then(|text| error_message_from(&text));
    tracing::warn!(status = status.as_u16(), ?message, "Backend error response");
    Err(ApiError::Backend {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|err| {
        tracing::warn!("Failed to decode response body: {}", err);
        ApiError::Decode
    })
}

fn error_message_from(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

fn uid_to_string(uid: &Value) -> String {
    match uid {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.url("/api/files"), "http://localhost:8080/api/files");
    }

    #[test]
    fn error_message_is_extracted() {
        assert_eq!(
            error_message_from(r#"{"message":"decryption failed"}"#),
            Some("decryption failed".into())
        );
        assert_eq!(error_message_from("<html>502</html>"), None);
        assert_eq!(error_message_from(r#"{"other":"field"}"#), None);
    }

    #[test]
    fn numeric_uid_is_stringified() {
        assert_eq!(uid_to_string(&json!(42)), "42");
        assert_eq!(uid_to_string(&json!("abc")), "abc");
    }
}
