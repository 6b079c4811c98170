use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// HTTP client for the users collaborator service.
#[derive(Clone)]
pub struct UsersClient {
    client: Client,
    base_url: String,
}

/// User record returned by `GET {users_base}/id?user_id=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub mfa_secret: Option<String>,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl UsersClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, base_url }
    }

    /// Look up a user by id. A non-200 response means the user does not exist
    /// or is inactive, which the workflow treats as a validation failure.
    pub async fn get_by_id(&self, user_id: &str) -> ApiResult<UserRecord> {
        let url = format!("{}/id", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(|e| ApiError::Service(format!("HTTP request error: {}", e)))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(ApiError::Validation(format!(
                "User {} not found or inactive",
                user_id
            )));
        }

        let user: UserRecord = response
            .json()
            .await
            .map_err(|e| ApiError::Service(format!("HTTP request error: {}", e)))?;

        Ok(user)
    }
}
