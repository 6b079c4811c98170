use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// HTTP client for the courses collaborator service.
#[derive(Clone)]
pub struct CoursesClient {
    client: Client,
    base_url: String,
}

/// Course record returned by `GET {courses_base}/{course_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub end_date: Option<NaiveDate>,
}

impl CoursesClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, base_url }
    }

    /// Look up a course by id. A non-200 response is a validation failure.
    pub async fn get_by_id(&self, course_id: i32) -> ApiResult<CourseRecord> {
        let url = format!("{}/{}", self.base_url, course_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Service(format!("HTTP request error: {}", e)))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(ApiError::Validation(format!(
                "Course {} not found",
                course_id
            )));
        }

        let course: CourseRecord = response
            .json()
            .await
            .map_err(|e| ApiError::Service(format!("HTTP request error: {}", e)))?;

        Ok(course)
    }
}
