//! Client for the third-party invoicing API.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ApiError, ApiResult};

const INVOICE_TIMEOUT_SECS: u64 = 10;
const VAT_RATE: u32 = 23;

/// Data needed to issue an invoice for a paid enrolment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub client_name: String,
    pub client_email: String,
    pub course_name: String,
    pub price: i64,
}

#[derive(Debug, Deserialize)]
struct InvoiceResponse {
    view_url: String,
}

#[derive(Clone)]
pub struct InvoiceClient {
    client: Client,
    api_url: String,
    api_token: String,
    seller_name: String,
}

impl InvoiceClient {
    pub fn new(api_url: String, api_token: String, seller_name: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(INVOICE_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_url,
            api_token,
            seller_name,
        }
    }

    /// Create a VAT invoice and return its view URL.
    pub async fn create_invoice(&self, request: &InvoiceRequest) -> ApiResult<String> {
        let today = Utc::now().date_naive();

        let payload = json!({
            "api_token": self.api_token,
            "invoice": {
                "kind": "vat",
                "sell_date": today.format("%Y-%m-%d").to_string(),
                "seller_name": self.seller_name,
                "buyer_name": request.client_name,
                "positions": [
                    {
                        "name": request.course_name,
                        "tax": VAT_RATE,
                        "total_price_gross": request.price,
                        "quantity": 1,
                    },
                ],
            },
        });

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::Service(format!("HTTP request error: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::InvoiceCreation(format!(
                "Invoice could not be created: {}",
                body
            )));
        }
        if !status.is_success() {
            return Err(ApiError::Service(format!(
                "Invoice API error: {}",
                status
            )));
        }

        let result: InvoiceResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Service(format!("HTTP request error: {}", e)))?;

        Ok(result.view_url)
    }
}
