//! Outbound email.
//!
//! Mail goes out through a transactional mail HTTP API. The `Mailer` trait is
//! the seam: the workflow and the background worker pool only see the trait,
//! so tests can substitute a recording stub.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::error::{ApiError, ApiResult};

const MAIL_TIMEOUT_SECS: u64 = 10;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> ApiResult<()>;
}

/// Mailer backed by an HTTP mail API taking `{from, to, subject, html}`.
#[derive(Clone)]
pub struct HttpMailer {
    client: Client,
    api_url: String,
    sender: String,
}

impl HttpMailer {
    pub fn new(api_url: String, sender: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(MAIL_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_url,
            sender,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> ApiResult<()> {
        let payload = json!({
            "from": self.sender,
            "to": to,
            "subject": subject,
            "html": html,
        });

        let response = self
            .client
            .post(&self.api_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::Service(format!("HTTP request error: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::Service(format!(
                "Mail API error: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Body of the enrolment confirmation email, sent synchronously on create.
pub fn enrolment_confirmation_html(course_name: &str) -> String {
    format!(
        r#"<html>
  <body>
    <h2>Thank you for enrolling in the course {}!</h2>
    <p>Your enrolment has been successfully recorded.</p>
  </body>
</html>"#,
        course_name
    )
}

/// Body of the payment confirmation email, delivered by the background workers.
pub fn payment_confirmation_html(invoice_url: &str) -> String {
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.5; color: #333;">
    <h2>Thank you for your payment!</h2>
    <p>Your course has been successfully paid.</p>
    <p>You can download your invoice here: <a href="{0}">{0}</a></p>
    <p>We look forward to seeing you in the course!</p>
  </body>
</html>"#,
        invoice_url
    )
}
