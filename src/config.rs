//! Environment-backed configuration for the enrolments service.

use std::env;

/// Runtime settings, loaded once at startup. Required variables abort startup
/// when missing; the rest fall back to sensible defaults.
#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub users_service_url: String,
    pub course_service_url: String,
    pub invoice_api_url: String,
    pub invoice_api_token: String,
    pub invoice_seller_name: String,
    pub mail_api_url: String,
    pub mail_default_sender: String,
    pub http_timeout_secs: u64,
    pub expiry_interval_secs: u64,
    pub email_workers: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, env::VarError> {
        // Either a full invoice API URL or the fakturownia account domain
        let invoice_api_url = match env::var("INVOICE_API_URL") {
            Ok(url) => url,
            Err(_) => format!(
                "https://{}.fakturownia.pl/invoices.json",
                env::var("INVOICE_DOMAIN")?
            ),
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            users_service_url: env::var("USERS_SERVICE_URL")?,
            course_service_url: env::var("COURSE_SERVICE_URL")?,
            invoice_api_url,
            invoice_api_token: env::var("INVOICE_API_TOKEN")?,
            invoice_seller_name: env::var("INVOICE_SELLER_NAME")
                .unwrap_or_else(|_| "Course Platform".to_string()),
            mail_api_url: env::var("MAIL_API_URL")?,
            mail_default_sender: env::var("MAIL_DEFAULT_SENDER")
                .unwrap_or_else(|_| "noreply@example.com".to_string()),
            http_timeout_secs: parse_or("HTTP_TIMEOUT", 5),
            expiry_interval_secs: parse_or("EXPIRY_INTERVAL_SECS", 86400),
            email_workers: parse_or("EMAIL_WORKERS", 2),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
