use tokio::time::{interval, Duration};

use crate::services::enrolments::EnrolmentService;

/// Spawn the daily expiry loop. Each tick completes every ACTIVE enrolment
/// whose course end date has passed. The update is idempotent per row, so an
/// overlapping run on another instance causes no harm.
pub async fn start_enrolment_expiry_job(service: EnrolmentService, interval_secs: u64) {
    tokio::spawn(async move {
        let mut interval = interval(Duration::from_secs(interval_secs));

        loop {
            interval.tick().await;
            tracing::info!("Running enrolment expiration job");

            match service.expired_courses().await {
                Ok(expired) => {
                    tracing::info!(
                        "Finished enrolment expiration job, {} enrolments completed",
                        expired.len()
                    );
                }
                Err(e) => {
                    tracing::error!("Enrolment expiration job failed: {}", e);
                }
            }
        }
    });
}
