//! Enrolment workflow service.
//!
//! Orchestrates the enrolment lifecycle: creation (validate user and course
//! over HTTP, persist, confirmation email), payment (idempotency guard,
//! invoice creation, background email), expiry, and plain lookups. All
//! collaborators are injected through the constructor.

use std::sync::Arc;

use chrono::NaiveTime;

use crate::entities::enrolments::{self, PaymentStatus};
use crate::error::{ApiError, ApiResult};
use crate::repositories::enrolments::EnrolmentRepository;
use crate::services::background::{EmailJob, EmailJobQueue};
use crate::services::courses::CoursesClient;
use crate::services::email::{
    enrolment_confirmation_html, payment_confirmation_html, Mailer,
};
use crate::services::invoices::{InvoiceClient, InvoiceRequest};
use crate::services::users::UsersClient;

#[derive(Clone)]
pub struct EnrolmentService {
    repo: EnrolmentRepository,
    users: UsersClient,
    courses: CoursesClient,
    invoices: InvoiceClient,
    mailer: Arc<dyn Mailer>,
    email_jobs: EmailJobQueue,
}

impl EnrolmentService {
    pub fn new(
        repo: EnrolmentRepository,
        users: UsersClient,
        courses: CoursesClient,
        invoices: InvoiceClient,
        mailer: Arc<dyn Mailer>,
        email_jobs: EmailJobQueue,
    ) -> Self {
        Self {
            repo,
            users,
            courses,
            invoices,
            mailer,
            email_jobs,
        }
    }

    /// Enrol a user in a course. The user and course are validated against
    /// their owning services; the course end date is denormalized onto the row
    /// so the expiry scan never has to call the courses service.
    pub async fn create_enrolment_for_user(
        &self,
        user_id: &str,
        course_id: i32,
    ) -> ApiResult<enrolments::Model> {
        let user = self.users.get_by_id(user_id).await?;
        let course = self.courses.get_by_id(course_id).await?;

        let course_end_date = course.end_date.map(|date| date.and_time(NaiveTime::MIN));

        let entity = self
            .repo
            .insert(user_id, course.id, course_end_date)
            .await
            .map_err(ApiError::from)?;

        // The enrolment stands even when the confirmation email fails; mail is
        // best-effort and the failure is only logged.
        let html = enrolment_confirmation_html(&course.name);
        if let Err(e) = self
            .mailer
            .send(&user.email, "Course enrolment confirmation", &html)
            .await
        {
            tracing::warn!(
                "Failed to send enrolment confirmation to {}: {}",
                user.email,
                e
            );
        }

        tracing::info!(
            "Created enrolment {} (user {}, course {})",
            entity.id,
            entity.user_id,
            entity.course_id
        );

        Ok(entity)
    }

    /// Mark an enrolment as paid, issue the invoice, and queue the payment
    /// confirmation email. Calling this twice is a conflict: the guard runs
    /// before any collaborator call, so a paid enrolment is never re-invoiced.
    pub async fn set_paid(&self, enrolment_id: i32) -> ApiResult<enrolments::Model> {
        let enrolment = self
            .repo
            .find_by_id(enrolment_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Enrolment not found".to_string()))?;

        if enrolment.payment_status == PaymentStatus::Paid {
            return Err(ApiError::Conflict("Enrolment already paid".to_string()));
        }

        let user = self.users.get_by_id(&enrolment.user_id).await?;
        let course = self.courses.get_by_id(enrolment.course_id).await?;

        let invoice = InvoiceRequest {
            client_name: user.full_name(),
            client_email: user.email.clone(),
            course_name: course.name,
            price: course.price,
        };
        let invoice_url = self.invoices.create_invoice(&invoice).await?;

        // Fire-and-forget: the HTTP response is not blocked on mail delivery.
        self.email_jobs.submit(EmailJob {
            to: user.email,
            subject: "Your course payment confirmation".to_string(),
            html: payment_confirmation_html(&invoice_url),
        });

        let updated = self.repo.mark_paid(enrolment, invoice_url).await?;

        tracing::info!("Enrolment {} marked as paid", updated.id);

        Ok(updated)
    }

    /// Complete every ACTIVE enrolment whose course has ended. Idempotent: a
    /// second run finds nothing left to expire and returns an empty list.
    pub async fn expired_courses(&self) -> ApiResult<Vec<enrolments::Model>> {
        let updated = self.repo.mark_expired_completed().await?;

        if !updated.is_empty() {
            tracing::info!("Expired {} enrolments", updated.len());
        }

        Ok(updated)
    }

    pub async fn get_by_id(&self, enrolment_id: i32) -> ApiResult<enrolments::Model> {
        self.repo
            .find_by_id(enrolment_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Enrolment not found".to_string()))
    }

    pub async fn get_by_id_and_user(
        &self,
        enrolment_id: i32,
        user_id: &str,
    ) -> ApiResult<enrolments::Model> {
        self.repo
            .find_by_id_and_user(enrolment_id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Enrolment not found".to_string()))
    }

    pub async fn get_active(&self) -> ApiResult<Vec<enrolments::Model>> {
        let enrolments = self.repo.find_active().await?;

        if enrolments.is_empty() {
            return Err(ApiError::NotFound("Enrolments not found".to_string()));
        }

        Ok(enrolments)
    }

    pub async fn delete_by_id(&self, enrolment_id: i32) -> ApiResult<()> {
        let rows_affected = self.repo.delete_by_id(enrolment_id).await?;

        if rows_affected == 0 {
            return Err(ApiError::NotFound("Enrolment not found".to_string()));
        }

        Ok(())
    }
}
