use std::sync::Arc;

use axum::Router;
use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::DatabaseConnection;

use enrolments_backend::entities::enrolments::{self, PaymentStatus, Status};
use enrolments_backend::handlers::enrolment::api_router;
use enrolments_backend::repositories::enrolments::EnrolmentRepository;
use enrolments_backend::services::background::EmailJobQueue;
use enrolments_backend::services::courses::CoursesClient;
use enrolments_backend::services::email::HttpMailer;
use enrolments_backend::services::enrolments::EnrolmentService;
use enrolments_backend::services::invoices::InvoiceClient;
use enrolments_backend::services::users::UsersClient;
use enrolments_backend::AppState;

pub const HTTP_TIMEOUT_SECS: u64 = 5;

/// Build the app with all collaborators pointed at one mock server. The mock
/// server hosts the users service under `/users`, the courses service under
/// `/courses`, the invoice API at `/invoices.json`, and the mail API at
/// `/mail/send`.
pub fn test_router(db: DatabaseConnection, collaborators_base: &str) -> Router {
    let users = UsersClient::new(format!("{}/users", collaborators_base), HTTP_TIMEOUT_SECS);
    let courses = CoursesClient::new(format!("{}/courses", collaborators_base), HTTP_TIMEOUT_SECS);
    let invoices = InvoiceClient::new(
        format!("{}/invoices.json", collaborators_base),
        "test-token".to_string(),
        "Test Seller".to_string(),
    );
    let mailer = Arc::new(HttpMailer::new(
        format!("{}/mail/send", collaborators_base),
        "noreply@test.example".to_string(),
    ));
    let email_jobs = EmailJobQueue::spawn(mailer.clone(), 2);

    let enrolments = EnrolmentService::new(
        EnrolmentRepository::new(db.clone()),
        users,
        courses,
        invoices,
        mailer,
        email_jobs,
    );

    api_router(AppState { db, enrolments })
}

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn enrolment_model(
    id: i32,
    payment_status: PaymentStatus,
    status: Status,
    course_end_date: NaiveDateTime,
) -> enrolments::Model {
    enrolments::Model {
        id,
        course_id: 1,
        user_id: "123".to_string(),
        invoice_url: None,
        status,
        payment_status,
        course_end_date: Some(course_end_date),
        created_at: now(),
        updated_at: now(),
    }
}

pub fn pending_enrolment(id: i32) -> enrolments::Model {
    enrolment_model(
        id,
        PaymentStatus::Pending,
        Status::Active,
        now() + Duration::days(30),
    )
}

pub fn paid_enrolment(id: i32) -> enrolments::Model {
    let mut model = pending_enrolment(id);
    model.payment_status = PaymentStatus::Paid;
    model.invoice_url = Some("https://invoices.test.example/view/1".to_string());
    model
}

pub fn expired_active_enrolment(id: i32) -> enrolments::Model {
    enrolment_model(
        id,
        PaymentStatus::Paid,
        Status::Active,
        now() - Duration::days(1),
    )
}

pub fn completed_enrolment(id: i32) -> enrolments::Model {
    let mut model = expired_active_enrolment(id);
    model.status = Status::Completed;
    model
}
