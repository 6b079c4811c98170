use std::sync::Arc;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use enrolments_backend::config::Settings;
use enrolments_backend::handlers::enrolment::api_router;
use enrolments_backend::jobs::enrolment_expiry::start_enrolment_expiry_job;
use enrolments_backend::repositories::enrolments::EnrolmentRepository;
use enrolments_backend::services::background::EmailJobQueue;
use enrolments_backend::services::courses::CoursesClient;
use enrolments_backend::services::email::HttpMailer;
use enrolments_backend::services::enrolments::EnrolmentService;
use enrolments_backend::services::invoices::InvoiceClient;
use enrolments_backend::services::users::UsersClient;
use enrolments_backend::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,enrolments_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();
    let settings = Settings::from_env().expect("Missing required environment variables");

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    // Collaborator clients and the background email workers
    let users = UsersClient::new(settings.users_service_url.clone(), settings.http_timeout_secs);
    let courses = CoursesClient::new(
        settings.course_service_url.clone(),
        settings.http_timeout_secs,
    );
    let invoices = InvoiceClient::new(
        settings.invoice_api_url.clone(),
        settings.invoice_api_token.clone(),
        settings.invoice_seller_name.clone(),
    );
    let mailer = Arc::new(HttpMailer::new(
        settings.mail_api_url.clone(),
        settings.mail_default_sender.clone(),
    ));
    let email_jobs = EmailJobQueue::spawn(mailer.clone(), settings.email_workers);

    let enrolments = EnrolmentService::new(
        EnrolmentRepository::new(db.clone()),
        users,
        courses,
        invoices,
        mailer,
        email_jobs,
    );

    // Daily expiry job
    start_enrolment_expiry_job(enrolments.clone(), settings.expiry_interval_secs).await;

    let state = AppState { db, enrolments };

    // Build router
    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(
        "Enrolments service listening on {}",
        listener.local_addr().expect("listener has no local addr")
    );

    axum::serve(listener, app).await.expect("Server error");
}
