// src/lib.rs

use sea_orm::DatabaseConnection;
use services::enrolments::EnrolmentService;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub enrolments: EnrolmentService,
}

pub mod entities {
    pub mod prelude;
    pub mod enrolments;
}

pub mod repositories {
    pub mod enrolments;
}

pub mod services {
    pub mod background;
    pub mod courses;
    pub mod email;
    pub mod enrolments;
    pub mod invoices;
    pub mod users;
}

pub mod models {
    pub mod enrolment;
}

pub mod handlers {
    pub mod enrolment;
}

pub mod config;
pub mod error;
pub mod jobs;
