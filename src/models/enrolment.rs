use serde::{Deserialize, Serialize};

use crate::entities::enrolments::{self, PaymentStatus, Status};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnrolmentRequest {
    pub user_id: String,
    pub course_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPaidRequest {
    pub enrolment_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrolmentByUserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrolmentResponse {
    pub id: i32,
    pub user_id: String,
    pub course_id: i32,
    pub status: Status,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrolmentListResponse {
    pub enrolments: Vec<EnrolmentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

impl From<enrolments::Model> for EnrolmentResponse {
    fn from(model: enrolments::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            status: model.status,
            payment_status: model.payment_status,
            invoice_url: model.invoice_url,
        }
    }
}

impl From<Vec<enrolments::Model>> for EnrolmentListResponse {
    fn from(models: Vec<enrolments::Model>) -> Self {
        Self {
            enrolments: models.into_iter().map(EnrolmentResponse::from).collect(),
        }
    }
}
