//! Data access for enrolment rows.
//!
//! The repository owns every SeaORM query for the enrolments table. The
//! workflow service above it never touches the connection directly, so the
//! transaction scope for the batch expiry lives here.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::entities::enrolments::{self, PaymentStatus, Status};
use crate::entities::prelude::Enrolments;

#[derive(Clone)]
pub struct EnrolmentRepository {
    db: DatabaseConnection,
}

impl EnrolmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a fresh ACTIVE/PENDING enrolment row. The unique index on
    /// (user_id, course_id) rejects duplicates at the database level.
    pub async fn insert(
        &self,
        user_id: &str,
        course_id: i32,
        course_end_date: Option<chrono::NaiveDateTime>,
    ) -> Result<enrolments::Model, sea_orm::DbErr> {
        let now = Utc::now().naive_utc();

        let entity = enrolments::ActiveModel {
            user_id: Set(user_id.to_string()),
            course_id: Set(course_id),
            status: Set(Status::Active),
            payment_status: Set(PaymentStatus::Pending),
            invoice_url: Set(None),
            course_end_date: Set(course_end_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        entity.insert(&self.db).await
    }

    pub async fn find_by_id(
        &self,
        enrolment_id: i32,
    ) -> Result<Option<enrolments::Model>, sea_orm::DbErr> {
        Enrolments::find_by_id(enrolment_id).one(&self.db).await
    }

    pub async fn find_by_id_and_user(
        &self,
        enrolment_id: i32,
        user_id: &str,
    ) -> Result<Option<enrolments::Model>, sea_orm::DbErr> {
        Enrolments::find()
            .filter(enrolments::Column::Id.eq(enrolment_id))
            .filter(enrolments::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    pub async fn find_active(&self) -> Result<Vec<enrolments::Model>, sea_orm::DbErr> {
        Enrolments::find()
            .filter(enrolments::Column::Status.eq(Status::Active))
            .all(&self.db)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<enrolments::Model>, sea_orm::DbErr> {
        Enrolments::find().all(&self.db).await
    }

    /// Persist the PENDING -> PAID transition together with the invoice URL.
    pub async fn mark_paid(
        &self,
        enrolment: enrolments::Model,
        invoice_url: String,
    ) -> Result<enrolments::Model, sea_orm::DbErr> {
        let mut active: enrolments::ActiveModel = enrolment.into();
        active.payment_status = Set(PaymentStatus::Paid);
        active.invoice_url = Set(Some(invoice_url));
        active.updated_at = Set(Utc::now().naive_utc());
        active.update(&self.db).await
    }

    /// Transition every ACTIVE enrolment whose course end date has passed to
    /// COMPLETED, in one transaction, and return the updated rows.
    pub async fn mark_expired_completed(
        &self,
    ) -> Result<Vec<enrolments::Model>, sea_orm::DbErr> {
        let now = Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        let to_expire = Enrolments::find()
            .filter(enrolments::Column::Status.eq(Status::Active))
            .filter(enrolments::Column::CourseEndDate.lt(now))
            .all(&txn)
            .await?;

        let mut updated = Vec::with_capacity(to_expire.len());
        for enrolment in to_expire {
            let mut active: enrolments::ActiveModel = enrolment.into();
            active.status = Set(Status::Completed);
            active.updated_at = Set(now);
            updated.push(active.update(&txn).await?);
        }

        txn.commit().await?;
        Ok(updated)
    }

    pub async fn delete_by_id(&self, enrolment_id: i32) -> Result<u64, sea_orm::DbErr> {
        let result = Enrolments::delete_by_id(enrolment_id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
