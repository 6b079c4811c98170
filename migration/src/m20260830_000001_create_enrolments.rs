use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enrolments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrolments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrolments::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(Enrolments::UserId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrolments::InvoiceUrl)
                            .string_len(512)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Enrolments::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Enrolments::PaymentStatus)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Enrolments::CourseEndDate)
                            .timestamp()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Enrolments::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Enrolments::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // A user cannot hold two enrolment rows for the same course
        manager
            .create_index(
                Index::create()
                    .name("uq_enrolments_user_course")
                    .table(Enrolments::Table)
                    .col(Enrolments::UserId)
                    .col(Enrolments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index for the daily expiry scan (status = active, course_end_date < now)
        manager
            .create_index(
                Index::create()
                    .name("idx_enrolments_status_end_date")
                    .table(Enrolments::Table)
                    .col(Enrolments::Status)
                    .col(Enrolments::CourseEndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrolments_user_id")
                    .table(Enrolments::Table)
                    .col(Enrolments::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrolments_course_id")
                    .table(Enrolments::Table)
                    .col(Enrolments::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Enrolments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Enrolments {
    Table,
    Id,
    CourseId,
    UserId,
    InvoiceUrl,
    Status,
    PaymentStatus,
    CourseEndDate,
    CreatedAt,
    UpdatedAt,
}
