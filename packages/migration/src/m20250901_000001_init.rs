use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Query, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Statuses {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Candidates {
    Table,
    Id,
    Name,
    PhoneNumber,
    Email,
    PasswordHash,
    Role,
    StatusId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Employers {
    Table,
    Id,
    Name,
    Company,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Vacancies {
    Table,
    Id,
    EmployerId,
    Title,
    Description,
    Salary,
    IsOpen,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Responses {
    Table,
    Id,
    CandidateId,
    VacancyId,
    StatusId,
    Message,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // statuses
        manager
            .create_table(
                Table::create()
                    .table(Statuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Statuses::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Statuses::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // seeded application statuses
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(Statuses::Table)
                    .columns([Statuses::Name])
                    .values_panic(["pending".into()])
                    .values_panic(["accepted".into()])
                    .values_panic(["rejected".into()])
                    .to_owned(),
            )
            .await?;

        // candidates
        manager
            .create_table(
                Table::create()
                    .table(Candidates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Candidates::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Candidates::Name).string().not_null())
                    .col(ColumnDef::new(Candidates::PhoneNumber).string().not_null())
                    .col(
                        ColumnDef::new(Candidates::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Candidates::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Candidates::Role)
                            .string()
                            .not_null()
                            .default("candidate"),
                    )
                    .col(ColumnDef::new(Candidates::StatusId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Candidates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Candidates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Candidates::Table, Candidates::StatusId)
                            .to(Statuses::Table, Statuses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // employers
        manager
            .create_table(
                Table::create()
                    .table(Employers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Employers::Name).string().not_null())
                    .col(ColumnDef::new(Employers::Company).string().not_null())
                    .col(
                        ColumnDef::new(Employers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employers::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Employers::Role)
                            .string()
                            .not_null()
                            .default("employee"),
                    )
                    .col(
                        ColumnDef::new(Employers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // vacancies
        manager
            .create_table(
                Table::create()
                    .table(Vacancies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vacancies::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Vacancies::EmployerId).big_integer().not_null())
                    .col(ColumnDef::new(Vacancies::Title).string().not_null())
                    .col(ColumnDef::new(Vacancies::Description).text().not_null())
                    .col(ColumnDef::new(Vacancies::Salary).big_integer().null())
                    .col(
                        ColumnDef::new(Vacancies::IsOpen)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Vacancies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vacancies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Vacancies::Table, Vacancies::EmployerId)
                            .to(Employers::Table, Employers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_vacancies_employer_id")
                    .table(Vacancies::Table)
                    .col(Vacancies::EmployerId)
                    .to_owned(),
            )
            .await?;

        // responses
        manager
            .create_table(
                Table::create()
                    .table(Responses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Responses::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Responses::CandidateId).big_integer().not_null())
                    .col(ColumnDef::new(Responses::VacancyId).big_integer().not_null())
                    .col(ColumnDef::new(Responses::StatusId).big_integer().not_null())
                    .col(ColumnDef::new(Responses::Message).text().null())
                    .col(
                        ColumnDef::new(Responses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Responses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Responses::Table, Responses::CandidateId)
                            .to(Candidates::Table, Candidates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Responses::Table, Responses::VacancyId)
                            .to(Vacancies::Table, Vacancies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Responses::Table, Responses::StatusId)
                            .to(Statuses::Table, Statuses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // one application per candidate per vacancy
        manager
            .create_index(
                Index::create()
                    .name("ux_responses_candidate_vacancy")
                    .table(Responses::Table)
                    .col(Responses::CandidateId)
                    .col(Responses::VacancyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_responses_candidate_vacancy")
                    .table(Responses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Responses::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_vacancies_employer_id")
                    .table(Vacancies::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Vacancies::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Candidates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Statuses::Table).to_owned())
            .await?;

        Ok(())
    }
}
