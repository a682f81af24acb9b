use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create houses table
        manager
            .create_table(
                Table::create()
                    .table(Houses::Table)
                    .if_not_exists()
                    .col(pk_auto(Houses::Id))
                    .col(string(Houses::Name))
                    .col(string(Houses::Address))
                    .col(string_null(Houses::Description))
                    .to_owned(),
            )
            .await?;

        // Create rooms table
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(pk_auto(Rooms::Id))
                    .col(integer(Rooms::HouseId))
                    .col(string(Rooms::Name))
                    .col(decimal(Rooms::MonthlyRent).decimal_len(16, 4))
                    .col(string(Rooms::Status))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_house")
                            .from(Rooms::Table, Rooms::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create tenants table
        manager
            .create_table(
                Table::create()
                    .table(Tenants::Table)
                    .if_not_exists()
                    .col(pk_auto(Tenants::Id))
                    .col(string(Tenants::Name))
                    .col(string(Tenants::Phone))
                    .col(string_null(Tenants::Email))
                    .col(string_null(Tenants::IdCardNumber))
                    .col(string_null(Tenants::PhotoUrl))
                    .to_owned(),
            )
            .await?;

        // Create rents table. Tenant and room deletion is restricted while
        // an agreement is on file.
        manager
            .create_table(
                Table::create()
                    .table(Rents::Table)
                    .if_not_exists()
                    .col(pk_auto(Rents::Id))
                    .col(integer(Rents::TenantId))
                    .col(integer(Rents::RoomId))
                    .col(decimal(Rents::MonthlyRent).decimal_len(16, 4))
                    .col(integer(Rents::Months))
                    .col(decimal(Rents::TotalRent).decimal_len(16, 4))
                    .col(date(Rents::StartDate))
                    .col(date(Rents::EndDate))
                    .col(string_null(Rents::ContractUrl))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rents_tenant")
                            .from(Rents::Table, Rents::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rents_room")
                            .from(Rents::Table, Rents::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create monthly_services table, one bill per room per month
        manager
            .create_table(
                Table::create()
                    .table(MonthlyServices::Table)
                    .if_not_exists()
                    .col(pk_auto(MonthlyServices::Id))
                    .col(integer(MonthlyServices::RoomId))
                    .col(date(MonthlyServices::Month))
                    .col(decimal(MonthlyServices::WaterTotal).decimal_len(16, 4))
                    .col(decimal(MonthlyServices::ElectricityTotal).decimal_len(16, 4))
                    .col(decimal(MonthlyServices::TrashFee).decimal_len(16, 4))
                    .col(decimal(MonthlyServices::MaintenanceFee).decimal_len(16, 4))
                    .col(decimal(MonthlyServices::TotalAmount).decimal_len(16, 4))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_monthly_services_room")
                            .from(MonthlyServices::Table, MonthlyServices::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_monthly_services_room_month")
                    .table(MonthlyServices::Table)
                    .col(MonthlyServices::RoomId)
                    .col(MonthlyServices::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create maintenance_issues table (the price catalog)
        manager
            .create_table(
                Table::create()
                    .table(MaintenanceIssues::Table)
                    .if_not_exists()
                    .col(pk_auto(MaintenanceIssues::Id))
                    .col(string(MaintenanceIssues::Name))
                    .col(decimal(MaintenanceIssues::Price).decimal_len(16, 4))
                    .to_owned(),
            )
            .await?;

        // Create maintenance_requests table
        manager
            .create_table(
                Table::create()
                    .table(MaintenanceRequests::Table)
                    .if_not_exists()
                    .col(pk_auto(MaintenanceRequests::Id))
                    .col(integer(MaintenanceRequests::TenantId))
                    .col(integer(MaintenanceRequests::RoomId))
                    .col(decimal(MaintenanceRequests::TotalPrice).decimal_len(16, 4))
                    .col(string(MaintenanceRequests::Status))
                    .col(date(MaintenanceRequests::RequestedOn))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenance_requests_tenant")
                            .from(MaintenanceRequests::Table, MaintenanceRequests::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenance_requests_room")
                            .from(MaintenanceRequests::Table, MaintenanceRequests::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create maintenance_request_issues join table (price snapshot)
        manager
            .create_table(
                Table::create()
                    .table(MaintenanceRequestIssues::Table)
                    .if_not_exists()
                    .col(integer(MaintenanceRequestIssues::RequestId))
                    .col(integer(MaintenanceRequestIssues::IssueId))
                    .col(decimal(MaintenanceRequestIssues::Price).decimal_len(16, 4))
                    .primary_key(
                        Index::create()
                            .name("pk_maintenance_request_issues")
                            .col(MaintenanceRequestIssues::RequestId)
                            .col(MaintenanceRequestIssues::IssueId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenance_request_issues_request")
                            .from(
                                MaintenanceRequestIssues::Table,
                                MaintenanceRequestIssues::RequestId,
                            )
                            .to(MaintenanceRequests::Table, MaintenanceRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenance_request_issues_issue")
                            .from(
                                MaintenanceRequestIssues::Table,
                                MaintenanceRequestIssues::IssueId,
                            )
                            .to(MaintenanceIssues::Table, MaintenanceIssues::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create payments table. Ledger rows are append-only; every
        // obligation reference restricts deletion of its target.
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk_auto(Payments::Id))
                    .col(integer(Payments::TenantId))
                    .col(string(Payments::Kind))
                    .col(integer_null(Payments::RentId))
                    .col(integer_null(Payments::MonthlyServiceId))
                    .col(integer_null(Payments::MaintenanceRequestId))
                    .col(string(Payments::Entry))
                    .col(decimal(Payments::Amount).decimal_len(16, 4))
                    .col(decimal(Payments::BalanceAfter).decimal_len(16, 4))
                    .col(date(Payments::PaidOn))
                    .col(string_null(Payments::IdempotencyKey).unique_key())
                    .col(string_null(Payments::Note))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_tenant")
                            .from(Payments::Table, Payments::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_rent")
                            .from(Payments::Table, Payments::RentId)
                            .to(Rents::Table, Rents::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_monthly_service")
                            .from(Payments::Table, Payments::MonthlyServiceId)
                            .to(MonthlyServices::Table, MonthlyServices::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_maintenance_request")
                            .from(Payments::Table, Payments::MaintenanceRequestId)
                            .to(MaintenanceRequests::Table, MaintenanceRequests::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_tenant")
                    .table(Payments::Table)
                    .col(Payments::TenantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(MaintenanceRequestIssues::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(MaintenanceRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MaintenanceIssues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MonthlyServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tenants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Houses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
}

#[derive(DeriveIden)]
enum Houses {
    Table,
    Id,
    Name,
    Address,
    Description,
}

#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
    HouseId,
    Name,
    MonthlyRent,
    Status,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
    Name,
    Phone,
    Email,
    IdCardNumber,
    PhotoUrl,
}

#[derive(DeriveIden)]
enum Rents {
    Table,
    Id,
    TenantId,
    RoomId,
    MonthlyRent,
    Months,
    TotalRent,
    StartDate,
    EndDate,
    ContractUrl,
}

#[derive(DeriveIden)]
enum MonthlyServices {
    Table,
    Id,
    RoomId,
    Month,
    WaterTotal,
    ElectricityTotal,
    TrashFee,
    MaintenanceFee,
    TotalAmount,
}

#[derive(DeriveIden)]
enum MaintenanceIssues {
    Table,
    Id,
    Name,
    Price,
}

#[derive(DeriveIden)]
enum MaintenanceRequests {
    Table,
    Id,
    TenantId,
    RoomId,
    TotalPrice,
    Status,
    RequestedOn,
}

#[derive(DeriveIden)]
enum MaintenanceRequestIssues {
    Table,
    RequestId,
    IssueId,
    Price,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    TenantId,
    Kind,
    RentId,
    MonthlyServiceId,
    MaintenanceRequestId,
    Entry,
    Amount,
    BalanceAfter,
    PaidOn,
    IdempotencyKey,
    Note,
}
