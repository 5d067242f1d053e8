use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Name,
    Role,
    Salary,
    Terminated,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Business columns stay nullable: updates replace them verbatim.
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Employees::Name).text().null())
                    .col(ColumnDef::new(Employees::Role).text().null())
                    .col(ColumnDef::new(Employees::Salary).double().null())
                    .col(ColumnDef::new(Employees::Terminated).boolean().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Employees::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
