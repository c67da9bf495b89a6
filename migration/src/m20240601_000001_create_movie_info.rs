use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MovieInfo::Table)
                    .if_not_exists()
                    .col(string(MovieInfo::Id).primary_key())
                    .col(string(MovieInfo::Name))
                    .col(integer(MovieInfo::Year))
                    .col(json(MovieInfo::Cast))
                    .col(string_null(MovieInfo::ReleaseDate))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_info_year")
                    .table(MovieInfo::Table)
                    .col(MovieInfo::Year)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_info_name")
                    .table(MovieInfo::Table)
                    .col(MovieInfo::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MovieInfo::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum MovieInfo {
    Table,
    Id,
    Name,
    Year,
    Cast,
    ReleaseDate,
}
