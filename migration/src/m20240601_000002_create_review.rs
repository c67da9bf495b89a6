use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(string(Review::Id).primary_key())
                    .col(string(Review::MovieInfoId))
                    .col(string_null(Review::Comment))
                    .col(double_null(Review::Rating))
                    .to_owned(),
            )
            .await?;

        // Reviews carry no foreign key; the movie id is only a query key.
        manager
            .create_index(
                Index::create()
                    .name("idx_review_movie_info_id")
                    .table(Review::Table)
                    .col(Review::MovieInfoId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Review {
    Table,
    Id,
    MovieInfoId,
    Comment,
    Rating,
}
