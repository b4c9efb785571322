use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Videos::Table)
                    .name("idx_videos_uploaded_at")
                    .col(Videos::UploadedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Videos::Table)
                    .name("idx_videos_offering_id")
                    .col(Videos::OfferingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().table(Videos::Table).name("idx_videos_offering_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().table(Videos::Table).name("idx_videos_uploaded_at").to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Videos {
    #[sea_orm(iden = "Videos")]
    Table,
    OfferingId,
    UploadedAt,
}
