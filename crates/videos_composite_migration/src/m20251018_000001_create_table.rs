use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::CourseId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::CourseName).string().not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(CourseOfferings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseOfferings::OfferingId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseOfferings::CourseId).string_len(64).not_null())
                    .col(ColumnDef::new(CourseOfferings::Year).integer().not_null())
                    .col(ColumnDef::new(CourseOfferings::Semester).string_len(32).not_null())
                    .col(ColumnDef::new(CourseOfferings::Section).integer().null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CourseOfferings::Table)
                    .name("idx_course_offerings_course_id")
                    .col(CourseOfferings::CourseId)
                    .to_owned(),
            )
            .await?;
        // 同一开课与同一讲师只允许一条关联
        manager
            .create_table(
                Table::create()
                    .table(CourseInstructors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseInstructors::OfferingId).string_len(64).not_null())
                    .col(ColumnDef::new(CourseInstructors::ProfUni).string_len(64).not_null())
                    .primary_key(
                        Index::create()
                            .col(CourseInstructors::OfferingId)
                            .col(CourseInstructors::ProfUni),
                    )
                    .to_owned(),
            )
            .await?;
        // 视频不对 offering_id 加外键，查询单个视频时需要允许开课缺失
        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Videos::VideoId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Videos::OfferingId).string_len(64).not_null())
                    .col(ColumnDef::new(Videos::ProfUni).string_len(64).not_null())
                    .col(ColumnDef::new(Videos::Title).string().not_null())
                    .col(ColumnDef::new(Videos::GcsPath).string_len(1024).not_null())
                    .col(
                        ColumnDef::new(Videos::UploadedAt)
                            .timestamp()
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Videos::Table).to_owned()).await?;
        manager
            .drop_table(Table::drop().table(CourseInstructors::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .table(CourseOfferings::Table)
                    .name("idx_course_offerings_course_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(CourseOfferings::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Courses::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "Courses")]
    Table,
    CourseId,
    CourseName,
}

#[derive(DeriveIden)]
enum CourseOfferings {
    #[sea_orm(iden = "CourseOfferings")]
    Table,
    OfferingId,
    CourseId,
    Year,
    Semester,
    Section,
}

#[derive(DeriveIden)]
enum CourseInstructors {
    #[sea_orm(iden = "CourseInstructors")]
    Table,
    OfferingId,
    ProfUni,
}

#[derive(DeriveIden)]
enum Videos {
    #[sea_orm(iden = "Videos")]
    Table,
    VideoId,
    OfferingId,
    ProfUni,
    Title,
    GcsPath,
    UploadedAt,
}
