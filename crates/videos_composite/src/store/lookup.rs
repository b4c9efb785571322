use sea_orm::{DatabaseConnection, DbErr, EntityTrait, JoinType, QueryOrder, QuerySelect, RelationTrait};
use videos_composite_entity::*;

use crate::store::{OfferingRow, VideoDetailRow};

/// 查询单个视频，开课与课程使用左连接，缺失时仍返回视频本身
pub async fn get_video(db: &DatabaseConnection, video_id: &str) -> Result<Option<VideoDetailRow>, DbErr> {
    video::Entity::find_by_id(video_id.to_owned())
        .select_only()
        .columns([
            video::Column::VideoId,
            video::Column::OfferingId,
            video::Column::ProfUni,
            video::Column::Title,
            video::Column::GcsPath,
            video::Column::UploadedAt,
        ])
        .column(course_offering::Column::CourseId)
        .column(course::Column::CourseName)
        .columns([
            course_offering::Column::Year,
            course_offering::Column::Semester,
            course_offering::Column::Section,
        ])
        .join(JoinType::LeftJoin, video::Relation::CourseOffering.def())
        .join(JoinType::LeftJoin, course_offering::Relation::Course.def())
        .into_model::<VideoDetailRow>()
        .one(db)
        .await
}

pub async fn list_offerings(db: &DatabaseConnection) -> Result<Vec<OfferingRow>, DbErr> {
    course_offering::Entity::find()
        .select_only()
        .columns([course_offering::Column::OfferingId, course_offering::Column::CourseId])
        .column(course::Column::CourseName)
        .columns([
            course_offering::Column::Year,
            course_offering::Column::Semester,
            course_offering::Column::Section,
        ])
        .join(JoinType::LeftJoin, course_offering::Relation::Course.def())
        .order_by_asc(course_offering::Column::OfferingId)
        .into_model::<OfferingRow>()
        .all(db)
        .await
}
