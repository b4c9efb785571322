//! 视频元数据，每条记录都属于且仅属于一个开课

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Default)]
#[sea_orm(table_name = "Videos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub video_id: String,
    pub offering_id: String,
    pub prof_uni: String,
    pub title: String,
    pub gcs_path: String,
    pub uploaded_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_offering::Entity",
        from = "Column::OfferingId",
        to = "super::course_offering::Column::OfferingId"
    )]
    CourseOffering,
    /// 上传者与所属开课的关联记录
    #[sea_orm(
        belongs_to = "super::course_instructor::Entity",
        from = "(Column::OfferingId, Column::ProfUni)",
        to = "(super::course_instructor::Column::OfferingId, super::course_instructor::Column::ProfUni)"
    )]
    CourseInstructor,
}

impl Related<super::course_offering::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseOffering.def()
    }
}

impl Related<super::course_instructor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseInstructor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
