//! 开课与讲师的关联，只有已关联的讲师可以为该开课上传视频

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Default)]
#[sea_orm(table_name = "CourseInstructors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub offering_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub prof_uni: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_offering::Entity",
        from = "Column::OfferingId",
        to = "super::course_offering::Column::OfferingId"
    )]
    CourseOffering,
}

impl Related<super::course_offering::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseOffering.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
