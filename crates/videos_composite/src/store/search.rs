use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use videos_composite_entity::*;

use crate::store::{Pagination, VideoFilter, VideoRow};

const LIKE_ESCAPE: char = '!';

/// 按给定条件检索视频，结果按上传时间倒序排列并分页
///
/// 视频会与所属开课、课程以及上传者的关联记录做内连接，缺少任一方的视频不会出现在结果中
pub async fn search_videos(
    db: &DatabaseConnection,
    filter: &VideoFilter,
    pagination: Pagination,
) -> Result<Vec<VideoRow>, DbErr> {
    let mut query = video::Entity::find()
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
        .columns([course_offering::Column::Year, course_offering::Column::Semester])
        .join(JoinType::InnerJoin, video::Relation::CourseOffering.def())
        .join(JoinType::InnerJoin, course_offering::Relation::Course.def())
        .join(JoinType::InnerJoin, video::Relation::CourseInstructor.def());
    if let Some(keyword) = filter.keyword.as_deref() {
        // SQLite 的 LOWER() 只处理 ASCII 字母，两侧保持一致，非 ASCII 字符按原样比较
        let pattern = format!("%{}%", escape_like(&keyword.to_ascii_lowercase()));
        query = query.filter(
            Expr::expr(Func::lower(Expr::col((video::Entity, video::Column::Title))))
                .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
        );
    }
    if let Some(course_id) = filter.course_id.as_deref() {
        query = query.filter(course_offering::Column::CourseId.eq(course_id));
    }
    if let Some(prof_uni) = filter.prof_uni.as_deref() {
        query = query.filter(video::Column::ProfUni.eq(prof_uni));
    }
    if let Some(year) = filter.year {
        query = query.filter(course_offering::Column::Year.eq(year));
    }
    if let Some(semester) = filter.semester.as_deref() {
        query = query.filter(course_offering::Column::Semester.eq(semester));
    }
    query
        // 上传时间相同时按 id 排序，保证分页结果稳定
        .order_by_desc(video::Column::UploadedAt)
        .order_by_asc(video::Column::VideoId)
        .limit(pagination.limit)
        .offset(pagination.offset)
        .into_model::<VideoRow>()
        .all(db)
        .await
}

/// 关键字中的通配符按字面匹配
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_utils::{seed_catalog, setup_database};

    const ALL: Pagination = Pagination { limit: 20, offset: 0 };

    async fn ids(db: &DatabaseConnection, filter: VideoFilter, pagination: Pagination) -> Vec<String> {
        search_videos(db, &filter, pagination)
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.video_id)
            .collect()
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("intro"), "intro");
        assert_eq!(escape_like("100%"), "100!%");
        assert_eq!(escape_like("a_b!c"), "a!_b!!c");
    }

    #[tokio::test]
    async fn test_search_without_filter() {
        let db = setup_database().await;
        seed_catalog(&db).await;
        assert_eq!(ids(&db, VideoFilter::default(), ALL).await, ["V5", "V4", "V3", "V2", "V1"]);
        let rows = search_videos(&db, &VideoFilter::default(), ALL).await.unwrap();
        assert!(rows.windows(2).all(|pair| pair[0].uploaded_at >= pair[1].uploaded_at));
        let v3 = rows.iter().find(|row| row.video_id == "V3").unwrap();
        assert_eq!(v3.offering_id, "OFF2");
        assert_eq!(v3.prof_uni, "def456");
        assert_eq!(v3.course_id, "C1");
        assert_eq!(v3.course_name, "Intro to Databases");
        assert_eq!(v3.year, 2025);
        assert_eq!(v3.semester, "Spring");
        assert_eq!(v3.gcs_path, "gs://course-videos/V3.mp4");
    }

    #[tokio::test]
    async fn test_search_keyword() {
        let db = setup_database().await;
        seed_catalog(&db).await;
        let keyword = |k: &str| VideoFilter {
            keyword: Some(k.to_owned()),
            ..Default::default()
        };
        assert_eq!(ids(&db, keyword("lecture 1"), ALL).await, ["V4", "V3", "V1"]);
        assert_eq!(ids(&db, keyword("SQL"), ALL).await, ["V2"]);
        assert_eq!(ids(&db, keyword("sql"), ALL).await, ["V2"]);
        // 通配符按字面匹配
        assert_eq!(ids(&db, keyword("100%"), ALL).await, ["V5"]);
        assert_eq!(ids(&db, keyword("%"), ALL).await, ["V5"]);
        assert!(ids(&db, keyword("_"), ALL).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_keyword_non_ascii() {
        let db = setup_database().await;
        seed_catalog(&db).await;
        video::Entity::insert(video::ActiveModel {
            video_id: sea_orm::Set("V6".to_owned()),
            offering_id: sea_orm::Set("OFF1".to_owned()),
            prof_uni: sea_orm::Set("abc123".to_owned()),
            title: sea_orm::Set("Études de cas".to_owned()),
            gcs_path: sea_orm::Set("gs://course-videos/V6.mp4".to_owned()),
            uploaded_at: sea_orm::Set(crate::store::test_utils::at_hour(23)),
        })
        .exec_without_returning(&db)
        .await
        .unwrap();
        let keyword = |k: &str| VideoFilter {
            keyword: Some(k.to_owned()),
            ..Default::default()
        };
        assert_eq!(ids(&db, keyword("Études"), ALL).await, ["V6"]);
        // ASCII 部分大小写不敏感，É 保持原样
        assert_eq!(ids(&db, keyword("ÉTUDES DE"), ALL).await, ["V6"]);
    }

    #[tokio::test]
    async fn test_search_conjunctive_filters() {
        let db = setup_database().await;
        seed_catalog(&db).await;
        let filter = VideoFilter {
            keyword: Some("LECTURE".to_owned()),
            course_id: Some("C1".to_owned()),
            ..Default::default()
        };
        assert_eq!(ids(&db, filter, ALL).await, ["V3", "V2", "V1"]);
        let filter = VideoFilter {
            course_id: Some("C1".to_owned()),
            year: Some(2024),
            semester: Some("Fall".to_owned()),
            ..Default::default()
        };
        assert_eq!(ids(&db, filter, ALL).await, ["V2", "V1"]);
        let filter = VideoFilter {
            prof_uni: Some("ghi789".to_owned()),
            ..Default::default()
        };
        assert_eq!(ids(&db, filter, ALL).await, ["V5", "V4"]);
        let filter = VideoFilter {
            year: Some(2024),
            keyword: Some("lecture 1".to_owned()),
            ..Default::default()
        };
        let rows = search_videos(&db, &filter, ALL).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.year == 2024 && row.title.to_lowercase().contains("lecture 1")));
    }

    #[tokio::test]
    async fn test_search_unmatched_is_empty() {
        let db = setup_database().await;
        seed_catalog(&db).await;
        let filter = VideoFilter {
            course_id: Some("C404".to_owned()),
            ..Default::default()
        };
        assert!(ids(&db, filter, ALL).await.is_empty());
        let filter = VideoFilter {
            prof_uni: Some("abc123".to_owned()),
            semester: Some("Spring".to_owned()),
            ..Default::default()
        };
        assert!(ids(&db, filter, ALL).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_pagination() {
        let db = setup_database().await;
        seed_catalog(&db).await;
        let page = |limit, offset| Pagination { limit, offset };
        assert_eq!(ids(&db, VideoFilter::default(), page(2, 0)).await, ["V5", "V4"]);
        assert_eq!(ids(&db, VideoFilter::default(), page(2, 1)).await, ["V4", "V3"]);
        assert_eq!(ids(&db, VideoFilter::default(), page(2, 4)).await, ["V1"]);
        assert!(ids(&db, VideoFilter::default(), page(2, 5)).await.is_empty());
        assert!(ids(&db, VideoFilter::default(), page(0, 0)).await.is_empty());
        let filter = VideoFilter {
            course_id: Some("C1".to_owned()),
            ..Default::default()
        };
        assert_eq!(ids(&db, filter, page(1, 1)).await, ["V2"]);
    }

    #[tokio::test]
    async fn test_search_skips_video_without_offering() {
        let db = setup_database().await;
        seed_catalog(&db).await;
        crate::store::test_utils::seed_association(&db, "OFF404", "abc123").await;
        video::Entity::insert(video::ActiveModel {
            video_id: sea_orm::Set("V6".to_owned()),
            offering_id: sea_orm::Set("OFF404".to_owned()),
            prof_uni: sea_orm::Set("abc123".to_owned()),
            title: sea_orm::Set("Orphan".to_owned()),
            gcs_path: sea_orm::Set("gs://course-videos/V6.mp4".to_owned()),
            uploaded_at: sea_orm::Set(crate::store::test_utils::at_hour(23)),
        })
        .exec_without_returning(&db)
        .await
        .unwrap();
        assert_eq!(ids(&db, VideoFilter::default(), ALL).await, ["V5", "V4", "V3", "V2", "V1"]);
    }
}
