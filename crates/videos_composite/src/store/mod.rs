//! 数据访问层：检索条件到 SQL 的转换、单条查询以及写入时的开课-讲师校验

mod guard;
mod lookup;
mod search;

use sea_orm::FromQueryResult;
use sea_orm::prelude::DateTime;
use serde::Serialize;

pub use guard::{InsertOutcome, NewVideo, insert_video_metadata};
pub use lookup::{get_video, list_offerings};
pub use search::search_videos;

/// 检索条件，所有给出的条件之间是“且”的关系，未给出的条件不做限制
#[derive(Debug, Default, Clone)]
pub struct VideoFilter {
    /// 标题关键字，大小写不敏感的子串匹配
    pub keyword: Option<String>,
    pub course_id: Option<String>,
    pub prof_uni: Option<String>,
    pub year: Option<i32>,
    pub semester: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct VideoRow {
    pub video_id: String,
    pub offering_id: String,
    pub prof_uni: String,
    pub title: String,
    pub gcs_path: String,
    pub uploaded_at: DateTime,
    pub course_id: String,
    pub course_name: String,
    pub year: i32,
    pub semester: String,
}

/// 单个视频的详情，开课或课程缺失时对应字段为空
#[derive(Debug, FromQueryResult, Serialize)]
pub struct VideoDetailRow {
    pub video_id: String,
    pub offering_id: String,
    pub prof_uni: String,
    pub title: String,
    pub gcs_path: String,
    pub uploaded_at: DateTime,
    pub course_id: Option<String>,
    pub course_name: Option<String>,
    pub year: Option<i32>,
    pub semester: Option<String>,
    pub section: Option<i32>,
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct OfferingRow {
    pub offering_id: String,
    pub course_id: String,
    pub course_name: Option<String>,
    pub year: i32,
    pub semester: String,
    pub section: Option<i32>,
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::path::Path;
    use std::time::Duration;

    use chrono::NaiveDate;
    use sea_orm::sea_query::OnConflict;
    use sea_orm::{ActiveValue::Set, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait};
    use videos_composite_entity::*;
    use videos_composite_migration::{Migrator, MigratorTrait};

    use super::DateTime;

    /// 内存 SQLite，连接池只保留一个连接，否则每个连接都会看到独立的空库
    pub async fn setup_database() -> DatabaseConnection {
        let mut option = ConnectOptions::new("sqlite::memory:");
        option.max_connections(1).min_connections(1).sqlx_logging(false);
        let connection = Database::connect(option).await.unwrap();
        Migrator::up(&connection, None).await.unwrap();
        connection
    }

    /// 文件 SQLite（WAL 模式），连接池允许两个连接同时持有各自的事务
    pub async fn setup_file_database(dir: &Path) -> DatabaseConnection {
        let url = format!("sqlite://{}?mode=rwc", dir.join("videos.db").display());
        let mut option = ConnectOptions::new(url);
        option
            .max_connections(2)
            .min_connections(1)
            .sqlx_logging(false)
            .map_sqlx_sqlite_opts(|opts| opts.busy_timeout(Duration::from_secs(10)));
        let connection = Database::connect(option).await.unwrap();
        // journal_mode 会写入数据库文件，之后新建的连接同样处于 WAL 模式
        connection.execute_unprepared("PRAGMA journal_mode = WAL").await.unwrap();
        Migrator::up(&connection, None).await.unwrap();
        connection
    }

    pub fn at_hour(hour: u32) -> DateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    /// 两门课程、三次开课、五个视频：
    ///
    /// | video | offering | prof   | course | year/semester |
    /// |-------|----------|--------|--------|---------------|
    /// | V1    | OFF1     | abc123 | C1     | 2024 Fall     |
    /// | V2    | OFF1     | abc123 | C1     | 2024 Fall     |
    /// | V3    | OFF2     | def456 | C1     | 2025 Spring   |
    /// | V4    | OFF3     | ghi789 | C2     | 2024 Fall     |
    /// | V5    | OFF3     | ghi789 | C2     | 2024 Fall     |
    ///
    /// 上传时间依次递增
    pub async fn seed_catalog(connection: &DatabaseConnection) {
        seed_courses(connection).await;
        let videos = [
            ("V1", "OFF1", "abc123", "Lecture 1: Relational Model"),
            ("V2", "OFF1", "abc123", "Lecture 2: SQL Basics"),
            ("V3", "OFF2", "def456", "Lecture 1: Query Planning"),
            ("V4", "OFF3", "ghi789", "Lecture 1: Processes"),
            ("V5", "OFF3", "ghi789", "Threads 100% explained"),
        ];
        for (hour, (video_id, offering_id, prof_uni, title)) in videos.into_iter().enumerate() {
            seed_association(connection, offering_id, prof_uni).await;
            video::Entity::insert(video::ActiveModel {
                video_id: Set(video_id.to_owned()),
                offering_id: Set(offering_id.to_owned()),
                prof_uni: Set(prof_uni.to_owned()),
                title: Set(title.to_owned()),
                gcs_path: Set(format!("gs://course-videos/{video_id}.mp4")),
                uploaded_at: Set(at_hour(hour as u32 + 1)),
            })
            .exec_without_returning(connection)
            .await
            .unwrap();
        }
    }

    pub async fn seed_courses(connection: &DatabaseConnection) {
        course::Entity::insert_many([
            course::ActiveModel {
                course_id: Set("C1".to_owned()),
                course_name: Set("Intro to Databases".to_owned()),
            },
            course::ActiveModel {
                course_id: Set("C2".to_owned()),
                course_name: Set("Operating Systems".to_owned()),
            },
        ])
        .exec_without_returning(connection)
        .await
        .unwrap();
        let offerings = [
            ("OFF1", "C1", 2024, "Fall", Some(1)),
            ("OFF2", "C1", 2025, "Spring", None),
            ("OFF3", "C2", 2024, "Fall", Some(2)),
        ];
        course_offering::Entity::insert_many(offerings.into_iter().map(
            |(offering_id, course_id, year, semester, section)| course_offering::ActiveModel {
                offering_id: Set(offering_id.to_owned()),
                course_id: Set(course_id.to_owned()),
                year: Set(year),
                semester: Set(semester.to_owned()),
                section: Set(section),
            },
        ))
        .exec_without_returning(connection)
        .await
        .unwrap();
    }

    pub async fn seed_association(connection: &DatabaseConnection, offering_id: &str, prof_uni: &str) {
        course_instructor::Entity::insert(course_instructor::ActiveModel {
            offering_id: Set(offering_id.to_owned()),
            prof_uni: Set(prof_uni.to_owned()),
        })
        .on_conflict(
            OnConflict::columns([course_instructor::Column::OfferingId, course_instructor::Column::ProfUni])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(connection)
        .await
        .unwrap();
    }
}
