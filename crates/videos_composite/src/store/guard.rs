use sea_orm::ActiveValue::Set;
use sea_orm::prelude::DateTime;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::sqlx::mysql::MySqlDatabaseError;
use sea_orm::sqlx::sqlite::SqliteError;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, RuntimeErr, TransactionTrait, sqlx,
};
use videos_composite_entity::*;

/// 事务因死锁或锁等待失败时，整个事务最多执行的次数
const MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub video_id: String,
    pub offering_id: String,
    pub prof_uni: String,
    pub title: String,
    pub gcs_path: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// 视频已写入，`registered` 表示本次同时登记了该开课的首位讲师
    Inserted { registered: bool },
    /// 开课已关联了其他讲师，视频未写入
    Rejected { instructors: Vec<String> },
}

/// 写入视频元数据，写入前校验上传者是否为该开课的讲师
///
/// - 开课还没有任何关联讲师：登记上传者后写入
/// - 上传者已关联：直接写入
/// - 开课关联了其他讲师：拒绝，不写入视频
///
/// 校验与写入在同一个事务中完成，首位讲师的登记是一条条件插入语句，
/// 并发提交同一个新开课时只有一方能登记成功，另一方会按已有关联重新校验。
/// MySQL 在并发登记时可能判定死锁并中止其中一方，此时整个事务重新执行，
/// 重新执行时能看到对方已提交的关联
pub async fn insert_video_metadata(
    db: &DatabaseConnection,
    new_video: NewVideo,
    uploaded_at: DateTime,
) -> Result<InsertOutcome, DbErr> {
    let mut attempt = 1;
    loop {
        let txn = db.begin().await?;
        let outcome = guarded_insert(&txn, &new_video, uploaded_at).await;
        let result = match outcome {
            Ok(outcome @ InsertOutcome::Inserted { .. }) => txn.commit().await.map(|_| outcome),
            Ok(outcome @ InsertOutcome::Rejected { .. }) => txn.rollback().await.map(|_| outcome),
            // 未提交的事务在 drop 时回滚
            Err(e) => Err(e),
        };
        match result {
            Err(e) if attempt < MAX_ATTEMPTS && is_lock_conflict(&e) => {
                warn!(
                    "写入视频 {} 时遇到锁冲突，第 {attempt} 次重试：{e}",
                    new_video.video_id
                );
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// 在给定事务中完成校验与写入，不负责提交
async fn guarded_insert(
    txn: &DatabaseTransaction,
    new_video: &NewVideo,
    uploaded_at: DateTime,
) -> Result<InsertOutcome, DbErr> {
    let registered = claim_offering(txn, &new_video.offering_id, &new_video.prof_uni).await?;
    if !registered {
        let instructors = associated_instructors(txn, &new_video.offering_id).await?;
        if !instructors.contains(&new_video.prof_uni) {
            return Ok(InsertOutcome::Rejected { instructors });
        }
    }
    video::Entity::insert(video::ActiveModel {
        video_id: Set(new_video.video_id.clone()),
        offering_id: Set(new_video.offering_id.clone()),
        prof_uni: Set(new_video.prof_uni.clone()),
        title: Set(new_video.title.clone()),
        gcs_path: Set(new_video.gcs_path.clone()),
        uploaded_at: Set(uploaded_at),
    })
    .exec_without_returning(txn)
    .await?;
    Ok(InsertOutcome::Inserted { registered })
}

/// 列出开课当前关联的所有讲师
pub async fn associated_instructors<C: ConnectionTrait>(db: &C, offering_id: &str) -> Result<Vec<String>, DbErr> {
    course_instructor::Entity::find()
        .select_only()
        .column(course_instructor::Column::ProfUni)
        .filter(course_instructor::Column::OfferingId.eq(offering_id))
        .order_by_asc(course_instructor::Column::ProfUni)
        .into_tuple::<String>()
        .all(db)
        .await
}

/// 仅当开课还没有任何关联讲师时登记该讲师，返回是否登记成功
///
/// INSERT INTO CourseInstructors (offering_id, prof_uni)
/// SELECT ?, ? WHERE NOT EXISTS (SELECT 1 FROM CourseInstructors WHERE offering_id = ?)
async fn claim_offering(txn: &DatabaseTransaction, offering_id: &str, prof_uni: &str) -> Result<bool, DbErr> {
    let exists = Query::select()
        .expr(Expr::val(1))
        .from(course_instructor::Entity)
        .and_where(course_instructor::Column::OfferingId.eq(offering_id))
        .to_owned();
    let candidate = Query::select()
        .exprs([Expr::val(offering_id), Expr::val(prof_uni)])
        .and_where(Expr::exists(exists).not())
        .to_owned();
    let mut statement = Query::insert();
    statement
        .into_table(course_instructor::Entity)
        .columns([course_instructor::Column::OfferingId, course_instructor::Column::ProfUni])
        .select_from(candidate)
        .map_err(|e| DbErr::Custom(e.to_string()))?;
    let result = txn.execute(txn.get_database_backend().build(&statement)).await?;
    Ok(result.rows_affected() > 0)
}

/// 是否为可以通过重新执行事务解决的锁冲突
fn is_lock_conflict(err: &DbErr) -> bool {
    let (DbErr::Conn(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
    | DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
    | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e)))) = err
    else {
        return false;
    };
    if let Some(e) = e.try_downcast_ref::<MySqlDatabaseError>() {
        // 1205 锁等待超时，1213 死锁
        return matches!(e.number(), 1205 | 1213);
    }
    if e.try_downcast_ref::<SqliteError>().is_some() {
        // SQLITE_BUSY、SQLITE_LOCKED 以及它们的扩展错误码（如 SQLITE_BUSY_SNAPSHOT）
        return e
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| matches!(code & 0xff, 5 | 6));
    }
    false
}
