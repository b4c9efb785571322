use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::routing::{get, post};
use axum::{Json, Router};
use sea_orm::DatabaseConnection;

use crate::api::error::InnerApiError;
use crate::api::helper::{collection_link, video_links};
use crate::api::request::{VideoMetadataRequest, VideosRequest};
use crate::api::response::{Link, MessageResponse, VideoItem, VideoResponse, VideosResponse};
use crate::api::wrapper::{ApiError, QueryParams, ValidatedJson};
use crate::store::{self, InsertOutcome, OfferingRow};

pub(super) fn router() -> Router {
    Router::new()
        .route("/videos", get(get_videos))
        .route("/videos/metadata", post(create_video_metadata))
        .route("/videos/offer", get(get_offerings).post(get_offerings))
        .route("/videos/{video_id}", get(get_video))
}

/// 按关键字、课程、讲师、学年与学期检索视频，支持分页
pub async fn get_videos(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    QueryParams(params): QueryParams<VideosRequest>,
) -> Result<Json<VideosResponse>, ApiError> {
    let rows = store::search_videos(db.as_ref(), &params.filter(), params.pagination()).await?;
    let items = rows
        .into_iter()
        .map(|video| VideoItem {
            links: video_links(&video.video_id, Some(video.course_id.as_str())),
            video,
        })
        .collect();
    Ok(Json(VideosResponse {
        items,
        page_size: params.limit,
        offset: params.offset,
        links: vec![collection_link(&params)],
    }))
}

pub async fn get_video(
    Path(video_id): Path<String>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<VideoResponse>, ApiError> {
    let Some(video) = store::get_video(db.as_ref(), &video_id).await? else {
        return Err(InnerApiError::NotFound(video_id).into());
    };
    let mut links = video_links(&video.video_id, video.course_id.as_deref());
    links.push(Link {
        rel: "collection",
        href: "/videos".to_owned(),
    });
    Ok(Json(VideoResponse { video, links }))
}

/// 写入视频元数据，上传者必须是该开课的讲师（或该开课的首位上传者）
pub async fn create_video_metadata(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<VideoMetadataRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let offering_id = request.offering_id.clone();
    let prof_uni = request.prof_uni.clone();
    let uploaded_at = chrono::Utc::now().naive_utc();
    match store::insert_video_metadata(db.as_ref(), request.into(), uploaded_at).await? {
        InsertOutcome::Inserted { registered } => {
            if registered {
                info!("讲师 {prof_uni} 成为开课 {offering_id} 的首位关联讲师");
            }
            Ok(Json(MessageResponse {
                message: "Video metadata inserted successfully".into(),
            }))
        }
        InsertOutcome::Rejected { instructors } => {
            warn!("讲师 {prof_uni} 不属于开课 {offering_id} 的已关联讲师 {instructors:?}，拒绝写入");
            Err(InnerApiError::Conflict {
                offering_id,
                instructors,
            }
            .into())
        }
    }
}

/// 列出全部开课，不分页
pub async fn get_offerings(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<OfferingRow>>, ApiError> {
    Ok(Json(store::list_offerings(db.as_ref()).await?))
}
