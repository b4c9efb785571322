use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::store::{NewVideo, Pagination, VideoFilter};

pub const DEFAULT_PAGE_SIZE: u64 = 20;

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// 调用方可能传入 `year=` 这样的空参数，视为未设置
fn empty_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(de)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct VideosRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub course_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub prof: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub semester: Option<String>,
    #[serde(default = "default_page_size")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl VideosRequest {
    pub fn filter(&self) -> VideoFilter {
        VideoFilter {
            keyword: self.q.clone(),
            course_id: self.course_id.clone(),
            prof_uni: self.prof.clone(),
            year: self.year,
            semester: self.semester.clone(),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
pub struct VideoMetadataRequest {
    #[validate(length(min = 1, max = 64))]
    pub video_id: String,
    #[validate(length(min = 1, max = 64))]
    pub offering_id: String,
    #[validate(length(min = 1, max = 64))]
    pub prof_uni: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1, max = 1024))]
    pub gcs_path: String,
}

impl From<VideoMetadataRequest> for NewVideo {
    fn from(request: VideoMetadataRequest) -> Self {
        Self {
            video_id: request.video_id,
            offering_id: request.offering_id,
            prof_uni: request.prof_uni,
            title: request.title,
            gcs_path: request.gcs_path,
        }
    }
}
