use std::borrow::Cow;

use serde::Serialize;

use crate::store::{VideoDetailRow, VideoRow};

/// HATEOAS 链接，`rel` 描述关系，`href` 为对应资源的地址
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Link {
    pub rel: &'static str,
    pub href: String,
}

#[derive(Serialize)]
pub struct VideoItem {
    #[serde(flatten)]
    pub video: VideoRow,
    pub links: Vec<Link>,
}

#[derive(Serialize)]
pub struct VideosResponse {
    pub items: Vec<VideoItem>,
    pub page_size: u64,
    pub offset: u64,
    pub links: Vec<Link>,
}

#[derive(Serialize)]
pub struct VideoResponse {
    #[serde(flatten)]
    pub video: VideoDetailRow,
    pub links: Vec<Link>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: Cow<'static, str>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}
