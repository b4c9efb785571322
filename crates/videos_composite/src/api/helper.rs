use serde::Serialize;

use crate::api::request::VideosRequest;
use crate::api::response::Link;

pub fn video_href(video_id: &str) -> String {
    format!("/videos/{}", urlencoding::encode(video_id))
}

pub fn course_href(course_id: &str) -> String {
    format!("/courses/{}", urlencoding::encode(course_id))
}

/// 检索结果中每一项的链接
pub fn video_links(video_id: &str, course_id: Option<&str>) -> Vec<Link> {
    let mut links = vec![Link {
        rel: "self",
        href: video_href(video_id),
    }];
    if let Some(course_id) = course_id {
        links.push(Link {
            rel: "course",
            href: course_href(course_id),
        });
    }
    links
}

#[derive(Serialize)]
struct CollectionQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    course_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prof: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    semester: Option<&'a str>,
    limit: u64,
    offset: u64,
}

/// 由实际生效的检索条件重新拼出列表的 self 链接
pub fn collection_link(params: &VideosRequest) -> Link {
    let query = CollectionQuery {
        q: params.q.as_deref(),
        course_id: params.course_id.as_deref(),
        prof: params.prof.as_deref(),
        year: params.year,
        semester: params.semester.as_deref(),
        limit: params.limit,
        offset: params.offset,
    };
    // 字段都是字符串或整数，序列化不会失败
    let query = serde_urlencoded::to_string(&query).unwrap_or_default();
    Link {
        rel: "self",
        href: format!("/videos?{query}"),
    }
}
