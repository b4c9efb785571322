use thiserror::Error;

#[derive(Error, Debug)]
pub enum InnerApiError {
    #[error("Video not found: {0}")]
    NotFound(String),
    #[error(
        "Offering {offering_id} is already associated with instructor(s): {}",
        .instructors.join(", ")
    )]
    Conflict {
        offering_id: String,
        instructors: Vec<String>,
    },
    #[error("Bad request: {0}")]
    BadRequest(String),
}
