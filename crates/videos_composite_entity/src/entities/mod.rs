pub mod course;
pub mod course_instructor;
pub mod course_offering;
pub mod video;
