mod args;

pub use crate::config::args::{ARGS, Args, version};
