mod log;
pub mod misc;
