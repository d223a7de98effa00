pub mod actions;
pub mod jobs;
