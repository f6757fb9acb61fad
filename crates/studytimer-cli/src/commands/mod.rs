pub mod completions;
pub mod config;
pub mod reminder;
pub mod sessions;
pub mod subject;
pub mod timer;
