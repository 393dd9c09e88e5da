pub mod config;
pub mod day;
pub mod habit;
pub mod history;
pub mod profile;
pub mod streak;
