pub mod auth;
pub mod daily;
pub mod plan;
pub mod progress;
pub mod user;
