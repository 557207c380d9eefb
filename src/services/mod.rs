pub mod auth;
pub mod daily_records;
pub mod expansion;
pub mod metrics;
pub mod progress;
pub mod weekly_plans;
