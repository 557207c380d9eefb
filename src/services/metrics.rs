use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

lazy_static! {
    pub static ref TEMPLATES_SAVED_COUNTER: CounterVec = register_counter_vec!(
        "api_weekly_templates_saved_total",
        "Weekly templates created or updated, by kind and operation",
        &["kind", "op"]
    ).unwrap();

    pub static ref ASSIGNED_DAYS_COUNTER: CounterVec = register_counter_vec!(
        "api_assigned_days_total",
        "Daily records written by template assignment, by kind and outcome",
        &["kind", "status"]
    ).unwrap();

    pub static ref MONTH_VIEWS_COUNTER: CounterVec = register_counter_vec!(
        "api_month_views_total",
        "Monthly progress views served",
        &["status"]
    ).unwrap();
}
