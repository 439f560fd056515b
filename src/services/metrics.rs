use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

use crate::error::AppError;

lazy_static! {
    pub static ref REQUESTS_COUNTER: CounterVec = register_counter_vec!(
        "announcements_requests_total",
        "Announcement operations by outcome",
        &["operation", "outcome"]
    ).unwrap();

    pub static ref AUTH_FAILURES_COUNTER: CounterVec = register_counter_vec!(
        "announcements_auth_failures_total",
        "Rejected teacher credentials by reason",
        &["reason"]
    ).unwrap();
}

/// Count one operation, labelled `ok` or with the HTTP status it will map to.
pub fn record<T>(operation: &str, result: &Result<T, AppError>) {
    let outcome = match result {
        Ok(_) => "ok".to_string(),
        Err(e) => e.status().as_u16().to_string(),
    };
    REQUESTS_COUNTER
        .with_label_values(&[operation, outcome.as_str()])
        .inc();
}

pub fn record_auth_failure(error: &AppError) {
    let reason = match error {
        AppError::AuthenticationRequired => "missing",
        AppError::InvalidCredential => "unknown_teacher",
        _ => "store_error",
    };
    AUTH_FAILURES_COUNTER.with_label_values(&[reason]).inc();
}
