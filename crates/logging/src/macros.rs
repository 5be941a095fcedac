//! # Logging Macros
//!
//! Convenience macros for structured logging with consistent targets.

/// Log with request ID and target.
#[macro_export]
macro_rules! info_with_request {
    (target: $target:expr, $request_id:expr, $($arg:tt)*) => {
        tracing::info!(target: $target, request_id = %$request_id, $($arg)*)
    };
}

/// Log an error with request ID and error details.
#[macro_export]
macro_rules! error_with_request {
    (target: $target:expr, $request_id:expr, $err:expr, $($arg:tt)*) => {
        tracing::error!(target: $target, request_id = %$request_id, error = %$err, $($arg)*)
    };
}

/// Log an API request with method, path, and status.
#[macro_export]
macro_rules! log_api_request {
    ($method:expr, $path:expr, $status:expr, $duration:expr) => {
        tracing::info!(
            target: "api",
            method = %$method,
            path = %$path,
            status = %$status,
            duration_ms = %$duration,
            "API request"
        )
    };
}

/// Log an authentication event.
#[macro_export]
macro_rules! log_auth_event {
    ($event:expr, $user_id:expr, $success:expr) => {
        tracing::info!(
            target: "auth",
            event = %$event,
            user_id = %$user_id,
            success = $success,
            "Authentication event"
        )
    };
}
