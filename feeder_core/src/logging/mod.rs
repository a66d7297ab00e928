//! Global logging module for the feeder crates
//!
//! Provides thread-safe global logging with a per-thread feeder context
//! and a macro interface keyed by [`Code`].

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FEEDER_CONTEXT: RefCell<Option<String>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// FEEDER CONTEXT MANAGEMENT
// ============================================================================

/// Set the active feeder type for the current thread
pub fn set_feeder_context(feeder_type: &str) {
    FEEDER_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(feeder_type.to_string());
    });
}

/// Clear the feeder context for the current thread
pub fn clear_feeder_context() {
    FEEDER_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with feeder context
pub fn with_feeder_context<F, R>(feeder_type: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_feeder_context();
    set_feeder_context(feeder_type);
    let result = f();
    match previous {
        Some(prev) => set_feeder_context(&prev),
        None => clear_feeder_context(),
    }
    result
}

/// Get current feeder context (used by macros)
pub fn get_current_feeder_context() -> Option<String> {
    FEEDER_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn attach_context(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if config::include_feeder_context() {
        if let Some(feeder_type) = get_current_feeder_context() {
            event = event.with_context("feeder_type", &feeder_type);
        }
    }

    event
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    log_with_context(LogEvent::error(code, message), context);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    log_with_context(LogEvent::success(code, message), context);
}

/// Log a prepared event with context (used by the info/warning/debug macros)
pub fn log_with_context(event: LogEvent, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(attach_context(event, context));
    }
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    diagnostics.push_str(&format!(
        "Feeder context: {}\n",
        get_current_feeder_context().unwrap_or_else(|| "<none>".to_string())
    ));
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feeder_context_management() {
        assert!(get_current_feeder_context().is_none());

        set_feeder_context("bowl");
        assert_eq!(get_current_feeder_context().as_deref(), Some("bowl"));

        clear_feeder_context();
        assert!(get_current_feeder_context().is_none());
    }

    #[test]
    fn test_with_feeder_context_restores_previous() {
        set_feeder_context("linear");

        let result = with_feeder_context("hopper", || {
            assert_eq!(get_current_feeder_context().as_deref(), Some("hopper"));
            7
        });

        assert_eq!(result, 7);
        assert_eq!(get_current_feeder_context().as_deref(), Some("linear"));
        clear_feeder_context();
    }

    #[test]
    fn test_attach_context_adds_feeder_type() {
        let event = with_feeder_context("bowl", || {
            attach_context(LogEvent::info("x"), vec![("lines", "3")])
        });

        assert_eq!(event.context.get("lines").map(String::as_str), Some("3"));
        if config::include_feeder_context() {
            assert_eq!(
                event.context.get("feeder_type").map(String::as_str),
                Some("bowl")
            );
        }
    }

    #[test]
    fn test_safe_logging_does_not_panic() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }

    #[test]
    fn test_diagnostics() {
        let diagnostics = get_system_diagnostics();
        assert!(diagnostics.contains("Logging System Diagnostics"));
        assert!(diagnostics.contains("Initialized:"));
    }
}
