// crates/preingest-rs/src/log.rs

/// Trait for structs that provide metadata for logging
pub trait LogMetadata {
    fn meta(&self) -> String;
}

/// Identifies the running operation and the collection it works on.
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub operation: &'static str,
    pub collection: String,
}

impl OperationContext {
    pub fn new(operation: &'static str, collection: impl Into<String>) -> Self {
        Self {
            operation,
            collection: collection.into(),
        }
    }
}

impl LogMetadata for OperationContext {
    fn meta(&self) -> String {
        format!("op={}, collection={}", self.operation, self.collection)
    }
}

// =============================================
// Logging Macros (namespaced under crate::log)
// =============================================

// ===== ctx_info! =====
macro_rules! ctx_info {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        log::info!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== ctx_warn! =====
macro_rules! ctx_warn {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        log::warn!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== ctx_error! =====
macro_rules! ctx_error {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        log::error!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== ctx_debug! =====
macro_rules! ctx_debug {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        log::debug!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// Re-export macros for use in other files
pub(crate) use ctx_debug;
pub(crate) use ctx_error;
pub(crate) use ctx_info;
pub(crate) use ctx_warn;
