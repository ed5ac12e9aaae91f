//! Conditional logging macros gated on a module-level `ENABLE_LOGS` flag.
//!
//! The chatty paths (dataset normalization, model training) log per-load
//! summaries that are useful while tuning but noisy in steady state; each
//! of those modules declares its own flag:
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_info, log_warn};
//!
//! log_info!("loaded {} recipes", 120);
//! ```

/// Conditional info logging. The calling module must define
/// `const ENABLE_LOGS: bool`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Conditional warn logging. The calling module must define
/// `const ENABLE_LOGS: bool`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Conditional error logging. The calling module must define
/// `const ENABLE_LOGS: bool`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
