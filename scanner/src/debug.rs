//! Debugging helpers.
//!
//! Debugging is governed by two conditions:
//!   1. The `debug_prints` feature. Without it, debugging code is not emitted at all.
//!   2. The `YAGRAPH_DEBUG` environment variable. If the crate is built with the feature, the
//!      program must additionally be fed the `YAGRAPH_DEBUG` variable in its environment for the
//!      helpers to print anything.

// Without the feature, expand to nothing.
#[cfg(not(feature = "debug_prints"))]
macro_rules! debug_print {
    ($($arg:tt)*) => {{}};
}

#[cfg(feature = "debug_prints")]
macro_rules! debug_print {
    ($($arg:tt)*) => {{
        if $crate::debug::enabled() {
            eprintln!($($arg)*)
        }
    }};
}

/// Return whether debugging features are enabled in this execution.
#[cfg(feature = "debug_prints")]
#[must_use]
pub fn enabled() -> bool {
    static ENABLED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var("YAGRAPH_DEBUG").is_ok())
}
