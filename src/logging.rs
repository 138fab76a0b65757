/// Conditional logging for development builds
///
/// The `log!` macro provides informational logging that is compiled out of
/// production (release) builds by default. Warnings and errors should keep
/// using `leptos::logging::warn!` and `leptos::logging::error!` directly.
///
/// Output goes through `leptos::logging`, which writes to the browser console
/// on wasm and to stdout on native targets (tests, benches).
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// # Examples
///
/// ```rust
/// use metro_graph::logging::log;
///
/// log!("Built render model: {} nodes", 42);
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            leptos::logging::log!($($arg),+);
        }
    };
}

pub use log;

/// Milliseconds since an arbitrary origin, for `perf_timing` logs.
#[cfg(feature = "perf_timing")]
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.performance())
            .map_or(0.0, |p| p.now())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
    }
}
