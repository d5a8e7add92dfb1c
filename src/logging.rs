//! Logging macros
//!
//! On target the macros forward to `defmt` (RTT transport). Host unit tests
//! print to stdout; any other host build only type-checks the arguments. Format strings
//! must stay within the `{}` subset that both `defmt` and `core::fmt` accept.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "embedded"), test))]
        println!("[INFO] {}", format!($($arg)*));

        #[cfg(not(any(feature = "embedded", test)))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "embedded"), test))]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(not(any(feature = "embedded", test)))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "embedded"), test))]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(not(any(feature = "embedded", test)))]
        let _ = format_args!($($arg)*);
    }};
}
