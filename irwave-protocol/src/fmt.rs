//! Logging macros
//!
//! Routes log output to the right backend for the build:
//! - `defmt` feature: defmt
//! - Host tests: `println!`
//! - Otherwise: compiled out, arguments still evaluated by reference so
//!   call sites don't trip unused-variable lints

#![allow(unused_macros)]

macro_rules! ir_trace {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($fmt $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[TRACE] ", $fmt) $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), not(test)))]
        {
            $(let _ = &$arg;)*
        }
    }};
}

macro_rules! ir_debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($fmt $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[DEBUG] ", $fmt) $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), not(test)))]
        {
            $(let _ = &$arg;)*
        }
    }};
}

macro_rules! ir_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($fmt $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[WARN] ", $fmt) $(, $arg)*);

        #[cfg(all(not(feature = "defmt"), not(test)))]
        {
            $(let _ = &$arg;)*
        }
    }};
}
